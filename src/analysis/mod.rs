// Derived metrics over parsed profiles
pub mod calculations;
pub mod comparison;
pub mod insights;
pub mod wakeups;

pub use calculations::*;
pub use comparison::{compare_profiles, MetricDelta, ProfileComparison};
pub use insights::{generate_insights, threading_model_description, ThreadingModel};
pub use wakeups::rank_wakeup_sources;
