// Data models (structs)
pub mod core_state;
pub mod package_state;
pub mod power_thermal;
pub mod profile;
pub mod settings;
pub mod sku;
pub mod wakeup;

pub use core_state::*;
pub use package_state::*;
pub use power_thermal::*;
pub use profile::*;
pub use settings::*;
pub use sku::*;
pub use wakeup::*;
