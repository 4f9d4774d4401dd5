// Command handlers - one file per domain
pub mod settings;
pub mod skus;
pub mod traces;
