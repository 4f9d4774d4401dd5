// Settings data models
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_log_level")]
    pub log_level: String,              // error | warn | info | debug | trace
    #[serde(default)]
    pub log_to_file: bool,              // Mirror log output into the logs directory
    #[serde(default = "default_true")]
    pub pretty_json: bool,              // Pretty-print JSON written to stdout
    #[serde(default = "default_sku")]
    pub default_sku: String,            // SKU used by `import` when none is given
}

fn default_log_level() -> String {
    String::from("info")
}

fn default_true() -> bool {
    true
}

fn default_sku() -> String {
    String::from("Default")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_to_file: false,
            pretty_json: true,
            default_sku: default_sku(),
        }
    }
}
