// Wakeup data structures
use serde::{Deserialize, Serialize};

/// Wakeup counts at package, core and thread level
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WakeupData {
    pub package_wakeups: Vec<WakeupEntry>,
    pub core_wakeups: Vec<WakeupEntry>,
    pub thread_wakeups: Vec<WakeupEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WakeupEntry {
    pub source: String,
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,        // Share of all wakeups, filled in by ranking
}
