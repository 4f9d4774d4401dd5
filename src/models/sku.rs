// SKU grouping data structures
use serde::{Deserialize, Serialize};

use super::profile::GameProfile;

/// User-defined folder of uploaded traces (not a hardware part number)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sku {
    pub name: String,
    pub games: Vec<GameProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

impl Sku {
    pub fn new(name: impl Into<String>, games: Vec<GameProfile>) -> Self {
        Self {
            name: name.into(),
            games,
            is_archived: None,
        }
    }
}
