// Per-core C-state and frequency data structures
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Core class of a heterogeneous CPU
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CoreType {
    #[serde(rename = "P-Core")]
    PCore,
    #[serde(rename = "E-Core")]
    ECore,
    #[serde(rename = "LPE-Core")]
    LpeCore,
    Unknown,
}

impl CoreType {
    pub fn label(&self) -> &'static str {
        match self {
            CoreType::PCore => "P-Core",
            CoreType::ECore => "E-Core",
            CoreType::LpeCore => "LPE-Core",
            CoreType::Unknown => "Unknown",
        }
    }

    /// E-Cores and LPE-Cores are grouped together for insight purposes
    pub fn is_efficiency(&self) -> bool {
        matches!(self, CoreType::ECore | CoreType::LpeCore)
    }
}

impl fmt::Display for CoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Core index -> declared core type. Serialized with string keys.
pub type CoreTypeMap = BTreeMap<u32, CoreType>;

/// Residency data for one physical core
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoreStateData {
    pub core: u32,
    #[serde(rename = "type")]
    pub core_type: CoreType,
    pub active: f64,                    // Active residency in percent (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc0: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc1: Option<f64>,
    pub cc6: f64,
    pub cc7: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freq: Option<u32>,              // Average frequency in MHz
}

impl CoreStateData {
    pub fn new(core: u32, core_type: CoreType) -> Self {
        Self {
            core,
            core_type,
            active: 0.0,
            cc0: None,
            cc1: None,
            cc6: 0.0,
            cc7: 0.0,
            freq: None,
        }
    }

    /// Recompute active time from the separately tracked CC0 and CC1 residencies
    pub fn recompute_active(&mut self) {
        if self.cc0.is_some() || self.cc1.is_some() {
            self.active = self.cc0.unwrap_or(0.0) + self.cc1.unwrap_or(0.0);
        }
    }
}

/// Average operating frequency of one core (excluding idle time)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvgFrequency {
    pub core: u32,
    pub freq: u32,
    #[serde(rename = "type")]
    pub core_type: CoreType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_type_serializes_with_dashed_labels() {
        let json = serde_json::to_string(&CoreType::LpeCore).unwrap();
        assert_eq!(json, "\"LPE-Core\"");
        let parsed: CoreType = serde_json::from_str("\"P-Core\"").unwrap();
        assert_eq!(parsed, CoreType::PCore);
    }

    #[test]
    fn test_core_type_map_uses_string_keys() {
        let mut map = CoreTypeMap::new();
        map.insert(3, CoreType::ECore);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"3":"E-Core"}"#);
        let back: CoreTypeMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get(&3), Some(&CoreType::ECore));
    }

    #[test]
    fn test_recompute_active_sums_cc0_and_cc1() {
        let mut core = CoreStateData::new(0, CoreType::PCore);
        core.recompute_active();
        assert_eq!(core.active, 0.0);

        core.cc1 = Some(12.5);
        core.recompute_active();
        assert_eq!(core.active, 12.5);

        core.cc0 = Some(30.0);
        core.recompute_active();
        assert_eq!(core.active, 42.5);
    }

    #[test]
    fn test_optional_fields_are_omitted_from_json() {
        let core = CoreStateData::new(1, CoreType::ECore);
        let value = serde_json::to_value(&core).unwrap();
        assert_eq!(value["type"], "E-Core");
        assert!(value.get("cc0").is_none());
        assert!(value.get("freq").is_none());
    }
}
