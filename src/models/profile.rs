// Game profile data structures - the parsed result of one SoC Watch trace
use serde::{Deserialize, Serialize};
use std::fmt;

use super::core_state::{AvgFrequency, CoreStateData, CoreTypeMap};
use super::package_state::{PackageCStateData, S0ixState};
use super::power_thermal::{ConcurrencyData, PowerData, ThermalData};
use super::wakeup::WakeupData;

/// Trace export dialect
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum FormatVersion {
    #[default]
    Legacy,
    Comprehensive,
}

impl FormatVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatVersion::Legacy => "legacy",
            FormatVersion::Comprehensive => "comprehensive",
        }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of format auto-detection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormatDetection {
    pub format: FormatVersion,
    pub confidence: u32,                // 0-100
    pub markers: Vec<String>,           // Banner markers that matched
}

/// Scalar facts about the collection run. `None` means not found in the export.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,          // Seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_freq: Option<u32>,         // MHz
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cores: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p_core_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e_core_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lpe_core_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_model: Option<String>,
}

/// Derived metrics, stored as display strings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInsights {
    pub p_core_activity: String,
    pub e_core_activity: String,
    pub p_core_avg_freq: String,
    pub e_core_avg_freq: String,
    #[serde(rename = "pCoreCC6")]
    pub p_core_cc6: String,
    #[serde(rename = "eCoreCC6")]
    pub e_core_cc6: String,
    #[serde(rename = "pCoreCC7")]
    pub p_core_cc7: String,
    #[serde(rename = "eCoreCC7")]
    pub e_core_cc7: String,
    #[serde(rename = "avgCC6")]
    pub avg_cc6: String,
    #[serde(rename = "avgCC7")]
    pub avg_cc7: String,
    pub threading_ratio: String,
    pub threading_model: String,
    // Extended insights, only present when the matching section was found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_c6_residency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_c10_residency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s0ix_residency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_power: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_temperature: Option<String>,
}

/// Sections only the comprehensive export carries. Each is independently optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedSections {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_c_states: Option<PackageCStateData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s0ix_state: Option<S0ixState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wakeup_data: Option<WakeupData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_data: Option<PowerData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thermal_data: Option<ThermalData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<ConcurrencyData>,
}

impl ExtendedSections {
    pub fn is_empty(&self) -> bool {
        self.package_c_states.is_none()
            && self.s0ix_state.is_none()
            && self.wakeup_data.is_none()
            && self.power_data.is_none()
            && self.thermal_data.is_none()
            && self.concurrency.is_none()
    }
}

/// Parsed trace of one game workload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameProfile {
    pub name: String,
    #[serde(default)]
    pub format_version: FormatVersion,
    pub metadata: ProfileMetadata,
    pub core_types: CoreTypeMap,
    pub c_state_data: Vec<CoreStateData>,
    pub avg_frequencies: Vec<AvgFrequency>,
    #[serde(flatten)]
    pub extended: ExtendedSections,
    pub insights: ProfileInsights,
}
