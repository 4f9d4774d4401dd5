// Power, thermal and CPU-iGPU concurrency data structures
use serde::{Deserialize, Serialize};

/// Average power draw in watts
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PowerData {
    pub package: f64,
    pub core: f64,
    pub gt: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uncore: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dram: Option<f64>,
}

/// Sampled temperatures in Celsius
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThermalData {
    pub package_temp: f64,              // Mean of the per-core averages
    pub core_temps: Vec<CoreTemperature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tj_max: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoreTemperature {
    pub core: u32,
    pub temperature: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throttled: Option<bool>,
}

/// Mutually exclusive CPU/iGPU residency buckets in percent
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConcurrencyData {
    pub cpu_only: f64,
    pub gpu_only: f64,
    pub concurrent: f64,
    pub both_idle: f64,
}
