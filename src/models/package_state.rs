// Package C-State and S0ix data structures
use serde::{Deserialize, Serialize};

/// Whole-package C-state residencies in percent
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PackageCStateData {
    pub pc0: f64,
    pub pc2: f64,
    pub pc6: f64,
    pub pc10: f64,
}

/// s0i2 substate residencies
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct S0ixSubstate {
    pub s0i2_0: f64,
    pub s0i2_1: f64,
    pub s0i2_2: f64,
}

/// Platform S0ix residency
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct S0ixState {
    pub slp_s0_residency: f64,
    pub s0i2: S0ixSubstate,
}
