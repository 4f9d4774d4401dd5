// Insight calculation - reduces per-core residency into display metrics

use serde::{Deserialize, Serialize};
use std::fmt;

use super::calculations::{calculate_average, to_fixed};
use crate::models::{CoreStateData, CoreType, ExtendedSections, ProfileInsights};

/// Points one group's mean activity must lead the other by to count as dominant
const DOMINANCE_MARGIN: f64 = 10.0;

/// Which core class carries the workload
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ThreadingModel {
    #[serde(rename = "P-Core Dominant")]
    PCoreDominant,
    #[serde(rename = "E-Core Dominant")]
    ECoreDominant,
    Balanced,
}

impl ThreadingModel {
    /// Classify from the mean activity of the P group and the E+LPE group
    pub fn classify(p_activity: f64, e_activity: f64) -> Self {
        if p_activity > e_activity + DOMINANCE_MARGIN {
            ThreadingModel::PCoreDominant
        } else if e_activity > p_activity + DOMINANCE_MARGIN {
            ThreadingModel::ECoreDominant
        } else {
            ThreadingModel::Balanced
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThreadingModel::PCoreDominant => "P-Core Dominant",
            ThreadingModel::ECoreDominant => "E-Core Dominant",
            ThreadingModel::Balanced => "Balanced",
        }
    }

    /// Parse the label stored in `ProfileInsights::threading_model`
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "P-Core Dominant" => Some(ThreadingModel::PCoreDominant),
            "E-Core Dominant" => Some(ThreadingModel::ECoreDominant),
            "Balanced" => Some(ThreadingModel::Balanced),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ThreadingModel::PCoreDominant => {
                "Workload primarily utilizes Performance cores. May benefit from E-Core offloading."
            }
            ThreadingModel::ECoreDominant => {
                "Workload efficiently utilizes Efficiency cores. Good for power efficiency."
            }
            ThreadingModel::Balanced => {
                "Workload is evenly distributed across P and E cores. Optimal thread scheduling."
            }
        }
    }
}

impl fmt::Display for ThreadingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Description for a stored `threadingModel` label
pub fn threading_model_description(label: &str) -> &'static str {
    ThreadingModel::from_label(label).map_or("Unknown threading pattern.", |model| model.description())
}

/// Group means over one core class
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct GroupStats {
    activity: f64,
    freq: f64,
    cc6: f64,
    cc7: f64,
}

impl GroupStats {
    fn of<'a>(cores: impl Iterator<Item = &'a CoreStateData>) -> Self {
        let group: Vec<&CoreStateData> = cores.collect();
        let mean = |f: fn(&CoreStateData) -> f64| calculate_average(&group.iter().map(|c| f(c)).collect::<Vec<_>>());

        GroupStats {
            activity: mean(|c| c.active),
            freq: mean(|c| c.freq.unwrap_or(0) as f64),
            cc6: mean(|c| c.cc6),
            cc7: mean(|c| c.cc7),
        }
    }
}

/// Compute the insight block. P group is `P-Core`; E group is `E-Core` plus `LPE-Core`.
pub fn generate_insights(cores: &[CoreStateData], extended: &ExtendedSections) -> ProfileInsights {
    let p = GroupStats::of(cores.iter().filter(|c| c.core_type == CoreType::PCore));
    let e = GroupStats::of(cores.iter().filter(|c| c.core_type.is_efficiency()));

    // Floor of 1 keeps the ratio finite when E cores are idle
    let ratio = p.activity / e.activity.max(1.0);
    let model = ThreadingModel::classify(p.activity, e.activity);

    let mut insights = ProfileInsights {
        p_core_activity: to_fixed(p.activity, 1),
        e_core_activity: to_fixed(e.activity, 1),
        p_core_avg_freq: to_fixed(p.freq, 0),
        e_core_avg_freq: to_fixed(e.freq, 0),
        p_core_cc6: to_fixed(p.cc6, 1),
        e_core_cc6: to_fixed(e.cc6, 1),
        p_core_cc7: to_fixed(p.cc7, 1),
        e_core_cc7: to_fixed(e.cc7, 1),
        avg_cc6: to_fixed((p.cc6 + e.cc6) / 2.0, 1),
        avg_cc7: to_fixed((p.cc7 + e.cc7) / 2.0, 1),
        threading_ratio: to_fixed(ratio, 1),
        threading_model: model.label().to_string(),
        ..Default::default()
    };

    if let Some(package) = &extended.package_c_states {
        insights.package_c6_residency = Some(to_fixed(package.pc6, 1));
        insights.package_c10_residency = Some(to_fixed(package.pc10, 1));
    }
    if let Some(s0ix) = &extended.s0ix_state {
        insights.s0ix_residency = Some(to_fixed(s0ix.slp_s0_residency, 1));
    }
    if let Some(power) = &extended.power_data {
        insights.avg_power = Some(to_fixed(power.package, 2));
    }
    if let Some(thermal) = &extended.thermal_data {
        insights.avg_temperature = Some(to_fixed(thermal.package_temp, 1));
    }

    insights
}
