// Side-by-side comparison of two game profiles

use serde::{Deserialize, Serialize};

use super::calculations::{calculate_delta, Delta};
use crate::models::GameProfile;

/// One compared metric. `delta` is `other - base`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricDelta {
    pub metric: String,
    pub unit: String,
    pub base: f64,
    pub other: f64,
    pub delta: Delta,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileComparison {
    pub base_name: String,
    pub other_name: String,
    pub metrics: Vec<MetricDelta>,
}

impl ProfileComparison {
    pub fn metric(&self, name: &str) -> Option<&MetricDelta> {
        self.metrics.iter().find(|m| m.metric == name)
    }
}

/// Insight strings are display-formatted numbers; unparseable ones compare as 0
fn insight_value(text: &str) -> f64 {
    text.trim().parse().unwrap_or(0.0)
}

/// Compare `other` against `base`. Power and temperature are included only when both
/// profiles carry those sections.
pub fn compare_profiles(base: &GameProfile, other: &GameProfile) -> ProfileComparison {
    let mut metrics = Vec::new();
    let mut push = |metric: &str, unit: &str, a: f64, b: f64| {
        metrics.push(MetricDelta {
            metric: metric.to_string(),
            unit: unit.to_string(),
            base: a,
            other: b,
            delta: calculate_delta(b, a),
        });
    };

    let (bi, oi) = (&base.insights, &other.insights);
    let from_insights: [(&str, &str, &String, &String); 7] = [
        ("P-Core Activity", "%", &bi.p_core_activity, &oi.p_core_activity),
        ("E-Core Activity", "%", &bi.e_core_activity, &oi.e_core_activity),
        ("P-Core Avg Frequency", "MHz", &bi.p_core_avg_freq, &oi.p_core_avg_freq),
        ("E-Core Avg Frequency", "MHz", &bi.e_core_avg_freq, &oi.e_core_avg_freq),
        ("Avg CC6", "%", &bi.avg_cc6, &oi.avg_cc6),
        ("Avg CC7", "%", &bi.avg_cc7, &oi.avg_cc7),
        ("Threading Ratio", "x", &bi.threading_ratio, &oi.threading_ratio),
    ];
    for (metric, unit, a, b) in from_insights {
        push(metric, unit, insight_value(a), insight_value(b));
    }

    if let (Some(a), Some(b)) = (&base.extended.power_data, &other.extended.power_data) {
        push("Package Power", "W", a.package, b.package);
    }
    if let (Some(a), Some(b)) = (&base.extended.thermal_data, &other.extended.thermal_data) {
        push("Package Temperature", "°C", a.package_temp, b.package_temp);
    }

    ProfileComparison {
        base_name: base.name.clone(),
        other_name: other.name.clone(),
        metrics,
    }
}
