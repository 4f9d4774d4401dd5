// Numeric helpers and display formatting shared by insights, comparison and the CLI

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{CoreStateData, CoreType};

/// Extra digits rendered before rounding, so ties are judged on the exact binary value
const GUARD_DIGITS: usize = 25;

/// Fixed-precision formatting with JavaScript `Number.prototype.toFixed` semantics:
/// the exact binary value is rounded half away from zero (`0.25` -> `"0.3"`,
/// `1.005` -> `"1.00"` because 1.005 is stored as 1.00499...).
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    }

    let expanded = format!("{:.*}", digits + GUARD_DIGITS, value.abs());
    let (int_part, frac_part) = expanded.split_once('.').unwrap_or((expanded.as_str(), ""));

    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(digits))
        .collect();
    let round_up = frac_part.as_bytes().get(digits).map_or(false, |d| *d >= b'5');

    let mut int_len = int_part.len();
    if round_up {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
            int_len += 1;
        }
    }

    let mut out = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&String::from_utf8_lossy(&kept[..int_len]));
    if digits > 0 {
        out.push('.');
        out.push_str(&String::from_utf8_lossy(&kept[int_len..]));
    }
    out
}

pub fn calculate_average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn calculate_percentage(value: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    (value / total) * 100.0
}

/// Seconds to `"45.0s"`, `"2.5m"` or `"1.2h"`
pub fn format_duration(seconds: f64) -> String {
    if seconds < 60.0 {
        format!("{}s", to_fixed(seconds, 1))
    } else if seconds < 3600.0 {
        format!("{}m", to_fixed(seconds / 60.0, 1))
    } else {
        format!("{}h", to_fixed(seconds / 3600.0, 1))
    }
}

pub fn format_frequency(mhz: u32) -> String {
    if mhz >= 1000 {
        format!("{} GHz", to_fixed(mhz as f64 / 1000.0, 2))
    } else {
        format!("{} MHz", mhz)
    }
}

pub fn format_power(watts: f64) -> String {
    if watts < 1.0 {
        format!("{} mW", to_fixed(watts * 1000.0, 0))
    } else {
        format!("{} W", to_fixed(watts, 2))
    }
}

pub fn group_cores_by_type(cores: &[CoreStateData]) -> BTreeMap<CoreType, Vec<&CoreStateData>> {
    let mut groups: BTreeMap<CoreType, Vec<&CoreStateData>> = BTreeMap::new();
    for core in cores {
        groups.entry(core.core_type).or_default().push(core);
    }
    groups
}

/// Absolute and relative difference of `value` against `baseline`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Delta {
    pub delta: f64,
    pub percentage: f64,                // 0 when the baseline is 0
}

pub fn calculate_delta(value: f64, baseline: f64) -> Delta {
    let delta = value - baseline;
    let percentage = if baseline != 0.0 { (delta / baseline) * 100.0 } else { 0.0 };
    Delta { delta, percentage }
}
