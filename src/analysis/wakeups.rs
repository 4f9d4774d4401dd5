// Wakeup source ranking

use super::calculations::calculate_percentage;
use crate::models::WakeupEntry;

/// Sort wakeup sources by count (highest first) and fill in each source's share of the total.
/// Sources with equal counts keep their export order.
pub fn rank_wakeup_sources(entries: &[WakeupEntry]) -> Vec<WakeupEntry> {
    // Counts come straight from the export and can sum past u64::MAX
    let total: f64 = entries.iter().map(|e| e.count as f64).sum();

    let mut ranked: Vec<WakeupEntry> = entries
        .iter()
        .map(|entry| WakeupEntry {
            percentage: Some(calculate_percentage(entry.count as f64, total)),
            ..entry.clone()
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}
