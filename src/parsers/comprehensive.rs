// Comprehensive parser for the socwatch all-trace export.
// Extracts everything the legacy parser does plus package C-states, S0ix,
// wakeups, power, thermal and CPU-iGPU concurrency sections.

use lazy_static::lazy_static;
use regex::Regex;

use super::banners::{ExtendedBanners, COMPREHENSIVE};
use super::diagnostics::{ParseDiagnostics, Section, SectionStatus};
use super::sections::{captured_decimal, extract_base, find_banner, labeled_value, split_lines, window, ActiveModel};
use crate::models::{
    ConcurrencyData, CoreTemperature, ExtendedSections, GameProfile, PackageCStateData, PowerData, S0ixState,
    ThermalData, WakeupData, WakeupEntry,
};

// Scan windows after each banner, bounding the cost on malformed files
const PACKAGE_C_STATE_WINDOW: usize = 10;
const WAKEUP_WINDOW: usize = 20;
const POWER_WINDOW: usize = 10;
const THERMAL_WINDOW: usize = 30;
const CONCURRENCY_WINDOW: usize = 15;

/// Lines skipped after a banner to get past the column header
const SUB_HEADER_LINES: usize = 2;

lazy_static! {
    static ref SLP_S0_ROW: Regex = Regex::new(r"SLP-S0\s*,\s*([0-9]+\.?[0-9]*)").unwrap();
    static ref WAKEUP_ROW: Regex = Regex::new(r"^(\w+)\s*,\s*([0-9]+)").unwrap();
    static ref POWER_ROW: Regex = Regex::new(r"Power\s*,\s*([0-9]+\.?[0-9]*)").unwrap();
    static ref CORE_TEMPERATURE_ROW: Regex = Regex::new(
        r"CPU/Package_0/Core_([0-9]+)\s*,\s*([0-9]+\.?[0-9]*)\s*,\s*([0-9]+\.?[0-9]*)\s*,\s*([0-9]+\.?[0-9]*)"
    )
    .unwrap();
}

pub fn parse_comprehensive_format(content: &str, filename: &str) -> GameProfile {
    parse_comprehensive_with_diagnostics(content, filename).0
}

pub fn parse_comprehensive_with_diagnostics(content: &str, filename: &str) -> (GameProfile, ParseDiagnostics) {
    let lines = split_lines(content);
    let mut diagnostics = ParseDiagnostics::default();

    let mut draft = extract_base(&lines, filename, &COMPREHENSIVE, ActiveModel::SplitResidency, &mut diagnostics);

    if let Some(banners) = &COMPREHENSIVE.extended {
        draft.extended = parse_extended_sections(&lines, banners, &mut diagnostics);
    }

    (draft.finish(), diagnostics)
}

fn parse_extended_sections(
    lines: &[&str],
    banners: &ExtendedBanners,
    diagnostics: &mut ParseDiagnostics,
) -> ExtendedSections {
    ExtendedSections {
        package_c_states: parse_package_c_states(lines, banners, diagnostics),
        s0ix_state: parse_s0ix_state(lines, banners, diagnostics),
        wakeup_data: parse_wakeup_data(lines, banners, diagnostics),
        power_data: parse_power_data(lines, banners, diagnostics),
        thermal_data: parse_thermal_data(lines, banners, diagnostics),
        concurrency: parse_concurrency_data(lines, banners, diagnostics),
    }
}

/// Record the outcome of a banner-delimited section and pass the value through
fn settle<T>(
    diagnostics: &mut ParseDiagnostics,
    section: Section,
    banner_found: bool,
    value: Option<T>,
) -> Option<T> {
    let status = match (banner_found, value.is_some()) {
        (_, true) => SectionStatus::Found,
        (true, false) => SectionStatus::Malformed,
        (false, false) => SectionStatus::NotFound,
    };
    diagnostics.record(section, status);
    value
}

pub fn parse_package_c_states(
    lines: &[&str],
    banners: &ExtendedBanners,
    diagnostics: &mut ParseDiagnostics,
) -> Option<PackageCStateData> {
    let Some(banner_idx) = find_banner(lines, banners.package_c_states) else {
        return settle(diagnostics, Section::PackageCStates, false, None);
    };

    let mut states = PackageCStateData::default();
    let mut found = false;

    for line in window(lines, banner_idx, 1, PACKAGE_C_STATE_WINDOW) {
        let slots: [(&str, &mut f64); 4] = [
            ("PC0", &mut states.pc0),
            ("PC2", &mut states.pc2),
            ("PC6", &mut states.pc6),
            ("PC10", &mut states.pc10),
        ];
        for (label, slot) in slots {
            if let Some(value) = labeled_value(line, label) {
                *slot = value;
                found = true;
            }
        }
    }

    settle(diagnostics, Section::PackageCStates, true, found.then_some(states))
}

/// S0ix rows are not banner-delimited; the whole file is scanned
pub fn parse_s0ix_state(
    lines: &[&str],
    banners: &ExtendedBanners,
    diagnostics: &mut ParseDiagnostics,
) -> Option<S0ixState> {
    let mut state = S0ixState::default();
    let mut found = false;
    let [s0i2_0, s0i2_1, s0i2_2] = banners.s0i2_substates;

    for line in lines {
        if line.contains(banners.slp_s0) && line.contains(',') {
            if let Some(value) = captured_decimal(&SLP_S0_ROW, line, 1) {
                state.slp_s0_residency = value;
                found = true;
            }
        }

        let substates: [(&str, &mut f64); 3] = [
            (s0i2_0, &mut state.s0i2.s0i2_0),
            (s0i2_1, &mut state.s0i2.s0i2_1),
            (s0i2_2, &mut state.s0i2.s0i2_2),
        ];
        for (label, slot) in substates {
            if let Some(value) = labeled_value(line, label) {
                *slot = value;
                found = true;
            }
        }
    }

    let status = if found { SectionStatus::Found } else { SectionStatus::NotFound };
    diagnostics.record(Section::S0ix, status);
    found.then_some(state)
}

/// Package-level wakeups only; core and thread lists stay empty
pub fn parse_wakeup_data(
    lines: &[&str],
    banners: &ExtendedBanners,
    diagnostics: &mut ParseDiagnostics,
) -> Option<WakeupData> {
    let Some(banner_idx) = find_banner(lines, banners.package_wakeups) else {
        return settle(diagnostics, Section::Wakeups, false, None);
    };

    let mut data = WakeupData::default();

    for line in window(lines, banner_idx, SUB_HEADER_LINES, WAKEUP_WINDOW) {
        if line.trim().is_empty() || line.contains(banners.nested_summary) {
            break;
        }
        let Some(caps) = WAKEUP_ROW.captures(line) else {
            continue;
        };
        if caps[1].contains("---") {
            continue;
        }
        if let Ok(count) = caps[2].parse::<u64>() {
            data.package_wakeups.push(WakeupEntry {
                source: caps[1].to_string(),
                count,
                percentage: None,
            });
        }
    }

    let value = (!data.package_wakeups.is_empty()).then_some(data);
    settle(diagnostics, Section::Wakeups, true, value)
}

pub fn parse_power_data(
    lines: &[&str],
    banners: &ExtendedBanners,
    diagnostics: &mut ParseDiagnostics,
) -> Option<PowerData> {
    let Some(banner_idx) = find_banner(lines, banners.package_power) else {
        return settle(diagnostics, Section::Power, false, None);
    };

    let mut power = PowerData::default();
    let mut found = false;

    for line in window(lines, banner_idx, 1, POWER_WINDOW) {
        if !line.contains(banners.package_power_row) {
            continue;
        }
        if let Some(milliwatts) = captured_decimal(&POWER_ROW, line, 1) {
            power.package = milliwatts / 1000.0;
            found = true;
        }
    }

    settle(diagnostics, Section::Power, true, found.then_some(power))
}

pub fn parse_thermal_data(
    lines: &[&str],
    banners: &ExtendedBanners,
    diagnostics: &mut ParseDiagnostics,
) -> Option<ThermalData> {
    let Some(banner_idx) = find_banner(lines, banners.temperature.start) else {
        return settle(diagnostics, Section::Thermal, false, None);
    };

    let mut thermal = ThermalData::default();

    for line in window(lines, banner_idx, SUB_HEADER_LINES, THERMAL_WINDOW) {
        if line.trim().is_empty() || line.contains(banners.temperature.end) {
            break;
        }
        let Some(caps) = CORE_TEMPERATURE_ROW.captures(line) else {
            continue;
        };
        let core = caps[1].parse::<u32>().ok();
        let average = caps[4].trim_end_matches('.').parse::<f64>().ok();
        if let (Some(core), Some(temperature)) = (core, average) {
            thermal.core_temps.push(CoreTemperature {
                core,
                temperature,
                throttled: None,
            });
        }
    }

    if thermal.core_temps.is_empty() {
        return settle(diagnostics, Section::Thermal, true, None);
    }

    let total: f64 = thermal.core_temps.iter().map(|c| c.temperature).sum();
    thermal.package_temp = total / thermal.core_temps.len() as f64;

    settle(diagnostics, Section::Thermal, true, Some(thermal))
}

pub fn parse_concurrency_data(
    lines: &[&str],
    banners: &ExtendedBanners,
    diagnostics: &mut ParseDiagnostics,
) -> Option<ConcurrencyData> {
    let Some(banner_idx) = find_banner(lines, banners.concurrency.start) else {
        return settle(diagnostics, Section::Concurrency, false, None);
    };

    let mut concurrent = None;
    let mut cpu_only = None;
    let mut gpu_only = None;
    let mut both_idle = None;

    for line in window(lines, banner_idx, 1, CONCURRENCY_WINDOW) {
        if line.contains(banners.concurrency.end) {
            break;
        }
        if let Some(value) = labeled_value(line, "Both") {
            concurrent = Some(value);
        }
        if let Some(value) = labeled_value(line, "CPU Only") {
            cpu_only = Some(value);
        }
        if let Some(value) = labeled_value(line, "iGPU Only") {
            gpu_only = Some(value);
        }
        if let Some(value) = labeled_value(line, "Both Idle").or_else(|| labeled_value(line, "Idle")) {
            both_idle = Some(value);
        }
    }

    if [concurrent, cpu_only, gpu_only, both_idle].iter().all(Option::is_none) {
        return settle(diagnostics, Section::Concurrency, true, None);
    }

    // Idle is the remainder when the export omits it
    if both_idle.is_none() {
        if let (Some(cpu), Some(gpu), Some(both)) = (cpu_only, gpu_only, concurrent) {
            let busy = cpu + gpu + both;
            if busy < 100.0 {
                both_idle = Some(100.0 - busy);
            }
        }
    }

    let data = ConcurrencyData {
        cpu_only: cpu_only.unwrap_or(0.0),
        gpu_only: gpu_only.unwrap_or(0.0),
        concurrent: concurrent.unwrap_or(0.0),
        both_idle: both_idle.unwrap_or(0.0),
    };
    settle(diagnostics, Section::Concurrency, true, Some(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CoreType, FormatVersion};
    use crate::parsers::fixtures::{without_section, COMPREHENSIVE_FOUR_CORE};

    fn parse(text: &str) -> (GameProfile, ParseDiagnostics) {
        parse_comprehensive_with_diagnostics(text, "Starfield_PTATMonitor_run1.csv")
    }

    #[test]
    fn test_full_trace_extracts_every_section() {
        let (profile, diagnostics) = parse(COMPREHENSIVE_FOUR_CORE);

        assert_eq!(profile.name, "Starfield");
        assert_eq!(profile.format_version, FormatVersion::Comprehensive);
        assert_eq!(profile.metadata.total_cores, Some(4));
        assert_eq!(profile.metadata.cpu_model.as_deref(), Some("Intel(R) Core(TM) Ultra 7 268V"));
        assert_eq!(profile.metadata.collection_date.as_deref(), Some("2024-06-01 14:22:05"));
        assert_eq!(profile.metadata.p_core_count, Some(2));
        assert_eq!(profile.metadata.e_core_count, Some(1));
        assert_eq!(profile.metadata.lpe_core_count, Some(1));
        assert_eq!(profile.core_types.get(&3), Some(&CoreType::LpeCore));
        assert!(!diagnostics.is_degraded());
        assert!(diagnostics.core_type_conflicts.is_empty());

        let package = profile.extended.package_c_states.as_ref().unwrap();
        assert_eq!(package.pc0, 35.5);
        assert_eq!(package.pc10, 40.0);

        let s0ix = profile.extended.s0ix_state.as_ref().unwrap();
        assert_eq!(s0ix.slp_s0_residency, 12.5);
        assert_eq!(s0ix.s0i2.s0i2_1, 3.0);

        let wakeups = profile.extended.wakeup_data.as_ref().unwrap();
        let sources: Vec<&str> = wakeups.package_wakeups.iter().map(|w| w.source.as_str()).collect();
        assert_eq!(sources, vec!["Timer", "Interrupt", "IPI"]);
        assert!(wakeups.core_wakeups.is_empty());
        assert!(wakeups.thread_wakeups.is_empty());

        assert_eq!(profile.extended.power_data.as_ref().unwrap().package, 15.25);
    }

    #[test]
    fn test_active_is_sum_of_cc0_and_cc1() {
        let (profile, _) = parse(COMPREHENSIVE_FOUR_CORE);
        assert_eq!(profile.c_state_data.len(), 4);
        for core in &profile.c_state_data {
            assert_eq!(core.active, core.cc0.unwrap_or(0.0) + core.cc1.unwrap_or(0.0));
        }
        assert_eq!(profile.c_state_data[0].active, 45.0);
        assert_eq!(profile.c_state_data[3].freq, Some(2100));
    }

    #[test]
    fn test_package_temperature_is_mean_of_core_averages() {
        let (profile, _) = parse(COMPREHENSIVE_FOUR_CORE);
        let thermal = profile.extended.thermal_data.unwrap();
        let temps: Vec<f64> = thermal.core_temps.iter().map(|c| c.temperature).collect();
        assert_eq!(temps, vec![60.0, 65.0, 70.0, 75.0]);
        assert_eq!(thermal.package_temp, 67.5);
        assert_eq!(profile.insights.avg_temperature.as_deref(), Some("67.5"));
    }

    #[test]
    fn test_concurrency_idle_is_backfilled() {
        let (profile, _) = parse(COMPREHENSIVE_FOUR_CORE);
        let concurrency = profile.extended.concurrency.unwrap();
        assert_eq!(concurrency.cpu_only, 40.0);
        assert_eq!(concurrency.gpu_only, 10.0);
        assert_eq!(concurrency.concurrent, 20.0);
        assert_eq!(concurrency.both_idle, 30.0);
    }

    #[test]
    fn test_explicit_idle_row_is_kept() {
        let text = "CPU-iGPU Concurrency Summary: Residency\n\
                    CPU Only, 40\n\
                    iGPU Only, 10\n\
                    Both, 20\n\
                    Both Idle, 12.5\n";
        let (profile, _) = parse(text);
        assert_eq!(profile.extended.concurrency.unwrap().both_idle, 12.5);
    }

    #[test]
    fn test_idle_not_backfilled_when_buckets_missing() {
        let text = "CPU-iGPU Concurrency Summary: Residency\nCPU Only, 40\n";
        let (profile, _) = parse(text);
        let concurrency = profile.extended.concurrency.unwrap();
        assert_eq!(concurrency.cpu_only, 40.0);
        assert_eq!(concurrency.both_idle, 0.0);
    }

    #[test]
    fn test_missing_power_banner_leaves_power_absent() {
        let text = without_section(COMPREHENSIVE_FOUR_CORE, "Package Power Summary");
        let (profile, diagnostics) = parse(&text);
        assert!(profile.extended.power_data.is_none());
        assert!(profile.insights.avg_power.is_none());
        assert_eq!(diagnostics.status_of(Section::Power), Some(SectionStatus::NotFound));
        assert!(profile.extended.thermal_data.is_some());
    }

    #[test]
    fn test_banner_without_rows_is_malformed() {
        let text = "Package Power Summary: Average Rate and Total\nComponent, Rate\nGT, Power , 100\n";
        let (profile, diagnostics) = parse(text);
        assert!(profile.extended.power_data.is_none());
        assert_eq!(diagnostics.status_of(Section::Power), Some(SectionStatus::Malformed));
        assert!(diagnostics.is_degraded());
    }

    #[test]
    fn test_package_c_state_rows_outside_window_are_ignored() {
        let mut text = String::from("Package C-State Summary: Residency (Percentage and Time)\n");
        for _ in 0..10 {
            text.push_str("filler\n");
        }
        text.push_str("PC6, 50\n");
        let (profile, diagnostics) = parse(&text);
        assert!(profile.extended.package_c_states.is_none());
        assert_eq!(diagnostics.status_of(Section::PackageCStates), Some(SectionStatus::Malformed));
    }

    /// `banner`, then `filler` padding lines, then `rows`
    fn padded(banner: &str, filler: usize, rows: &[&str]) -> String {
        let mut text = format!("{}\n", banner);
        for _ in 0..filler {
            text.push_str("filler\n");
        }
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_wakeup_rows_outside_window_are_ignored() {
        // Timer lands on the last line of the window, IPI one past it
        let text = padded(
            "Package Wakeups (OS) Summary: Type Count",
            18,
            &["Timer, 10", "IPI, 5"],
        );
        let (profile, _) = parse(&text);
        let wakeups = profile.extended.wakeup_data.unwrap();
        assert_eq!(wakeups.package_wakeups.len(), 1);
        assert_eq!(wakeups.package_wakeups[0].source, "Timer");
    }

    #[test]
    fn test_power_row_outside_window_is_ignored() {
        let text = padded("Package Power Summary: Average Rate and Total", 9, &["CPU/Package_0 Power , 15250"]);
        let (profile, diagnostics) = parse(&text);
        assert!(profile.extended.power_data.is_none());
        assert_eq!(diagnostics.status_of(Section::Power), Some(SectionStatus::Malformed));

        let text = padded("Package Power Summary: Average Rate and Total", 8, &["CPU/Package_0 Power , 15250"]);
        let (profile, _) = parse(&text);
        assert_eq!(profile.extended.power_data.unwrap().package, 15.25);
    }

    #[test]
    fn test_thermal_rows_outside_window_are_ignored() {
        let text = padded(
            "Temperature Metrics Summary - Sampled: Min/Max/Avg",
            28,
            &["CPU/Package_0/Core_0, 45, 88, 60", "CPU/Package_0/Core_1, 45, 88, 90"],
        );
        let (profile, _) = parse(&text);
        let thermal = profile.extended.thermal_data.unwrap();
        assert_eq!(thermal.core_temps.len(), 1);
        assert_eq!(thermal.package_temp, 60.0);
    }

    #[test]
    fn test_concurrency_rows_outside_window_are_ignored() {
        let text = padded("CPU-iGPU Concurrency Summary: Residency", 13, &["CPU Only, 40", "iGPU Only, 10"]);
        let (profile, _) = parse(&text);
        let concurrency = profile.extended.concurrency.unwrap();
        assert_eq!(concurrency.cpu_only, 40.0);
        assert_eq!(concurrency.gpu_only, 0.0);
    }

    #[test]
    fn test_concurrency_stops_at_total_banner() {
        let text = "CPU-iGPU Concurrency Summary: Residency\n\
                    CPU Only, 40\n\
                    CPU-iGPU Concurrency Summary: Total Samples\n\
                    iGPU Only, 10\n";
        let (profile, _) = parse(text);
        let concurrency = profile.extended.concurrency.unwrap();
        assert_eq!(concurrency.cpu_only, 40.0);
        assert_eq!(concurrency.gpu_only, 0.0);
    }

    #[test]
    fn test_bare_idle_label_is_read() {
        let text = "CPU-iGPU Concurrency Summary: Residency\n\
                    CPU Only, 40\n\
                    iGPU Only, 10\n\
                    Both, 20\n\
                    Idle, 7\n";
        let (profile, _) = parse(text);
        let concurrency = profile.extended.concurrency.unwrap();
        assert_eq!(concurrency.concurrent, 20.0);
        assert_eq!(concurrency.both_idle, 7.0);
    }

    #[test]
    fn test_idle_not_backfilled_when_buckets_fill_the_trace() {
        let text = "CPU-iGPU Concurrency Summary: Residency\n\
                    CPU Only, 60\n\
                    iGPU Only, 30\n\
                    Both, 10\n";
        let (profile, _) = parse(text);
        assert_eq!(profile.extended.concurrency.unwrap().both_idle, 0.0);
    }

    #[test]
    fn test_wakeups_stop_at_nested_summary() {
        let text = "Package Wakeups (OS) Summary: Type Count\n\
                    Type, Count\n\
                    Timer, 10\n\
                    Core Wakeups (OS) Summary: Type Count\n\
                    Interrupt, 5\n";
        let (profile, _) = parse(text);
        let wakeups = profile.extended.wakeup_data.unwrap();
        assert_eq!(wakeups.package_wakeups.len(), 1);
        assert_eq!(wakeups.package_wakeups[0].count, 10);
    }

    #[test]
    fn test_s0ix_scans_whole_file() {
        let mut text = "x\n".repeat(500);
        text.push_str("s0i2.2, 4.5\n");
        let (profile, diagnostics) = parse(&text);
        let s0ix = profile.extended.s0ix_state.unwrap();
        assert_eq!(s0ix.s0i2.s0i2_2, 4.5);
        assert_eq!(s0ix.slp_s0_residency, 0.0);
        assert_eq!(diagnostics.status_of(Section::S0ix), Some(SectionStatus::Found));
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let first = parse_comprehensive_format(COMPREHENSIVE_FOUR_CORE, "a.csv");
        let second = parse_comprehensive_format(COMPREHENSIVE_FOUR_CORE, "a.csv");
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
