// Section extraction shared by both export dialects.
// Every extractor is best-effort: a missing banner or an odd row leaves the
// corresponding field unset and the scan moves on.

use lazy_static::lazy_static;
use log::warn;
use regex::Regex;
use std::collections::BTreeMap;

use super::banners::{BannerTable, CoreDialect, SectionBanner};
use super::diagnostics::{CoreTypeConflict, ParseDiagnostics, Section, SectionStatus};
use super::ProfileDraft;
use crate::models::{AvgFrequency, CoreStateData, CoreType, CoreTypeMap, ExtendedSections, ProfileMetadata};

/// Upper bound on records allocated from a declared `Total # of cores`.
/// Larger declarations are treated as corrupt and clamped, so N > MAX_CORES
/// yields exactly MAX_CORES records.
const MAX_CORES: u32 = 4096;

const PTAT_SUFFIX: &str = "PTATMonitor";

lazy_static! {
    static ref FIRST_DECIMAL: Regex = Regex::new(r"([0-9]+\.?[0-9]*)").unwrap();
    static ref FIRST_INTEGER: Regex = Regex::new(r"([0-9]+)").unwrap();
    static ref LEADING_DECIMAL: Regex = Regex::new(r"^[0-9]+\.?[0-9]*").unwrap();
    static ref LEADING_FLOAT: Regex =
        Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").unwrap();
    static ref PARENTHESIZED_DECLARATION: Regex =
        Regex::new(r"Package_0/Core_([0-9]+) = \w+ \((P Core|E Core|LPE Core)\)").unwrap();
    static ref TWO_LETTER_DECLARATION: Regex = Regex::new(r"Package_0/Core_([0-9]+) = (LNC|SKT)").unwrap();
    static ref FREQUENCY_ROW: Regex = Regex::new(r"Core_([0-9]+).*?,\s*([0-9]+)").unwrap();
}

/// How a core's `active` residency is derived from the C-state rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveModel {
    /// Any row labelled with CC0 or CC1 sets `active` directly (last row wins)
    CombinedRow,
    /// CC0 and CC1 are tracked separately and `active` is their sum
    SplitResidency,
}

impl ActiveModel {
    fn apply(self, record: &mut CoreStateData, state: &str, residency: f64) {
        match self {
            ActiveModel::CombinedRow => {
                if state.contains("CC0") || state.contains("CC1") {
                    record.active = residency;
                } else if state.contains("CC6") {
                    record.cc6 = residency;
                } else if state.contains("CC7") {
                    record.cc7 = residency;
                }
            }
            ActiveModel::SplitResidency => {
                match state {
                    "CC0" => record.cc0 = Some(residency),
                    "CC1" => record.cc1 = Some(residency),
                    "CC6" => record.cc6 = residency,
                    "CC7" => record.cc7 = residency,
                    _ => {}
                }
                record.recompute_active();
            }
        }
    }
}

/// Split trace text into lines, tolerating CRLF endings
pub fn split_lines(content: &str) -> Vec<&str> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Display name for a trace file: `.csv` and any `PTATMonitor...` suffix removed
pub fn display_name(filename: &str) -> String {
    let stem = filename.strip_suffix(".csv").unwrap_or(filename);
    let stem = match stem.find(PTAT_SUFFIX) {
        Some(idx) => stem[..idx].trim_end_matches(|c: char| c == '_' || c == '-' || c.is_whitespace()),
        None => stem,
    };
    stem.trim().to_string()
}

/// Leading numeric prefix of a cell, the way a lenient float parse reads it
/// (`" 12.5%"` -> 12.5, `"abc"` -> None)
pub fn parse_float_prefix(value: &str) -> Option<f64> {
    LEADING_FLOAT
        .find(value.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

fn leading_decimal(value: &str) -> Option<f64> {
    LEADING_DECIMAL
        .find(value)
        .and_then(|m| m.as_str().trim_end_matches('.').parse::<f64>().ok())
}

fn first_decimal(line: &str) -> Option<f64> {
    FIRST_DECIMAL
        .captures(line)
        .and_then(|caps| caps[1].trim_end_matches('.').parse::<f64>().ok())
}

fn first_integer(line: &str) -> Option<u32> {
    FIRST_INTEGER
        .captures(line)
        .and_then(|caps| caps[1].parse::<u32>().ok())
}

/// Text following `marker` and a single space, trimmed
fn text_after(line: &str, marker: &str) -> Option<String> {
    let idx = line.find(marker)?;
    let rest = line[idx + marker.len()..].strip_prefix(' ')?;
    if rest.is_empty() {
        return None;
    }
    Some(rest.trim().to_string())
}

/// Value of a `<label> , <number>` row whose first field starts with `label`
pub fn labeled_value(line: &str, label: &str) -> Option<f64> {
    let rest = line.strip_prefix(label)?.trim_start().strip_prefix(',')?;
    leading_decimal(rest.trim_start())
}

/// Decimal captured by group `group` of `regex`
pub fn captured_decimal(regex: &Regex, line: &str, group: usize) -> Option<f64> {
    let caps = regex.captures(line)?;
    caps.get(group)?.as_str().trim_end_matches('.').parse::<f64>().ok()
}

/// Index of the first line containing `banner`
pub fn find_banner(lines: &[&str], banner: &str) -> Option<usize> {
    lines.iter().position(|line| line.contains(banner))
}

/// Lines from `start` up to (not including) the first blank line or `end` banner
pub fn section_block<'a, 'b>(lines: &'a [&'b str], start: usize, end: &str) -> &'a [&'b str] {
    let rest = &lines[start.min(lines.len())..];
    let len = rest
        .iter()
        .position(|line| line.trim().is_empty() || line.contains(end))
        .unwrap_or(rest.len());
    &rest[..len]
}

/// Bounded window `[banner + skip, banner + span)` clamped to the file
pub fn window<'a, 'b>(lines: &'a [&'b str], banner_idx: usize, skip: usize, span: usize) -> &'a [&'b str] {
    let end = banner_idx.saturating_add(span).min(lines.len());
    let start = banner_idx.saturating_add(skip).min(end);
    &lines[start..end]
}

pub fn extract_metadata(lines: &[&str], table: &BannerTable) -> ProfileMetadata {
    let banners = &table.metadata;
    let mut metadata = ProfileMetadata::default();
    let (mut p_cores, mut e_cores, mut lpe_cores) = (0u32, 0u32, 0u32);

    for line in lines.iter().take(table.metadata_window) {
        if line.contains(banners.duration) {
            if let Some(duration) = first_decimal(line) {
                metadata.duration = Some(duration);
            }
        }
        if line.contains(banners.base_frequency) {
            if let Some(freq) = first_integer(line) {
                metadata.base_freq = Some(freq);
            }
        }
        if line.contains(banners.total_cores) {
            if let Some(cores) = first_integer(line) {
                metadata.total_cores = Some(cores);
            }
        }
        if let Some(marker) = banners.collection_started {
            if let Some(date) = text_after(line, marker) {
                metadata.collection_date = Some(date);
            }
        }
        if let Some(marker) = banners.cpu_model {
            if let Some(model) = text_after(line, marker) {
                metadata.cpu_model = Some(model);
            }
        }
        if banners.count_core_declarations {
            if line.contains("(P Core)") {
                p_cores += 1;
            }
            if line.contains("(E Core)") {
                e_cores += 1;
            }
            if line.contains("(LPE Core)") {
                lpe_cores += 1;
            }
        }
    }

    if banners.count_core_declarations {
        metadata.p_core_count = Some(p_cores);
        metadata.e_core_count = Some(e_cores);
        metadata.lpe_core_count = Some(lpe_cores);
    }

    metadata
}

fn match_declaration(line: &str, dialect: CoreDialect) -> Option<(u32, CoreType)> {
    match dialect {
        CoreDialect::Parenthesized => {
            let caps = PARENTHESIZED_DECLARATION.captures(line)?;
            let core = caps[1].parse::<u32>().ok()?;
            let core_type = match &caps[2] {
                "P Core" => CoreType::PCore,
                "LPE Core" => CoreType::LpeCore,
                _ => CoreType::ECore,
            };
            Some((core, core_type))
        }
        CoreDialect::TwoLetterCode => {
            let caps = TWO_LETTER_DECLARATION.captures(line)?;
            let core = caps[1].parse::<u32>().ok()?;
            let core_type = if &caps[2] == "LNC" { CoreType::PCore } else { CoreType::ECore };
            Some((core, core_type))
        }
    }
}

/// Build the core index -> type map from architecture declarations.
/// Dialects are tried in `order` on each line; later declarations win.
pub fn extract_core_types(
    lines: &[&str],
    order: &[CoreDialect],
    diagnostics: &mut ParseDiagnostics,
) -> CoreTypeMap {
    let mut core_types = CoreTypeMap::new();

    for (idx, line) in lines.iter().enumerate() {
        let mut declared: BTreeMap<u32, CoreType> = BTreeMap::new();
        for dialect in order {
            if let Some((core, core_type)) = match_declaration(line, *dialect) {
                declared.insert(core, core_type);
            }
        }

        for (core, core_type) in declared {
            if let Some(previous) = core_types.insert(core, core_type) {
                if previous != core_type {
                    diagnostics.core_type_conflicts.push(CoreTypeConflict {
                        core,
                        previous,
                        replacement: core_type,
                        line: idx + 1,
                    });
                }
            }
        }
    }

    let status = if core_types.is_empty() { SectionStatus::NotFound } else { SectionStatus::Found };
    diagnostics.record(Section::CoreTypes, status);
    core_types
}

/// Parse the core C-state residency table.
///
/// Valid state rows are collected first; records for every declared core are
/// then allocated up front and only mutated while the rows are applied.
pub fn parse_core_residency(
    lines: &[&str],
    banner: &SectionBanner,
    total_cores: Option<u32>,
    core_types: &CoreTypeMap,
    model: ActiveModel,
    diagnostics: &mut ParseDiagnostics,
) -> Vec<CoreStateData> {
    let Some(banner_idx) = find_banner(lines, banner.start) else {
        diagnostics.record(Section::CoreResidency, SectionStatus::NotFound);
        return Vec::new();
    };

    // First two lines are the column header and the dashes separator
    let mut rows: Vec<(&str, Vec<&str>)> = Vec::new();
    for &row in section_block(lines, banner_idx + 1, banner.end).iter().skip(2) {
        let values: Vec<&str> = row.split(',').collect();
        let state = values[0].trim();
        if state.is_empty() || state.contains("---") {
            continue;
        }
        rows.push((state, values));
    }

    let mut core_count = total_cores.unwrap_or(0);
    if core_count > MAX_CORES {
        warn!("Declared core count {} exceeds {}, clamping", core_count, MAX_CORES);
        core_count = MAX_CORES;
    }

    if rows.is_empty() || core_count == 0 {
        diagnostics.record(Section::CoreResidency, SectionStatus::Malformed);
        return Vec::new();
    }

    let mut records: Vec<CoreStateData> = (0..core_count)
        .map(|core| {
            let core_type = core_types.get(&core).copied().unwrap_or(CoreType::Unknown);
            CoreStateData::new(core, core_type)
        })
        .collect();

    for (state, values) in &rows {
        for record in records.iter_mut() {
            let residency = values
                .get(record.core as usize + 1)
                .and_then(|value| parse_float_prefix(value))
                .unwrap_or(0.0);
            model.apply(record, state, residency);
        }
    }

    diagnostics.record(Section::CoreResidency, SectionStatus::Found);
    records
}

/// Parse the per-core average frequency table (excluding idle time)
pub fn parse_avg_frequencies(
    lines: &[&str],
    banner: &SectionBanner,
    core_types: &CoreTypeMap,
    diagnostics: &mut ParseDiagnostics,
) -> Vec<AvgFrequency> {
    let Some(banner_idx) = find_banner(lines, banner.start) else {
        diagnostics.record(Section::AverageFrequency, SectionStatus::NotFound);
        return Vec::new();
    };

    let frequencies: Vec<AvgFrequency> = section_block(lines, banner_idx + 1, banner.end)
        .iter()
        .filter_map(|line| {
            let caps = FREQUENCY_ROW.captures(line)?;
            let core = caps[1].parse::<u32>().ok()?;
            let freq = caps[2].parse::<u32>().ok()?;
            Some(AvgFrequency {
                core,
                freq,
                core_type: core_types.get(&core).copied().unwrap_or(CoreType::Unknown),
            })
        })
        .collect();

    let status = if frequencies.is_empty() { SectionStatus::Malformed } else { SectionStatus::Found };
    diagnostics.record(Section::AverageFrequency, status);
    frequencies
}

/// Attach each core's average frequency to its C-state record
pub fn merge_frequencies(records: &mut [CoreStateData], frequencies: &[AvgFrequency]) {
    for record in records.iter_mut() {
        if let Some(entry) = frequencies.iter().find(|f| f.core == record.core) {
            record.freq = Some(entry.freq);
        }
    }
}

/// Everything both dialects extract: metadata, core map, residency, frequency
pub fn extract_base(
    lines: &[&str],
    filename: &str,
    table: &BannerTable,
    model: ActiveModel,
    diagnostics: &mut ParseDiagnostics,
) -> ProfileDraft {
    let metadata = extract_metadata(lines, table);
    let core_types = extract_core_types(lines, &table.declaration_order, diagnostics);
    let mut c_state_data = parse_core_residency(
        lines,
        &table.core_residency,
        metadata.total_cores,
        &core_types,
        model,
        diagnostics,
    );
    let avg_frequencies = parse_avg_frequencies(lines, &table.avg_frequency, &core_types, diagnostics);
    merge_frequencies(&mut c_state_data, &avg_frequencies);

    ProfileDraft {
        name: display_name(filename),
        format_version: table.format,
        metadata,
        core_types,
        c_state_data,
        avg_frequencies,
        extended: ExtendedSections::default(),
    }
}
