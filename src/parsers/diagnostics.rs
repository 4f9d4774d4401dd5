// Per-section extraction diagnostics.
// Parsing never fails; these let operators tell "section absent" apart from
// "banner found but nothing matched" without changing the profile itself.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::models::CoreType;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    CoreTypes,
    CoreResidency,
    AverageFrequency,
    PackageCStates,
    S0ix,
    Wakeups,
    Power,
    Thermal,
    Concurrency,
}

impl Section {
    pub fn label(&self) -> &'static str {
        match self {
            Section::CoreTypes => "core types",
            Section::CoreResidency => "core C-state residency",
            Section::AverageFrequency => "average frequency",
            Section::PackageCStates => "package C-states",
            Section::S0ix => "S0ix residency",
            Section::Wakeups => "package wakeups",
            Section::Power => "package power",
            Section::Thermal => "temperature",
            Section::Concurrency => "CPU-iGPU concurrency",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SectionStatus {
    Found,
    NotFound,
    /// Banner located but no row had the expected shape
    Malformed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionDiagnostic {
    pub section: Section,
    pub status: SectionStatus,
}

/// A core whose architecture was redeclared with a different type.
/// The replacement wins; this only records that it happened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoreTypeConflict {
    pub core: u32,
    pub previous: CoreType,
    pub replacement: CoreType,
    pub line: usize,                    // 1-based line of the replacing declaration
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParseDiagnostics {
    pub sections: Vec<SectionDiagnostic>,
    pub core_type_conflicts: Vec<CoreTypeConflict>,
}

impl ParseDiagnostics {
    pub fn record(&mut self, section: Section, status: SectionStatus) {
        match self.sections.iter_mut().find(|d| d.section == section) {
            Some(existing) => existing.status = status,
            None => self.sections.push(SectionDiagnostic { section, status }),
        }
    }

    pub fn status_of(&self, section: Section) -> Option<SectionStatus> {
        self.sections
            .iter()
            .find(|d| d.section == section)
            .map(|d| d.status)
    }

    /// True when some banner was present but its rows could not be read
    pub fn is_degraded(&self) -> bool {
        self.sections.iter().any(|d| d.status == SectionStatus::Malformed)
    }

    pub fn log_summary(&self, profile_name: &str) {
        for diagnostic in &self.sections {
            match diagnostic.status {
                SectionStatus::Found => debug!("[{}] {} found", profile_name, diagnostic.section.label()),
                SectionStatus::NotFound => debug!("[{}] {} not present", profile_name, diagnostic.section.label()),
                SectionStatus::Malformed => warn!(
                    "[{}] {} banner found but no rows matched the expected layout",
                    profile_name,
                    diagnostic.section.label()
                ),
            }
        }
        for conflict in &self.core_type_conflicts {
            warn!(
                "[{}] Core_{} redeclared as {} (was {}) on line {}",
                profile_name, conflict.core, conflict.replacement, conflict.previous, conflict.line
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_overwrites_previous_status() {
        let mut diagnostics = ParseDiagnostics::default();
        diagnostics.record(Section::Power, SectionStatus::NotFound);
        diagnostics.record(Section::Power, SectionStatus::Found);
        assert_eq!(diagnostics.sections.len(), 1);
        assert_eq!(diagnostics.status_of(Section::Power), Some(SectionStatus::Found));
        assert_eq!(diagnostics.status_of(Section::Thermal), None);
    }

    #[test]
    fn test_degraded_only_when_malformed() {
        let mut diagnostics = ParseDiagnostics::default();
        diagnostics.record(Section::S0ix, SectionStatus::NotFound);
        assert!(!diagnostics.is_degraded());
        diagnostics.record(Section::Thermal, SectionStatus::Malformed);
        assert!(diagnostics.is_degraded());
    }
}
