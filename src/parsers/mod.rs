// SoC Watch trace parsers
pub mod banners;
pub mod comprehensive;
pub mod diagnostics;
pub mod format_detector;
pub mod legacy;
pub mod sections;

#[cfg(test)]
pub(crate) mod fixtures;

pub use comprehensive::{parse_comprehensive_format, parse_comprehensive_with_diagnostics};
pub use diagnostics::{CoreTypeConflict, ParseDiagnostics, Section, SectionDiagnostic, SectionStatus};
pub use format_detector::{detect_csv_format, is_comprehensive_format};
pub use legacy::{parse_legacy_format, parse_legacy_with_diagnostics};

use log::debug;
use serde::Serialize;

use crate::analysis::generate_insights;
use crate::error::{AnalyzerError, Result};
use crate::models::{
    AvgFrequency, CoreStateData, CoreTypeMap, ExtendedSections, FormatDetection, FormatVersion, GameProfile,
    ProfileMetadata,
};

/// A profile before insights are attached
#[derive(Debug, Clone)]
pub struct ProfileDraft {
    pub name: String,
    pub format_version: FormatVersion,
    pub metadata: ProfileMetadata,
    pub core_types: CoreTypeMap,
    pub c_state_data: Vec<CoreStateData>,
    pub avg_frequencies: Vec<AvgFrequency>,
    pub extended: ExtendedSections,
}

impl ProfileDraft {
    /// Compute insights from scratch and seal the profile
    pub fn finish(self) -> GameProfile {
        let insights = generate_insights(&self.c_state_data, &self.extended);
        GameProfile {
            name: self.name,
            format_version: self.format_version,
            metadata: self.metadata,
            core_types: self.core_types,
            c_state_data: self.c_state_data,
            avg_frequencies: self.avg_frequencies,
            extended: self.extended,
            insights,
        }
    }
}

/// Profile plus how it was detected and which sections were read
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTrace {
    pub profile: GameProfile,
    pub detection: FormatDetection,
    pub diagnostics: ParseDiagnostics,
}

/// Detect the format, run the matching parser and attach diagnostics
pub fn parse_trace(content: &str, filename: &str) -> ParsedTrace {
    let detection = detect_csv_format(content);
    debug!(
        "Detected {} format for {} (confidence {}, markers {:?})",
        detection.format, filename, detection.confidence, detection.markers
    );

    let (profile, diagnostics) = match detection.format {
        FormatVersion::Comprehensive => parse_comprehensive_with_diagnostics(content, filename),
        FormatVersion::Legacy => parse_legacy_with_diagnostics(content, filename),
    };
    diagnostics.log_summary(&profile.name);

    ParsedTrace {
        profile,
        detection,
        diagnostics,
    }
}

/// Auto-detect and parse one trace file
pub fn parse_csv_file(content: &str, filename: &str) -> GameProfile {
    parse_trace(content, filename).profile
}

/// Parse raw file bytes. Fails only when the content is not UTF-8 text.
pub fn parse_trace_bytes(bytes: &[u8], filename: &str) -> Result<ParsedTrace> {
    let content = std::str::from_utf8(bytes).map_err(|_| AnalyzerError::NotText(filename.to_string()))?;
    Ok(parse_trace(content, filename))
}
