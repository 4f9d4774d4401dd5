// Legacy parser for the narrow SoC Watch export (Core C-State and P-State only)

use super::banners::LEGACY;
use super::diagnostics::ParseDiagnostics;
use super::sections::{extract_base, split_lines, ActiveModel};
use crate::models::GameProfile;

pub fn parse_legacy_format(content: &str, filename: &str) -> GameProfile {
    parse_legacy_with_diagnostics(content, filename).0
}

pub fn parse_legacy_with_diagnostics(content: &str, filename: &str) -> (GameProfile, ParseDiagnostics) {
    let lines = split_lines(content);
    let mut diagnostics = ParseDiagnostics::default();

    let draft = extract_base(&lines, filename, &LEGACY, ActiveModel::CombinedRow, &mut diagnostics);

    (draft.finish(), diagnostics)
}
