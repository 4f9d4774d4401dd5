// Auto-detect the SoC Watch export dialect from leading content

use super::banners::{COMPREHENSIVE_MARKERS, LEGACY_MARKERS};
use crate::models::{FormatDetection, FormatVersion};

/// Only the head of the file is inspected
const INSPECT_CHARS: usize = 5000;

/// Comprehensive markers needed before the richer parser is chosen
const COMPREHENSIVE_THRESHOLD: usize = 3;

fn leading_chars(content: &str, count: usize) -> &str {
    match content.char_indices().nth(count) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}

fn matched_markers(head: &str, markers: &[&str]) -> Vec<String> {
    markers
        .iter()
        .filter(|marker| head.contains(**marker))
        .map(|marker| marker.to_string())
        .collect()
}

/// Classify trace text. Total: unrecognised content falls back to legacy.
pub fn detect_csv_format(content: &str) -> FormatDetection {
    let head = leading_chars(content, INSPECT_CHARS);

    let comprehensive = matched_markers(head, &COMPREHENSIVE_MARKERS);
    let legacy = matched_markers(head, &LEGACY_MARKERS);

    if comprehensive.len() >= COMPREHENSIVE_THRESHOLD {
        return FormatDetection {
            format: FormatVersion::Comprehensive,
            confidence: (comprehensive.len() as u32 * 15).min(100),
            markers: comprehensive,
        };
    }

    if !legacy.is_empty() {
        return FormatDetection {
            format: FormatVersion::Legacy,
            confidence: legacy.len() as u32 * 50,
            markers: legacy,
        };
    }

    // Unknown content is parsed as legacy so older exports keep working
    FormatDetection {
        format: FormatVersion::Legacy,
        confidence: 30,
        markers: Vec::new(),
    }
}

pub fn is_comprehensive_format(content: &str) -> bool {
    detect_csv_format(content).format == FormatVersion::Comprehensive
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_comprehensive_markers_select_comprehensive() {
        let text = "Package C-State Summary\nPackage Power Summary\nTemperature Metrics\n";
        let result = detect_csv_format(text);
        assert_eq!(result.format, FormatVersion::Comprehensive);
        assert_eq!(result.confidence, 45);
        assert_eq!(result.markers.len(), 3);
        assert!(is_comprehensive_format(text));
    }

    #[test]
    fn test_confidence_caps_at_100() {
        let text = COMPREHENSIVE_MARKERS.join("\n");
        let result = detect_csv_format(&text);
        assert_eq!(result.format, FormatVersion::Comprehensive);
        assert_eq!(result.confidence, 100);
        assert_eq!(result.markers.len(), 9);
    }

    #[test]
    fn test_legacy_markers_score_fifty_each() {
        let text = "Core C-State Summary: Residency (Percentage and Time)\n\
                    CPU P-State Average Frequency (excluding CPU idle time)\n\
                    Package Power Summary\n";
        let result = detect_csv_format(text);
        assert_eq!(result.format, FormatVersion::Legacy);
        assert_eq!(result.confidence, 100);
        assert_eq!(result.markers, LEGACY_MARKERS.iter().map(|m| m.to_string()).collect::<Vec<_>>());
    }

    #[test]
    fn test_unknown_text_falls_back_to_legacy() {
        for text in ["", "hello,world\n1,2", "\u{feff}\u{1F600}"] {
            let result = detect_csv_format(text);
            assert_eq!(result.format, FormatVersion::Legacy);
            assert_eq!(result.confidence, 30);
            assert!(result.markers.is_empty());
        }
    }

    #[test]
    fn test_markers_past_inspection_window_are_ignored() {
        let mut text = "x".repeat(INSPECT_CHARS);
        text.push_str("Package C-State Summary\nPackage Power Summary\nTemperature Metrics\n");
        let result = detect_csv_format(&text);
        assert_eq!(result.format, FormatVersion::Legacy);
        assert_eq!(result.confidence, 30);
    }

    #[test]
    fn test_window_respects_multibyte_characters() {
        let mut text = "é".repeat(INSPECT_CHARS - 10);
        text.push_str("Core C-State Summary: Residency");
        // Cut lands inside the marker, on a character boundary
        let result = detect_csv_format(&text);
        assert!(result.markers.is_empty());
    }

    #[test]
    fn test_detection_is_deterministic() {
        let text = "Core Wakeups\nS0ix Substate\nPCD SLP-S0 State\n";
        assert_eq!(detect_csv_format(text), detect_csv_format(text));
    }
}
