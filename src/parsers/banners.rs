// Producer-tool banner strings, one table per export dialect.
// When SoC Watch changes its section headers, only these tables need updating.

use crate::models::FormatVersion;

/// Markers whose presence indicates the comprehensive (all-trace) export
pub const COMPREHENSIVE_MARKERS: [&str; 9] = [
    "PCD SLP-S0 State",
    "S0ix Substate",
    "Package C-State Summary",
    "CPU-iGPU Concurrency",
    "Package Wakeups",
    "Core Wakeups",
    "Package Power Summary",
    "Temperature Metrics",
    "Platform Monitoring Technology",
];

/// Markers whose presence indicates the legacy export
pub const LEGACY_MARKERS: [&str; 2] = [
    "Core C-State Summary: Residency",
    "CPU P-State Average Frequency",
];

/// Core architecture declaration dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreDialect {
    /// `Package_0/Core_<N> = LNC|SKT`
    TwoLetterCode,
    /// `Package_0/Core_<N> = <code> (P Core|E Core|LPE Core)`
    Parenthesized,
}

/// A section delimited by a start banner and a terminating banner
#[derive(Debug, Clone, Copy)]
pub struct SectionBanner {
    pub start: &'static str,
    pub end: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct MetadataBanners {
    pub duration: &'static str,
    pub base_frequency: &'static str,
    pub total_cores: &'static str,
    pub collection_started: Option<&'static str>,
    pub cpu_model: Option<&'static str>,
    pub count_core_declarations: bool,
}

/// Banners that only the comprehensive export carries
#[derive(Debug, Clone, Copy)]
pub struct ExtendedBanners {
    pub package_c_states: &'static str,
    pub slp_s0: &'static str,
    pub s0i2_substates: [&'static str; 3],
    pub package_wakeups: &'static str,
    pub nested_summary: &'static str,
    pub package_power: &'static str,
    pub package_power_row: &'static str,
    pub temperature: SectionBanner,
    pub concurrency: SectionBanner,
}

#[derive(Debug, Clone, Copy)]
pub struct BannerTable {
    pub format: FormatVersion,
    pub metadata_window: usize,         // Lines scanned for metadata
    pub declaration_order: [CoreDialect; 2],
    pub metadata: MetadataBanners,
    pub core_residency: SectionBanner,
    pub avg_frequency: SectionBanner,
    pub extended: Option<ExtendedBanners>,
}

const CORE_RESIDENCY: SectionBanner = SectionBanner {
    start: "Core C-State Summary: Residency (Percentage and Time)",
    end: "Core C-State Summary: Total Samples",
};

const AVG_FREQUENCY: SectionBanner = SectionBanner {
    start: "CPU P-State Average Frequency (excluding CPU idle time)",
    end: "CPU P-State/Frequency Summary",
};

pub const LEGACY: BannerTable = BannerTable {
    format: FormatVersion::Legacy,
    metadata_window: 50,
    declaration_order: [CoreDialect::TwoLetterCode, CoreDialect::Parenthesized],
    metadata: MetadataBanners {
        duration: "Collection duration",
        base_frequency: "CPU Base Operating Frequency",
        total_cores: "Total # of cores:",
        collection_started: None,
        cpu_model: None,
        count_core_declarations: false,
    },
    core_residency: CORE_RESIDENCY,
    avg_frequency: AVG_FREQUENCY,
    extended: None,
};

pub const COMPREHENSIVE: BannerTable = BannerTable {
    format: FormatVersion::Comprehensive,
    metadata_window: 100,
    declaration_order: [CoreDialect::Parenthesized, CoreDialect::TwoLetterCode],
    metadata: MetadataBanners {
        duration: "Collection duration",
        base_frequency: "CPU Base Operating Frequency",
        total_cores: "Total # of cores:",
        collection_started: Some("Data Collection Started:"),
        cpu_model: Some("CPU:"),
        count_core_declarations: true,
    },
    core_residency: CORE_RESIDENCY,
    avg_frequency: AVG_FREQUENCY,
    extended: Some(ExtendedBanners {
        package_c_states: "Package C-State Summary: Residency (Percentage and Time)",
        slp_s0: "SLP-S0",
        s0i2_substates: ["s0i2.0", "s0i2.1", "s0i2.2"],
        package_wakeups: "Package Wakeups (OS) Summary: Type Count",
        nested_summary: "Summary:",
        package_power: "Package Power Summary: Average Rate and Total",
        package_power_row: "CPU/Package",
        temperature: SectionBanner {
            start: "Temperature Metrics Summary - Sampled: Min/Max/Avg",
            end: "Temperature Metrics Summary",
        },
        concurrency: SectionBanner {
            start: "CPU-iGPU Concurrency Summary: Residency",
            end: "CPU-iGPU Concurrency Summary: Total",
        },
    }),
};
