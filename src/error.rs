//! Error types for the analyzer host.
//!
//! Parsing itself never fails; these cover reading files and the SKU store.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("File not found: {0:?}")]
    FileNotFound(PathBuf),

    #[error("{0} is not a text file. Make sure it is an Intel SoC Watch CSV file.")]
    NotText(String),

    #[error("SKU \"{0}\" not found")]
    SkuNotFound(String),

    #[error("A SKU named \"{0}\" already exists")]
    SkuExists(String),

    #[error("SKU name cannot be empty")]
    InvalidSkuName,

    #[error("SKU \"{sku}\" has no game at index {index}")]
    GameIndexOutOfRange { sku: String, index: usize },

    #[error("Unknown log level \"{0}\" (expected off, error, warn, info, debug or trace)")]
    InvalidLogLevel(String),

    #[error("Failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl AnalyzerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalyzerError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        AnalyzerError::Json {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = AnalyzerError> = std::result::Result<T, E>;
