use log::debug;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use crate::error::{AnalyzerError, Result};

static APP_DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// `SOCWATCH_ANALYZER_HOME` overrides the platform data directory
pub fn get_app_data_dir() -> PathBuf {
    APP_DATA_DIR
        .get_or_init(|| {
            if let Some(home) = std::env::var_os("SOCWATCH_ANALYZER_HOME") {
                return PathBuf::from(home);
            }
            let base_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
            base_dir.join("SocWatchAnalyzer")
        })
        .clone()
}

pub fn get_data_dir() -> PathBuf {
    get_app_data_dir().join("data")
}

pub fn get_logs_dir() -> PathBuf {
    get_app_data_dir().join("logs")
}

pub fn get_skus_json_path() -> PathBuf {
    get_data_dir().join("skus.json")
}

pub fn get_archived_skus_json_path() -> PathBuf {
    get_data_dir().join("archived_skus.json")
}

pub fn get_settings_json_path() -> PathBuf {
    get_data_dir().join("settings.json")
}

pub fn initialize_data_directories() -> Result<()> {
    for dir in [get_data_dir(), get_logs_dir()] {
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| AnalyzerError::io(&dir, e))?;
            debug!("Created directory: {:?}", dir);
        }
    }

    debug!("Data directories initialized at: {:?}", get_app_data_dir());
    Ok(())
}
