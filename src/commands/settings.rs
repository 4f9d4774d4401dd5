// Settings command handlers - real implementation with file storage
use crate::error::{AnalyzerError, Result};
use crate::file_manager::{read_json_file_or_default, update_json_file};
use crate::models::Settings;
use crate::utils::get_settings_json_path;
use log::debug;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSettingsParams {
    pub log_level: Option<String>,
    pub log_to_file: Option<bool>,
    pub pretty_json: Option<bool>,
    pub default_sku: Option<String>,
}

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

pub fn load_settings(path: &Path) -> Result<Settings> {
    read_json_file_or_default(path)
}

/// Apply a partial update and persist the result. Blank SKU names are ignored.
pub fn apply_settings_update(path: &Path, update: UpdateSettingsParams) -> Result<Settings> {
    let log_level = match update.log_level {
        Some(level) => {
            let level = level.trim().to_lowercase();
            if !LOG_LEVELS.contains(&level.as_str()) {
                return Err(AnalyzerError::InvalidLogLevel(level));
            }
            Some(level)
        }
        None => None,
    };

    let updated = update_json_file(path, |current_settings: &mut Settings| {
        if let Some(log_level) = log_level {
            current_settings.log_level = log_level;
        }
        if let Some(log_to_file) = update.log_to_file {
            current_settings.log_to_file = log_to_file;
        }
        if let Some(pretty_json) = update.pretty_json {
            current_settings.pretty_json = pretty_json;
        }
        if let Some(default_sku) = update.default_sku {
            let default_sku = default_sku.trim();
            if !default_sku.is_empty() {
                current_settings.default_sku = default_sku.to_string();
            }
        }
        Ok(current_settings.clone())
    })?;

    debug!("Updated settings: {:?}", updated);

    Ok(updated)
}

/// Get current settings from the JSON file
pub fn get_settings() -> Result<Settings, String> {
    load_settings(&get_settings_json_path()).map_err(|e| e.to_string())
}

/// Update settings with partial update support
pub fn update_settings(settings: UpdateSettingsParams) -> Result<Settings, String> {
    apply_settings_update(&get_settings_json_path(), settings).map_err(|e| e.to_string())
}
