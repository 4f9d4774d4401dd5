pub mod analysis;
pub mod cli;
pub mod commands;
pub mod error;
pub mod file_manager;
pub mod logging;
pub mod models;
pub mod parsers;
pub mod utils;

pub use error::{AnalyzerError, Result};
pub use models::GameProfile;
pub use parsers::{detect_csv_format, parse_csv_file, parse_trace, ParsedTrace};

use cli::Args;
use commands::settings::get_settings;
use file_manager::initialize_json_file;
use log::{debug, warn};
use models::{Settings, Sku};
use utils::{get_archived_skus_json_path, get_settings_json_path, get_skus_json_path, initialize_data_directories};

fn initialize_app_data() -> Result<()> {
    // Create directory structure
    initialize_data_directories()?;

    // Initialize JSON files with defaults
    let empty_skus: Vec<Sku> = vec![];
    initialize_json_file(&get_skus_json_path(), &empty_skus)?;
    initialize_json_file(&get_archived_skus_json_path(), &empty_skus)?;
    initialize_json_file(&get_settings_json_path(), &Settings::default())?;

    debug!("App data initialized successfully");
    Ok(())
}

/// Load settings and install the logger before touching app data, so its setup is logged
fn prepare(verbose: bool) -> std::result::Result<Settings, String> {
    let settings = get_settings().unwrap_or_default();
    logging::init_logging(&settings, verbose).map_err(|e| e.to_string())?;

    if let Err(e) = initialize_app_data() {
        warn!("Failed to initialize app data: {}", e);
    }
    Ok(settings)
}

/// Set up logging and the data directory, then execute the parsed command line
pub fn run(args: Args) -> std::result::Result<(), String> {
    let settings = prepare(args.verbose)?;
    cli::run(args, &settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_app_data_setup_reaches_the_log_file() {
        let home = tempdir().unwrap();
        std::env::set_var("SOCWATCH_ANALYZER_HOME", home.path());
        assert_eq!(utils::get_app_data_dir(), home.path());

        let settings = Settings {
            log_level: "debug".to_string(),
            log_to_file: true,
            ..Settings::default()
        };
        file_manager::write_json_file(&get_settings_json_path(), &settings).unwrap();

        let loaded = prepare(false).unwrap();
        assert!(loaded.log_to_file);
        assert!(get_skus_json_path().exists());

        let logged: String = fs::read_dir(utils::get_logs_dir())
            .unwrap()
            .map(|entry| fs::read_to_string(entry.unwrap().path()).unwrap())
            .collect();
        assert!(logged.contains("App data initialized successfully"));
    }
}
