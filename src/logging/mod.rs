//! Logging setup for the analyzer
//! env_logger backend, optional log file, 7-day retention for old log files

use crate::error::{AnalyzerError, Result};
use crate::models::Settings;
use crate::utils::get_logs_dir;
use chrono::Local;
use log::{debug, info, LevelFilter};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

const LOG_RETENTION_DAYS: u64 = 7;

/// Log file for today, e.g. `socwatch-analyzer_2024-06-01.log`
pub fn log_file_path() -> PathBuf {
    get_logs_dir().join(format!("socwatch-analyzer_{}.log", Local::now().format("%Y-%m-%d")))
}

/// Install the global logger. `RUST_LOG` wins over the settings level; `verbose` forces debug.
/// Calling it twice is harmless, the first logger stays installed.
pub fn init_logging(settings: &Settings, verbose: bool) -> Result<()> {
    let env = env_logger::Env::default().default_filter_or(settings.log_level.as_str());
    let mut builder = env_logger::Builder::from_env(env);
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }

    if settings.log_to_file {
        let path = log_file_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| AnalyzerError::io(parent, e))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| AnalyzerError::io(&path, e))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    if builder.try_init().is_ok() && settings.log_to_file {
        cleanup_old_logs();
    }
    Ok(())
}

pub fn cleanup_old_logs() {
    let removed = cleanup_logs_older_than(
        &get_logs_dir(),
        Duration::from_secs(LOG_RETENTION_DAYS * 24 * 60 * 60),
    );
    if removed > 0 {
        debug!("Removed {} expired log file(s)", removed);
    }
}

/// Delete `.log` files in `logs_dir` last modified more than `retention` ago
pub fn cleanup_logs_older_than(logs_dir: &Path, retention: Duration) -> usize {
    if !logs_dir.exists() {
        return 0;
    }

    let now = SystemTime::now();
    let mut removed = 0;

    if let Ok(entries) = fs::read_dir(logs_dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "log") {
                if let Ok(modified) = fs::metadata(&path).and_then(|meta| meta.modified()) {
                    if let Ok(age) = now.duration_since(modified) {
                        if age > retention && fs::remove_file(&path).is_ok() {
                            info!("Cleaned up old log: {:?}", path.file_name());
                            removed += 1;
                        }
                    }
                }
            }
        }
    }
    removed
}
