// Trace file command handlers - read, detect, parse and import SoC Watch exports

use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use crate::commands::skus::SkuStore;
use crate::error::{AnalyzerError, Result};
use crate::models::{FormatDetection, GameProfile, Sku};
use crate::parsers::{detect_csv_format, parse_trace_bytes, ParsedTrace};

const TRACE_EXTENSION: &str = ".csv";

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Only files named `*.csv` are treated as traces
pub fn is_trace_file(path: &Path) -> bool {
    file_name(path).ends_with(TRACE_EXTENSION)
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(AnalyzerError::FileNotFound(path.to_path_buf()));
    }
    fs::read(path).map_err(|e| AnalyzerError::io(path, e))
}

fn read_text(path: &Path) -> Result<String> {
    String::from_utf8(read_bytes(path)?).map_err(|_| AnalyzerError::NotText(file_name(path)))
}

/// Read and parse one trace file
pub fn read_trace(path: &Path) -> Result<ParsedTrace> {
    let bytes = read_bytes(path)?;
    parse_trace_bytes(&bytes, &file_name(path))
}

/// Parse trace files concurrently. Non-`.csv` paths are skipped; results keep input order.
/// The first failing file fails the whole batch.
pub fn parse_trace_files(paths: &[PathBuf]) -> Result<Vec<GameProfile>> {
    let traces: Vec<&PathBuf> = paths
        .iter()
        .filter(|path| {
            let keep = is_trace_file(path);
            if !keep {
                debug!("Skipping non-trace file {:?}", path);
            }
            keep
        })
        .collect();

    let results: Vec<Result<GameProfile>> = thread::scope(|s| {
        let handles: Vec<_> = traces
            .iter()
            .map(|path| s.spawn(move || read_trace(path).map(|parsed| parsed.profile)))
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    });

    results.into_iter().collect()
}

/// Parse `paths` and append the profiles to `sku_name`, creating the SKU if needed
pub fn import_into(store: &SkuStore, sku_name: &str, paths: &[PathBuf]) -> Result<Sku> {
    let games = parse_trace_files(paths)?;
    info!("Parsed {} trace(s) for SKU \"{}\"", games.len(), sku_name);
    store.add_games(sku_name, games)
}

// ============================================
// Trace Commands
// ============================================

pub fn detect_trace_format(path: String) -> Result<FormatDetection, String> {
    let content = read_text(Path::new(&path)).map_err(|e| e.to_string())?;
    Ok(detect_csv_format(&content))
}

pub fn parse_trace_file(path: String) -> Result<ParsedTrace, String> {
    read_trace(Path::new(&path)).map_err(|e| e.to_string())
}

pub fn import_trace_files(sku_name: String, paths: Vec<String>) -> Result<Sku, String> {
    let paths: Vec<PathBuf> = paths.into_iter().map(PathBuf::from).collect();
    import_into(&SkuStore::open_default(), &sku_name, &paths).map_err(|e| e.to_string())
}
