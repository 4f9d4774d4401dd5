// Atomic JSON file operations for the SKU and settings store

use log::debug;
use parking_lot::Mutex;
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::{AnalyzerError, Result};

lazy_static::lazy_static! {
    static ref FILE_LOCK: Mutex<()> = Mutex::new(());
}

fn read_unlocked<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(AnalyzerError::FileNotFound(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path).map_err(|e| AnalyzerError::io(path, e))?;
    serde_json::from_str(&contents).map_err(|e| AnalyzerError::json(path, e))
}

fn write_unlocked<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| AnalyzerError::io(parent, e))?;
    }

    let json_string = serde_json::to_string_pretty(data).map_err(|e| AnalyzerError::json(path, e))?;

    let temp_path = path.with_extension("tmp");
    let mut temp_file = File::create(&temp_path).map_err(|e| AnalyzerError::io(&temp_path, e))?;
    temp_file
        .write_all(json_string.as_bytes())
        .map_err(|e| AnalyzerError::io(&temp_path, e))?;
    temp_file.sync_all().map_err(|e| AnalyzerError::io(&temp_path, e))?;

    fs::rename(&temp_path, path).map_err(|e| AnalyzerError::io(path, e))
}

pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let _lock = FILE_LOCK.lock();
    read_unlocked(path)
}

/// Writes JSON atomically using write-to-temp-then-rename
pub fn write_json_file<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let _lock = FILE_LOCK.lock();
    write_unlocked(path, data)
}

pub fn initialize_json_file<T: Serialize>(path: &Path, default: &T) -> Result<()> {
    if !path.exists() {
        debug!("Initializing JSON file: {:?}", path);
        write_json_file(path, default)?;
    }
    Ok(())
}

pub fn read_json_file_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    let _lock = FILE_LOCK.lock();
    if path.exists() {
        read_unlocked(path)
    } else {
        Ok(T::default())
    }
}

/// Read-modify-write under one lock. A missing file starts from `T::default()`.
/// The closure's error aborts the update and leaves the file untouched.
pub fn update_json_file<T, R, F>(path: &Path, update_fn: F) -> Result<R>
where
    T: DeserializeOwned + Serialize + Default,
    F: FnOnce(&mut T) -> Result<R>,
{
    let _lock = FILE_LOCK.lock();
    let mut data: T = if path.exists() { read_unlocked(path)? } else { T::default() };
    let result = update_fn(&mut data)?;
    write_unlocked(path, &data)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("values.json");

        write_json_file(&path, &vec![1u32, 2, 3]).unwrap();
        let values: Vec<u32> = read_json_file(&path).unwrap();
        assert_eq!(values, vec![1, 2, 3]);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_missing_file_errors_or_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = read_json_file::<Vec<u32>>(&path).unwrap_err();
        assert!(matches!(err, AnalyzerError::FileNotFound(_)));
        let values: Vec<u32> = read_json_file_or_default(&path).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();

        let err = read_json_file::<Vec<u32>>(&path).unwrap_err();
        assert!(matches!(err, AnalyzerError::Json { .. }));
    }

    #[test]
    fn test_failed_update_leaves_file_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("values.json");
        initialize_json_file(&path, &vec![7u32]).unwrap();

        let result: Result<()> = update_json_file(&path, |values: &mut Vec<u32>| {
            values.clear();
            Err(AnalyzerError::InvalidSkuName)
        });
        assert!(result.is_err());

        let len = update_json_file(&path, |values: &mut Vec<u32>| {
            values.push(8);
            Ok(values.len())
        })
        .unwrap();
        assert_eq!(len, 2);
        assert_eq!(read_json_file::<Vec<u32>>(&path).unwrap(), vec![7, 8]);
    }
}
