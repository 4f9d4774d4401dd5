// SKU store and command handlers

use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::error::{AnalyzerError, Result};
use crate::file_manager::{read_json_file_or_default, update_json_file};
use crate::models::{GameProfile, Sku};
use crate::utils::{get_archived_skus_json_path, get_skus_json_path};

/// Active and archived SKU lists, each persisted as a JSON array
#[derive(Debug, Clone)]
pub struct SkuStore {
    active_path: PathBuf,
    archived_path: PathBuf,
}

impl SkuStore {
    pub fn new(active_path: impl Into<PathBuf>, archived_path: impl Into<PathBuf>) -> Self {
        Self {
            active_path: active_path.into(),
            archived_path: archived_path.into(),
        }
    }

    /// Store under the application data directory
    pub fn open_default() -> Self {
        Self::new(get_skus_json_path(), get_archived_skus_json_path())
    }

    pub fn list(&self) -> Result<Vec<Sku>> {
        read_json_file_or_default(&self.active_path)
    }

    pub fn list_archived(&self) -> Result<Vec<Sku>> {
        read_json_file_or_default(&self.archived_path)
    }

    /// Append games to an existing SKU, or create it. Returns the SKU as stored.
    pub fn add_games(&self, name: &str, games: Vec<GameProfile>) -> Result<Sku> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AnalyzerError::InvalidSkuName);
        }

        update_json_file(&self.active_path, |skus: &mut Vec<Sku>| {
            let added = games.len();
            let sku = match skus.iter_mut().find(|s| s.name == name) {
                Some(existing) => {
                    existing.games.extend(games);
                    existing.clone()
                }
                None => {
                    let sku = Sku::new(name, games);
                    skus.push(sku.clone());
                    sku
                }
            };
            info!("Added {} game(s) to SKU \"{}\" ({} total)", added, name, sku.games.len());
            Ok(sku)
        })
    }

    /// Drop one game. Returns `None` when that emptied the SKU and it was removed.
    pub fn remove_game(&self, name: &str, index: usize) -> Result<Option<Sku>> {
        update_json_file(&self.active_path, |skus: &mut Vec<Sku>| {
            let position = skus
                .iter()
                .position(|s| s.name == name)
                .ok_or_else(|| AnalyzerError::SkuNotFound(name.to_string()))?;

            let sku = &mut skus[position];
            if index >= sku.games.len() {
                return Err(AnalyzerError::GameIndexOutOfRange {
                    sku: name.to_string(),
                    index,
                });
            }
            let removed = sku.games.remove(index);
            debug!("Removed game \"{}\" from SKU \"{}\"", removed.name, name);

            if sku.games.is_empty() {
                skus.remove(position);
                info!("SKU \"{}\" is empty and was removed", name);
                Ok(None)
            } else {
                Ok(Some(sku.clone()))
            }
        })
    }

    pub fn remove_sku(&self, name: &str) -> Result<()> {
        remove_from(&self.active_path, name)?;
        info!("Removed SKU \"{}\"", name);
        Ok(())
    }

    /// Permanently delete an archived SKU
    pub fn delete_archived(&self, name: &str) -> Result<()> {
        remove_from(&self.archived_path, name)?;
        info!("Deleted archived SKU \"{}\"", name);
        Ok(())
    }

    pub fn archive(&self, name: &str) -> Result<()> {
        self.transfer(name, &self.active_path, &self.archived_path, true)?;
        info!("Archived SKU \"{}\"", name);
        Ok(())
    }

    pub fn unarchive(&self, name: &str) -> Result<()> {
        self.transfer(name, &self.archived_path, &self.active_path, false)?;
        info!("Restored SKU \"{}\" from the archive", name);
        Ok(())
    }

    /// Rename an active SKU. The new name is trimmed and must not be taken by another SKU.
    pub fn rename(&self, old_name: &str, new_name: &str) -> Result<Sku> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(AnalyzerError::InvalidSkuName);
        }

        update_json_file(&self.active_path, |skus: &mut Vec<Sku>| {
            if new_name != old_name && skus.iter().any(|s| s.name == new_name) {
                return Err(AnalyzerError::SkuExists(new_name.to_string()));
            }
            let sku = skus
                .iter_mut()
                .find(|s| s.name == old_name)
                .ok_or_else(|| AnalyzerError::SkuNotFound(old_name.to_string()))?;
            sku.name = new_name.to_string();
            info!("Renamed SKU \"{}\" to \"{}\"", old_name, new_name);
            Ok(sku.clone())
        })
    }

    /// Copy the SKU into `to` first, then drop it from `from`.
    /// A failure in between leaves a duplicate rather than losing the SKU.
    fn transfer(&self, name: &str, from: &Path, to: &Path, archived: bool) -> Result<()> {
        let source: Vec<Sku> = read_json_file_or_default(from)?;
        let mut sku = source
            .into_iter()
            .find(|s| s.name == name)
            .ok_or_else(|| AnalyzerError::SkuNotFound(name.to_string()))?;
        sku.is_archived = Some(archived);

        update_json_file(to, |skus: &mut Vec<Sku>| {
            if skus.iter().any(|s| s.name == name) {
                return Err(AnalyzerError::SkuExists(name.to_string()));
            }
            skus.push(sku);
            Ok(())
        })?;
        remove_from(from, name)
    }
}

fn remove_from(path: &Path, name: &str) -> Result<()> {
    update_json_file(path, |skus: &mut Vec<Sku>| {
        let before = skus.len();
        skus.retain(|s| s.name != name);
        if skus.len() == before {
            return Err(AnalyzerError::SkuNotFound(name.to_string()));
        }
        Ok(())
    })
}

// ============================================
// SKU Commands
// ============================================

pub fn list_skus() -> Result<Vec<Sku>, String> {
    SkuStore::open_default().list().map_err(|e| e.to_string())
}

pub fn list_archived_skus() -> Result<Vec<Sku>, String> {
    SkuStore::open_default().list_archived().map_err(|e| e.to_string())
}

pub fn add_games_to_sku(name: String, games: Vec<GameProfile>) -> Result<Sku, String> {
    SkuStore::open_default().add_games(&name, games).map_err(|e| e.to_string())
}

pub fn remove_game(sku_name: String, index: usize) -> Result<Option<Sku>, String> {
    SkuStore::open_default().remove_game(&sku_name, index).map_err(|e| e.to_string())
}

pub fn remove_sku(name: String) -> Result<(), String> {
    SkuStore::open_default().remove_sku(&name).map_err(|e| e.to_string())
}

pub fn delete_archived_sku(name: String) -> Result<(), String> {
    SkuStore::open_default().delete_archived(&name).map_err(|e| e.to_string())
}

pub fn archive_sku(name: String) -> Result<(), String> {
    SkuStore::open_default().archive(&name).map_err(|e| e.to_string())
}

pub fn unarchive_sku(name: String) -> Result<(), String> {
    SkuStore::open_default().unarchive(&name).map_err(|e| e.to_string())
}

pub fn rename_sku(old_name: String, new_name: String) -> Result<Sku, String> {
    SkuStore::open_default().rename(&old_name, &new_name).map_err(|e| e.to_string())
}
