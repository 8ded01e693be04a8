use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::errors::{Result, StorageError};

// Define the trait for SettingsRepository
pub trait SettingsRepositoryTrait: Send + Sync {
    fn get_setting(&self, key: &str) -> Result<Option<String>>;
    fn update_setting(&self, key: &str, value: &str) -> Result<()>;
    fn get_all(&self) -> Result<BTreeMap<String, String>>;
}

/// JSON-file-backed key-value settings store.
///
/// The whole map is rewritten on every update; a missing file reads as
/// an empty map. An ordered map keeps the file diff-stable.
pub struct FileSettingsRepository {
    path: PathBuf,
    cache: RwLock<BTreeMap<String, String>>,
}

impl FileSettingsRepository {
    pub fn new(path: PathBuf) -> Self {
        let cache = match Self::read_file(&path) {
            Ok(map) => map,
            Err(e) => {
                log::warn!("Failed to load settings store, starting empty: {}", e);
                BTreeMap::new()
            }
        };
        FileSettingsRepository {
            path,
            cache: RwLock::new(cache),
        }
    }

    fn read_file(path: &PathBuf) -> Result<BTreeMap<String, String>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw =
            fs::read_to_string(path).map_err(|e| StorageError::ReadFailed(e.to_string()))?;
        let map = serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        Ok(map)
    }

    fn write_file(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        }
        let raw = serde_json::to_string_pretty(map)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        Ok(())
    }
}

impl SettingsRepositoryTrait for FileSettingsRepository {
    fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
        Ok(cache.get(key).cloned())
    }

    fn update_setting(&self, key: &str, value: &str) -> Result<()> {
        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        cache.insert(key.to_string(), value.to_string());
        self.write_file(&cache)
    }

    fn get_all(&self) -> Result<BTreeMap<String, String>> {
        let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
        Ok(cache.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSettingsRepository::new(dir.path().join("settings.json"));
        assert!(repo.get_setting("theme").unwrap().is_none());
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_update_then_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store/settings.json");
        {
            let repo = FileSettingsRepository::new(path.clone());
            repo.update_setting("theme", "light").unwrap();
            repo.update_setting("finnhub_api_key", "fh-test").unwrap();
        }

        let reloaded = FileSettingsRepository::new(path);
        assert_eq!(reloaded.get_setting("theme").unwrap().as_deref(), Some("light"));
        assert_eq!(
            reloaded.get_setting("finnhub_api_key").unwrap().as_deref(),
            Some("fh-test")
        );
    }

    #[test]
    fn test_corrupt_file_starts_empty_and_heals_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        let repo = FileSettingsRepository::new(path.clone());
        assert!(repo.get_setting("theme").unwrap().is_none());

        repo.update_setting("theme", "dark").unwrap();
        match FileSettingsRepository::read_file(&path) {
            Ok(map) => assert_eq!(map.get("theme").map(String::as_str), Some("dark")),
            Err(Error::Storage(e)) => panic!("store did not heal: {}", e),
            Err(e) => panic!("unexpected error: {}", e),
        }
    }
}
