use std::fs;
use std::path::PathBuf;

use crate::errors::{Result, StorageError};
use crate::watchlist::WatchlistEntry;

// Define the trait for WatchlistRepository
pub trait WatchlistRepositoryTrait: Send + Sync {
    fn load(&self) -> Result<Vec<WatchlistEntry>>;
    fn save(&self, entries: &[WatchlistEntry]) -> Result<()>;
}

/// JSON-file-backed watchlist store.
///
/// A missing file reads as an empty watchlist; the file is created on
/// first save.
pub struct FileWatchlistRepository {
    path: PathBuf,
}

impl FileWatchlistRepository {
    pub fn new(path: PathBuf) -> Self {
        FileWatchlistRepository { path }
    }
}

impl WatchlistRepositoryTrait for FileWatchlistRepository {
    fn load(&self) -> Result<Vec<WatchlistEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?;
        let entries = serde_json::from_str(&raw)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;
        Ok(entries)
    }

    fn save(&self, entries: &[WatchlistEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        }
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        Ok(())
    }
}
