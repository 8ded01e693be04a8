use std::sync::{Arc, RwLock};

use log::warn;

use crate::errors::{Result, ValidationError};
use crate::watchlist::watchlist_repository::WatchlistRepositoryTrait;
use crate::watchlist::WatchlistEntry;

// Define the trait for WatchlistService
pub trait WatchlistServiceTrait: Send + Sync {
    fn entries(&self) -> Vec<WatchlistEntry>;
    fn symbols(&self) -> Vec<String>;
    fn contains(&self, symbol: &str) -> bool;

    /// Add an entry. Returns false if the symbol was already present.
    fn add(&self, entry: WatchlistEntry) -> Result<bool>;

    /// Remove a symbol. Returns false if it was not present.
    fn remove(&self, symbol: &str) -> Result<bool>;

    /// Add the entry if absent, remove it if present. Returns whether
    /// the symbol is on the watchlist afterwards.
    fn toggle(&self, entry: WatchlistEntry) -> Result<bool>;

    /// Replace the snapshot fields of existing entries. Symbols not on
    /// the watchlist are ignored.
    fn update_snapshots(&self, refreshed: &[WatchlistEntry]) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

pub struct WatchlistService {
    repository: Arc<dyn WatchlistRepositoryTrait>,
    entries: RwLock<Vec<WatchlistEntry>>,
}

impl WatchlistService {
    /// Load the persisted watchlist. A corrupt store file starts the
    /// service with an empty list instead of failing construction; the
    /// file is overwritten on the next mutation.
    pub fn new(repository: Arc<dyn WatchlistRepositoryTrait>) -> Self {
        let entries = match repository.load() {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to load watchlist, starting empty: {}", e);
                Vec::new()
            }
        };
        WatchlistService {
            repository,
            entries: RwLock::new(entries),
        }
    }

    fn persist(&self, entries: &[WatchlistEntry]) -> Result<()> {
        self.repository.save(entries)
    }
}

impl WatchlistServiceTrait for WatchlistService {
    fn entries(&self) -> Vec<WatchlistEntry> {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn symbols(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|e| e.symbol.clone())
            .collect()
    }

    fn contains(&self, symbol: &str) -> bool {
        let canonical = symbol.to_uppercase();
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|e| e.symbol == canonical)
    }

    fn add(&self, mut entry: WatchlistEntry) -> Result<bool> {
        // Canonicalize here too: entries built via struct literal may
        // carry a lowercase symbol, and the store holds at most one
        // entry per symbol.
        entry.symbol = entry.symbol.trim().to_uppercase();
        if entry.symbol.is_empty() {
            return Err(ValidationError::MissingField("symbol".to_string()).into());
        }

        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        if entries.iter().any(|e| e.symbol == entry.symbol) {
            return Ok(false);
        }
        entries.push(entry);
        self.persist(&entries)?;
        Ok(true)
    }

    fn remove(&self, symbol: &str) -> Result<bool> {
        let canonical = symbol.to_uppercase();
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|e| e.symbol != canonical);
        if entries.len() == before {
            return Ok(false);
        }
        self.persist(&entries)?;
        Ok(true)
    }

    fn toggle(&self, entry: WatchlistEntry) -> Result<bool> {
        if self.contains(&entry.symbol) {
            self.remove(&entry.symbol)?;
            Ok(false)
        } else {
            self.add(entry)?;
            Ok(true)
        }
    }

    fn update_snapshots(&self, refreshed: &[WatchlistEntry]) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        for entry in entries.iter_mut() {
            if let Some(update) = refreshed.iter().find(|r| r.symbol == entry.symbol) {
                entry.name = update.name.clone();
                entry.last_price = update.last_price;
                entry.last_change_percent = update.last_change_percent;
                entry.is_positive = update.is_positive;
            }
        }
        self.persist(&entries)
    }

    fn clear(&self) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.clear();
        self.persist(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watchlist::watchlist_repository::FileWatchlistRepository;

    fn service(dir: &tempfile::TempDir) -> WatchlistService {
        let repo = Arc::new(FileWatchlistRepository::new(
            dir.path().join("watchlist.json"),
        ));
        WatchlistService::new(repo)
    }

    #[test]
    fn test_add_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir);

        assert!(svc.add(WatchlistEntry::new("AAPL", "Apple Inc.")).unwrap());
        assert!(!svc.add(WatchlistEntry::new("AAPL", "Apple Inc.")).unwrap());
        assert_eq!(svc.entries().len(), 1);
    }

    #[test]
    fn test_remove_missing_symbol_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir);

        assert!(!svc.remove("ZZZZ").unwrap());
        assert!(svc.entries().is_empty());
    }

    #[test]
    fn test_toggle_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir);

        assert!(svc.toggle(WatchlistEntry::new("NVDA", "NVIDIA Corp.")).unwrap());
        assert!(svc.contains("nvda"));
        assert!(!svc.toggle(WatchlistEntry::new("NVDA", "NVIDIA Corp.")).unwrap());
        assert!(!svc.contains("NVDA"));
    }

    #[test]
    fn test_add_rejects_blank_symbol() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir);
        assert!(svc.add(WatchlistEntry::new("  ", "Blank")).is_err());
    }

    #[test]
    fn test_add_canonicalizes_struct_literal_symbols() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir);

        svc.add(WatchlistEntry::new("AAPL", "Apple Inc.")).unwrap();
        // Bypass the constructor's uppercasing.
        let lowercase = WatchlistEntry {
            symbol: "aapl".to_string(),
            name: "Apple Inc.".to_string(),
            last_price: 0.0,
            last_change_percent: 0.0,
            is_positive: true,
        };
        assert!(!svc.add(lowercase).unwrap());

        let entries = svc.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].symbol, "AAPL");
    }

    #[test]
    fn test_clear_empties_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        {
            let svc = service(&dir);
            svc.add(WatchlistEntry::new("AAPL", "Apple Inc.")).unwrap();
            svc.add(WatchlistEntry::new("MSFT", "Microsoft Corp.")).unwrap();
            svc.clear().unwrap();
            assert!(svc.entries().is_empty());
        }

        // The empty state survives a reload from the same file.
        let reloaded = service(&dir);
        assert!(reloaded.entries().is_empty());
    }

    #[test]
    fn test_mutations_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        {
            let svc = service(&dir);
            svc.add(WatchlistEntry::new("AAPL", "Apple Inc.")).unwrap();
            svc.add(WatchlistEntry::new("MSFT", "Microsoft Corp.")).unwrap();
            svc.remove("AAPL").unwrap();
        }

        let reloaded = service(&dir);
        assert_eq!(reloaded.symbols(), vec!["MSFT".to_string()]);
    }

    #[test]
    fn test_update_snapshots_ignores_unknown_symbols() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir);
        svc.add(WatchlistEntry::new("AAPL", "Apple Inc.")).unwrap();

        let mut refreshed = WatchlistEntry::new("AAPL", "Apple Inc.");
        refreshed.last_price = 231.4;
        refreshed.last_change_percent = 1.2;
        let stray = WatchlistEntry::new("TSLA", "Tesla Inc.");

        svc.update_snapshots(&[refreshed, stray]).unwrap();

        let entries = svc.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].last_price, 231.4);
    }
}
