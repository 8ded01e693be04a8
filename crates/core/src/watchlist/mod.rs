pub mod watchlist_model;
pub mod watchlist_repository;
pub mod watchlist_service;

pub use watchlist_model::WatchlistEntry;
pub use watchlist_repository::{FileWatchlistRepository, WatchlistRepositoryTrait};
pub use watchlist_service::{WatchlistService, WatchlistServiceTrait};
