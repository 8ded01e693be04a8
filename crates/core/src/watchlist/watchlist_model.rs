use serde::{Deserialize, Serialize};

/// One saved watchlist row.
///
/// The quote fields are a snapshot from the last refresh, kept so the
/// watchlist renders immediately on startup before any provider call
/// completes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    pub symbol: String,
    pub name: String,
    pub last_price: f64,
    pub last_change_percent: f64,
    pub is_positive: bool,
}

impl WatchlistEntry {
    pub fn new(symbol: &str, name: &str) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            name: name.to_string(),
            last_price: 0.0,
            last_change_percent: 0.0,
            is_positive: true,
        }
    }
}
