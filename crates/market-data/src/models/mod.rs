//! Canonical market data models
//!
//! This module contains the normalized data types every provider
//! adapter maps into:
//! - `quote` - Quote and combined per-symbol records (StockQuote, StockOverview, FetchOutcome)
//! - `profile` - Company profile data (CompanyProfile)
//! - `history` - Daily price history points (HistoricalPoint)
//! - `news` - News articles, categories, and the aggregated feed
//! - `search` - Symbol search results and crypto exchange rates

mod history;
mod news;
mod profile;
mod quote;
mod search;

pub use history::HistoricalPoint;
pub use news::{NewsArticle, NewsCategory, NewsFeed};
pub use profile::CompanyProfile;
pub use quote::{FetchOutcome, StockOverview, StockQuote};
pub use search::{CryptoRate, SearchResult};
