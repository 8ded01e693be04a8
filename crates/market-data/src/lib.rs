//! StockSphere Market Data Crate
//!
//! This crate provides the data-aggregation layer for the StockSphere
//! dashboard: it fetches quotes, company profiles, price history, and
//! news from two external providers, normalizes their differently
//! shaped payloads into one canonical model, and absorbs per-symbol
//! failures with synthetic fallback records so callers always receive
//! a renderable result set.
//!
//! # Overview
//!
//! - Two providers: Finnhub (quote/profile/news/candles/search) and
//!   Alpha Vantage (quote/daily series/search/crypto rates)
//! - Typed per-provider response adapters instead of string-keyed access
//! - Per-symbol fetch-with-fallback: a failed symbol yields a synthetic
//!   record, never an error
//! - Ordered concurrent fan-out across a symbol list
//! - News aggregation with a built-in demo article set as soft fallback
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +----------------------+
//! |   Symbol list    | --> |   StockAggregator    |  (ordered fan-out)
//! +------------------+     +----------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | fetch_with_      |  (quote + profile,
//!                          | fallback         |   never fails)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    Provider      |  (Finnhub, AlphaVantage)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  FetchOutcome    |  (Sourced | Fallback)
//!                          +------------------+
//! ```

pub mod aggregator;
pub mod errors;
pub mod fallback;
pub mod models;
pub mod news;
pub mod normalize;
pub mod provider;

// Re-export all public types from models
pub use models::{
    CompanyProfile, CryptoRate, FetchOutcome, HistoricalPoint, NewsArticle, NewsCategory, NewsFeed,
    SearchResult, StockOverview, StockQuote,
};

// Re-export provider types
pub use provider::alpha_vantage::AlphaVantageProvider;
pub use provider::finnhub::FinnhubProvider;
pub use provider::MarketDataProvider;

// Re-export aggregation and news entry points
pub use aggregator::StockAggregator;
pub use errors::MarketDataError;
pub use news::{time_ago, NewsService};
