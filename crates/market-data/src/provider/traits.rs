//! Market data provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{
    CompanyProfile, CryptoRate, HistoricalPoint, NewsArticle, NewsCategory, SearchResult,
    StockQuote,
};

/// Trait for market data providers.
///
/// Implement this trait to add support for a new market data source.
/// Not every provider supports every operation; unimplemented methods
/// default to returning [`MarketDataError::NotSupported`] so callers
/// can treat the gap like any other per-call failure.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "FINNHUB", "ALPHA_VANTAGE".
    /// Used for logging and error attribution.
    fn id(&self) -> &'static str;

    /// Fetch the latest quote for a symbol, normalized into the
    /// canonical [`StockQuote`] record.
    async fn quote(&self, symbol: &str) -> Result<StockQuote, MarketDataError>;

    /// Fetch company profile information for a symbol.
    async fn profile(&self, symbol: &str) -> Result<CompanyProfile, MarketDataError> {
        let _ = symbol;
        Err(MarketDataError::NotSupported {
            operation: "profile".to_string(),
            provider: self.id().to_string(),
        })
    }

    /// Fetch the daily close series for a symbol, ordered oldest to
    /// newest, capped to the most recent 30 trading days.
    async fn daily_series(&self, symbol: &str) -> Result<Vec<HistoricalPoint>, MarketDataError> {
        let _ = symbol;
        Err(MarketDataError::NotSupported {
            operation: "daily_series".to_string(),
            provider: self.id().to_string(),
        })
    }

    /// Fetch market news filtered by category, most recent first.
    async fn news(&self, category: NewsCategory) -> Result<Vec<NewsArticle>, MarketDataError> {
        let _ = category;
        Err(MarketDataError::NotSupported {
            operation: "news".to_string(),
            provider: self.id().to_string(),
        })
    }

    /// Search for symbols matching the query.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError> {
        let _ = query;
        Err(MarketDataError::NotSupported {
            operation: "search".to_string(),
            provider: self.id().to_string(),
        })
    }

    /// Fetch the spot exchange rate for a crypto asset.
    async fn crypto_rate(&self, crypto: &str, market: &str) -> Result<CryptoRate, MarketDataError> {
        let _ = (crypto, market);
        Err(MarketDataError::NotSupported {
            operation: "crypto_rate".to_string(),
            provider: self.id().to_string(),
        })
    }
}
