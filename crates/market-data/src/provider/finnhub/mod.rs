//! Finnhub market data provider implementation.
//!
//! This module provides market data from Finnhub API:
//! - Real-time quotes via /quote
//! - Company profiles via /stock/profile2
//! - Category-filtered market news via /news
//! - Daily candles via /stock/candle
//! - Symbol search via /search
//!
//! The API key is appended as a `token` query parameter to every call.
//! API documentation: https://finnhub.io/docs/api

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::{
    CompanyProfile, HistoricalPoint, NewsArticle, NewsCategory, SearchResult, StockQuote,
};
use crate::normalize::or_zero;
use crate::provider::MarketDataProvider;

const BASE_URL: &str = "https://finnhub.io/api/v1";
const PROVIDER_ID: &str = "FINNHUB";

/// Window of the daily candle series, in calendar days.
const SERIES_WINDOW_DAYS: i64 = 30;

// ============================================================================
// API Response Structures
// ============================================================================

/// Response from /quote endpoint
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    /// Current price
    c: Option<f64>,
    /// Change
    d: Option<f64>,
    /// Percent change
    dp: Option<f64>,
    /// High price of the day
    h: Option<f64>,
    /// Low price of the day
    l: Option<f64>,
    /// Open price of the day
    o: Option<f64>,
    /// Previous close price
    pc: Option<f64>,
}

/// Response from /stock/profile2 endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileResponse {
    /// Company name
    name: Option<String>,
    /// Stock ticker
    ticker: Option<String>,
    /// Finnhub industry classification
    finnhub_industry: Option<String>,
    /// Company website
    weburl: Option<String>,
    /// Logo URL
    logo: Option<String>,
    /// Market capitalization (in millions)
    market_capitalization: Option<f64>,
}

/// Response from /stock/candle endpoint
#[derive(Debug, Deserialize)]
struct CandleResponse {
    /// Status: "ok" or "no_data"
    s: String,
    /// Close prices
    #[serde(default)]
    c: Vec<f64>,
    /// Timestamps (Unix)
    #[serde(default)]
    t: Vec<i64>,
}

/// Individual item from the /news endpoint
#[derive(Debug, Deserialize)]
struct NewsItem {
    id: i64,
    headline: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    source: String,
    /// Publication time (Unix seconds)
    datetime: i64,
    #[serde(default)]
    url: String,
    #[serde(default)]
    image: String,
}

/// Response from /search endpoint
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItem {
    description: String,
    symbol: String,
    #[serde(rename = "type")]
    security_type: String,
}

/// Error response body from Finnhub
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

// ============================================================================
// FinnhubProvider
// ============================================================================

/// Finnhub market data provider.
///
/// Free tier is limited to 60 API calls per minute; rate-limit
/// responses surface as [`MarketDataError::RateLimited`].
pub struct FinnhubProvider {
    client: Client,
    api_key: String,
}

impl FinnhubProvider {
    /// Create a new Finnhub provider with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: api_key.into(),
        }
    }

    /// Make a GET request to the Finnhub API with the token appended.
    async fn fetch(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<String, MarketDataError> {
        let url = format!("{}{}", BASE_URL, endpoint);

        let mut request = self.client.get(&url).query(&[("token", &self.api_key)]);
        for (key, value) in params {
            request = request.query(&[(key, value)]);
        }

        debug!("Finnhub request: {} with {} params", endpoint, params.len());

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::Network(e)
            }
        })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(&body) {
                if let Some(error_msg) = error_resp.error {
                    return Err(MarketDataError::ProviderError {
                        provider: PROVIDER_ID.to_string(),
                        message: error_msg,
                    });
                }
            }

            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        response.text().await.map_err(|e| MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to read response: {}", e),
        })
    }

    fn parse<T: serde::de::DeserializeOwned>(&self, text: &str) -> Result<T, MarketDataError> {
        serde_json::from_str(text).map_err(|e| MarketDataError::MalformedResponse {
            provider: PROVIDER_ID.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl MarketDataProvider for FinnhubProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn quote(&self, symbol: &str) -> Result<StockQuote, MarketDataError> {
        let params = [("symbol", symbol)];
        let text = self.fetch("/quote", &params).await?;
        let response: QuoteResponse = self.parse(&text)?;

        // Finnhub returns an all-zero body for unknown symbols instead
        // of an error status.
        if or_zero(response.c) == 0.0 && or_zero(response.h) == 0.0 && or_zero(response.l) == 0.0 {
            return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
        }

        Ok(map_quote(symbol, &response))
    }

    async fn profile(&self, symbol: &str) -> Result<CompanyProfile, MarketDataError> {
        let params = [("symbol", symbol)];
        let text = self.fetch("/stock/profile2", &params).await?;

        // Unknown symbols come back as an empty object.
        if text.trim() == "{}" {
            return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
        }

        let response: ProfileResponse = self.parse(&text)?;

        if response.name.is_none() && response.ticker.is_none() {
            return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
        }

        Ok(map_profile(symbol, response))
    }

    async fn daily_series(&self, symbol: &str) -> Result<Vec<HistoricalPoint>, MarketDataError> {
        let to = Utc::now().timestamp();
        let from = to - SERIES_WINDOW_DAYS * 86_400;
        let from_s = from.to_string();
        let to_s = to.to_string();

        let params = [
            ("symbol", symbol),
            ("resolution", "D"),
            ("from", from_s.as_str()),
            ("to", to_s.as_str()),
        ];
        let text = self.fetch("/stock/candle", &params).await?;
        let response: CandleResponse = self.parse(&text)?;

        if response.s != "ok" {
            return Err(MarketDataError::MalformedResponse {
                provider: PROVIDER_ID.to_string(),
                message: format!("candle status {:?} for {}", response.s, symbol),
            });
        }

        let mut points = Vec::with_capacity(response.t.len());
        for (i, ts) in response.t.iter().enumerate() {
            let date = match DateTime::from_timestamp(*ts, 0) {
                Some(dt) => dt.date_naive(),
                None => {
                    warn!("Invalid candle timestamp at index {}: {}", i, ts);
                    continue;
                }
            };
            let close = match response.c.get(i) {
                Some(&c) => c,
                None => continue,
            };
            points.push(HistoricalPoint::new(date, close));
        }

        // Ordering contract: oldest to newest, independent of how the
        // provider ordered the candles.
        points.sort_by_key(|p| p.date);
        if points.len() > SERIES_WINDOW_DAYS as usize {
            let skip = points.len() - SERIES_WINDOW_DAYS as usize;
            points.drain(..skip);
        }

        debug!("Finnhub: {} candle points for {}", points.len(), symbol);
        Ok(points)
    }

    async fn news(&self, category: NewsCategory) -> Result<Vec<NewsArticle>, MarketDataError> {
        let params = [("category", category.as_str())];
        let text = self.fetch("/news", &params).await?;
        let items: Vec<NewsItem> = self.parse(&text)?;

        let mut articles: Vec<NewsArticle> = items.into_iter().map(map_news_item).collect();
        // Most recent first, regardless of provider ordering.
        articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        debug!(
            "Finnhub: {} news articles for category {}",
            articles.len(),
            category.as_str()
        );
        Ok(articles)
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError> {
        let params = [("q", query)];
        let text = self.fetch("/search", &params).await?;
        let response: SearchResponse = self.parse(&text)?;

        Ok(response
            .result
            .into_iter()
            .map(|item| SearchResult::new(item.symbol, item.description, item.security_type, ""))
            .collect())
    }
}

// ============================================================================
// Mapping helpers
// ============================================================================

/// Map a raw quote response into the canonical record. Missing numeric
/// fields normalize to 0.0; `is_positive` is derived, never taken from
/// the provider.
fn map_quote(symbol: &str, response: &QuoteResponse) -> StockQuote {
    StockQuote::new(
        symbol,
        or_zero(response.c),
        or_zero(response.d),
        or_zero(response.dp),
        or_zero(response.h),
        or_zero(response.l),
        or_zero(response.o),
        or_zero(response.pc),
    )
}

/// Map a raw profile response. Finnhub reports market capitalization in
/// millions; a missing industry stays empty rather than being invented.
fn map_profile(symbol: &str, response: ProfileResponse) -> CompanyProfile {
    CompanyProfile {
        symbol: symbol.to_uppercase(),
        name: response.name.unwrap_or_default(),
        market_cap: or_zero(response.market_capitalization) * 1_000_000.0,
        industry: response.finnhub_industry.unwrap_or_default(),
        website: response.weburl.unwrap_or_default(),
        logo_url: response.logo.unwrap_or_default(),
    }
}

fn map_news_item(item: NewsItem) -> NewsArticle {
    NewsArticle {
        id: item.id.to_string(),
        headline: item.headline,
        summary: item.summary,
        source: item.source,
        published_at: item.datetime,
        url: item.url,
        image_url: if item.image.is_empty() {
            None
        } else {
            Some(item.image)
        },
    }
}

// ============================================================================
// Tests
// ============================================================================
