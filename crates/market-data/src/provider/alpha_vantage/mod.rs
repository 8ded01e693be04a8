//! Alpha Vantage market data provider implementation.
//!
//! This module provides market data from Alpha Vantage API:
//! - Real-time quotes via GLOBAL_QUOTE
//! - Daily price history via TIME_SERIES_DAILY
//! - Symbol search via SYMBOL_SEARCH
//! - Crypto exchange rates via CURRENCY_EXCHANGE_RATE
//!
//! All numeric values arrive as strings under verbose, numerically
//! prefixed keys ("05. price", "10. change percent"); the typed serde
//! structs below pin those names down at compile time. Free tier is
//! limited to 25 API calls per day.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{CryptoRate, HistoricalPoint, SearchResult, StockQuote};
use crate::normalize::{parse_or_zero, parse_percent};
use crate::provider::MarketDataProvider;

const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER_ID: &str = "ALPHA_VANTAGE";

/// Most recent trading days kept from a daily history response.
const SERIES_WINDOW: usize = 30;

// ============================================================================
// Response structures for Alpha Vantage API
// ============================================================================

/// GLOBAL_QUOTE response
#[derive(Debug, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GlobalQuote {
    #[serde(rename = "01. symbol")]
    symbol: String,
    #[serde(rename = "02. open")]
    open: String,
    #[serde(rename = "03. high")]
    high: String,
    #[serde(rename = "04. low")]
    low: String,
    #[serde(rename = "05. price")]
    price: String,
    #[serde(rename = "08. previous close")]
    previous_close: String,
    #[serde(rename = "09. change")]
    change: String,
    #[serde(rename = "10. change percent")]
    change_percent: String,
}

/// TIME_SERIES_DAILY response
#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<HashMap<String, DailyQuote>>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DailyQuote {
    #[serde(rename = "4. close")]
    close: String,
}

/// SYMBOL_SEARCH response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "bestMatches")]
    best_matches: Option<Vec<SearchMatch>>,
}

#[derive(Debug, Deserialize)]
struct SearchMatch {
    #[serde(rename = "1. symbol")]
    symbol: String,
    #[serde(rename = "2. name")]
    name: String,
    #[serde(rename = "3. type")]
    security_type: String,
    #[serde(rename = "4. region")]
    region: String,
    #[serde(rename = "8. currency")]
    currency: String,
}

/// CURRENCY_EXCHANGE_RATE response
#[derive(Debug, Deserialize)]
struct ExchangeRateResponse {
    #[serde(rename = "Realtime Currency Exchange Rate")]
    rate: Option<ExchangeRate>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExchangeRate {
    #[serde(rename = "1. From_Currency Code")]
    from_code: String,
    #[serde(rename = "3. To_Currency Code")]
    to_code: String,
    #[serde(rename = "5. Exchange Rate")]
    rate: String,
    #[serde(rename = "6. Last Refreshed")]
    last_refreshed: String,
}

// ============================================================================
// AlphaVantageProvider
// ============================================================================

/// Alpha Vantage market data provider.
pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
}

impl AlphaVantageProvider {
    /// Create a new Alpha Vantage provider with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: api_key.into(),
        }
    }

    /// Make a GET request against the single query endpoint.
    async fn fetch(&self, params: &[(&str, &str)]) -> Result<String, MarketDataError> {
        let mut request = self.client.get(BASE_URL).query(&[("apikey", &self.api_key)]);
        for (key, value) in params {
            request = request.query(&[(key, value)]);
        }

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
        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
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

    /// Alpha Vantage reports rate limiting and errors in-band with a
    /// 200 status; map those payload keys to proper errors.
    fn check_payload_errors(
        &self,
        note: Option<String>,
        error_message: Option<String>,
        information: Option<String>,
    ) -> Result<(), MarketDataError> {
        if let Some(note) = note {
            warn!("Alpha Vantage note: {}", note);
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if let Some(info) = information {
            // The free-tier daily cap arrives under "Information".
            warn!("Alpha Vantage information: {}", info);
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if let Some(error) = error_message {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: error,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl MarketDataProvider for AlphaVantageProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn quote(&self, symbol: &str) -> Result<StockQuote, MarketDataError> {
        let params = [("function", "GLOBAL_QUOTE"), ("symbol", symbol)];
        let text = self.fetch(&params).await?;
        let response: GlobalQuoteResponse = self.parse(&text)?;

        self.check_payload_errors(response.note, response.error_message, response.information)?;

        let quote = response
            .global_quote
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        Ok(map_global_quote(&quote))
    }

    async fn daily_series(&self, symbol: &str) -> Result<Vec<HistoricalPoint>, MarketDataError> {
        let params = [
            ("function", "TIME_SERIES_DAILY"),
            ("symbol", symbol),
            ("outputsize", "compact"),
        ];
        let text = self.fetch(&params).await?;
        let response: TimeSeriesResponse = self.parse(&text)?;

        self.check_payload_errors(response.note, response.error_message, response.information)?;

        let series = response
            .time_series
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        let points = map_time_series(series);
        debug!("Alpha Vantage: {} series points for {}", points.len(), symbol);
        Ok(points)
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError> {
        let encoded = urlencoding::encode(query);
        let params = [("function", "SYMBOL_SEARCH"), ("keywords", encoded.as_ref())];
        let text = self.fetch(&params).await?;
        let response: SearchResponse = self.parse(&text)?;

        Ok(response
            .best_matches
            .unwrap_or_default()
            .into_iter()
            .map(|m| {
                SearchResult::new(m.symbol, m.name, m.security_type, m.region)
                    .with_currency(m.currency)
            })
            .collect())
    }

    async fn crypto_rate(&self, crypto: &str, market: &str) -> Result<CryptoRate, MarketDataError> {
        let params = [
            ("function", "CURRENCY_EXCHANGE_RATE"),
            ("from_currency", crypto),
            ("to_currency", market),
        ];
        let text = self.fetch(&params).await?;
        let response: ExchangeRateResponse = self.parse(&text)?;

        self.check_payload_errors(response.note, response.error_message, None)?;

        let rate = response
            .rate
            .ok_or_else(|| MarketDataError::SymbolNotFound(crypto.to_string()))?;

        Ok(CryptoRate {
            from: rate.from_code,
            to: rate.to_code,
            rate: parse_or_zero(&rate.rate),
            last_refreshed: rate.last_refreshed,
        })
    }
}

// ============================================================================
// Mapping helpers
// ============================================================================

/// Map a GLOBAL_QUOTE payload into the canonical record. Every value
/// is a string; unparseable ones normalize to 0.0 and the percent
/// field carries a trailing `%` that must be stripped.
fn map_global_quote(quote: &GlobalQuote) -> StockQuote {
    let price = parse_or_zero(&quote.price);
    let change = parse_or_zero(&quote.change);
    let change_percent = parse_percent(&quote.change_percent);

    StockQuote::new(
        &quote.symbol,
        price,
        change,
        change_percent,
        parse_or_zero(&quote.high),
        parse_or_zero(&quote.low),
        parse_or_zero(&quote.open),
        parse_or_zero(&quote.previous_close),
    )
}

/// Reduce a full daily history map to the most recent 30 trading days,
/// ordered oldest to newest.
fn map_time_series(series: HashMap<String, DailyQuote>) -> Vec<HistoricalPoint> {
    let mut dated: Vec<(NaiveDate, f64)> = series
        .into_iter()
        .filter_map(|(date_str, daily)| {
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").ok()?;
            Some((date, parse_or_zero(&daily.close)))
        })
        .collect();

    // Newest first, keep the window, then flip to chart order.
    dated.sort_by(|a, b| b.0.cmp(&a.0));
    dated.truncate(SERIES_WINDOW);
    dated.reverse();

    dated
        .into_iter()
        .map(|(date, close)| HistoricalPoint::new(date, close))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_global_quote() -> GlobalQuote {
        let json = r#"{
            "01. symbol": "ibm",
            "02. open": "171.75",
            "03. high": "173.08",
            "04. low": "171.58",
            "05. price": "172.57",
            "06. volume": "4631055",
            "07. latest trading day": "2024-03-04",
            "08. previous close": "171.83",
            "09. change": "0.74",
            "10. change percent": "0.4307%"
        }"#;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_global_quote_mapping() {
        let quote = map_global_quote(&sample_global_quote());

        assert_eq!(quote.symbol, "IBM");
        assert_eq!(quote.current_price, 172.57);
        assert_eq!(quote.change, 0.74);
        // Trailing '%' stripped before parsing.
        assert_eq!(quote.change_percent, 0.4307);
        assert_eq!(quote.prev_close, 171.83);
        assert!(quote.is_positive);
    }

    #[test]
    fn test_global_quote_negative_percent() {
        let mut quote = sample_global_quote();
        quote.change = "-1.45".to_string();
        quote.change_percent = "-0.8452%".to_string();

        let mapped = map_global_quote(&quote);
        assert_eq!(mapped.change_percent, -0.8452);
        assert!(!mapped.is_positive);
        assert_eq!(mapped.is_positive, mapped.change_percent >= 0.0);
    }

    #[test]
    fn test_global_quote_garbage_numbers_normalize_to_zero() {
        let mut quote = sample_global_quote();
        quote.price = "--".to_string();
        quote.high = String::new();

        let mapped = map_global_quote(&quote);
        assert_eq!(mapped.current_price, 0.0);
        assert_eq!(mapped.day_high, 0.0);
        assert!(!mapped.current_price.is_nan());
    }

    #[test]
    fn test_time_series_window_and_order() {
        let mut series = HashMap::new();
        // 40 consecutive days; only the newest 30 should survive.
        for day in 1..=40u32 {
            let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(day as u64);
            series.insert(
                date.format("%Y-%m-%d").to_string(),
                DailyQuote {
                    close: format!("{}.0", 100 + day),
                },
            );
        }

        let points = map_time_series(series);
        assert_eq!(points.len(), 30);
        // Oldest to newest.
        assert!(points.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(points.last().unwrap().close, 140.0);
        assert_eq!(points.first().unwrap().close, 111.0);
    }

    #[test]
    fn test_time_series_skips_invalid_dates() {
        let mut series = HashMap::new();
        series.insert(
            "2024-03-04".to_string(),
            DailyQuote {
                close: "150.0".to_string(),
            },
        );
        series.insert(
            "not-a-date".to_string(),
            DailyQuote {
                close: "1.0".to_string(),
            },
        );

        let points = map_time_series(series);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].close, 150.0);
    }

    #[test]
    fn test_search_match_parsing() {
        let json = r#"{
            "bestMatches": [
                {
                    "1. symbol": "TSCO.LON",
                    "2. name": "Tesco PLC",
                    "3. type": "Equity",
                    "4. region": "United Kingdom",
                    "5. marketOpen": "08:00",
                    "6. marketClose": "16:30",
                    "7. timezone": "UTC+01",
                    "8. currency": "GBX",
                    "9. matchScore": "0.7273"
                }
            ]
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        let matches = response.best_matches.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].symbol, "TSCO.LON");
        assert_eq!(matches[0].currency, "GBX");
    }

    #[test]
    fn test_exchange_rate_parsing() {
        let json = r#"{
            "Realtime Currency Exchange Rate": {
                "1. From_Currency Code": "BTC",
                "2. From_Currency Name": "Bitcoin",
                "3. To_Currency Code": "USD",
                "4. To_Currency Name": "United States Dollar",
                "5. Exchange Rate": "97234.51000000",
                "6. Last Refreshed": "2024-03-04 16:59:59",
                "7. Time Zone": "UTC"
            }
        }"#;

        let response: ExchangeRateResponse = serde_json::from_str(json).unwrap();
        let rate = response.rate.unwrap();
        assert_eq!(rate.from_code, "BTC");
        assert_eq!(parse_or_zero(&rate.rate), 97234.51);
    }

    #[tokio::test]
    #[ignore] // Requires API key
    async fn test_fetch_quote_live() {
        let api_key = std::env::var("ALPHAVANTAGE_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            return;
        }

        let provider = AlphaVantageProvider::new(api_key);
        let quote = provider.quote("AAPL").await.unwrap();
        assert!(quote.current_price > 0.0);
    }
}
