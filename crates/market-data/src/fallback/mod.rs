//! Synthetic fallback data.
//!
//! When a provider call fails, the dashboard substitutes a plausible
//! placeholder instead of surfacing an error: a pseudo-random quote
//! for a symbol, a demo article set for news, a synthetic price series
//! for charts. Callers can always distinguish placeholders from live
//! data via [`crate::models::FetchOutcome`] and
//! [`crate::models::NewsFeed::demo_data`].

use chrono::{Days, NaiveDate};
use lazy_static::lazy_static;
use rand::Rng;
use std::collections::HashMap;

use crate::models::{HistoricalPoint, NewsArticle, StockOverview};

/// Sentinel shown for text fields that have no real value on a
/// synthetic record.
pub const NOT_AVAILABLE: &str = "N/A";

lazy_static! {
    /// Static display names for common large-cap symbols, used when a
    /// provider supplies no name.
    static ref COMPANY_NAMES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("AAPL", "Apple Inc.");
        m.insert("MSFT", "Microsoft Corp.");
        m.insert("GOOGL", "Alphabet Inc.");
        m.insert("AMZN", "Amazon.com");
        m.insert("META", "Meta Platforms");
        m.insert("NVDA", "NVIDIA Corp.");
        m.insert("TSLA", "Tesla Inc.");
        m.insert("AMD", "AMD Inc.");
        m.insert("JPM", "JPMorgan Chase");
        m.insert("V", "Visa Inc.");
        m.insert("MA", "Mastercard");
        m.insert("BAC", "Bank of America");
        m.insert("WMT", "Walmart Inc.");
        m.insert("KO", "Coca-Cola");
        m.insert("NKE", "Nike Inc.");
        m
    };
}

/// Resolve a display name: provider-supplied name, else the static
/// lookup table, else the raw symbol itself.
pub fn display_name(symbol: &str, provider_name: Option<&str>) -> String {
    if let Some(name) = provider_name {
        if !name.trim().is_empty() {
            return name.to_string();
        }
    }
    let canonical = symbol.to_uppercase();
    COMPANY_NAMES
        .get(canonical.as_str())
        .map(|n| n.to_string())
        .unwrap_or(canonical)
}

/// Generate a synthetic per-symbol record standing in for unavailable
/// provider data.
///
/// Price is drawn from [50, 550), absolute change from [-10, 10),
/// percent change from [-2.5, 2.5). `is_positive` is derived from the
/// synthetic percent, never drawn independently, so a record can't
/// show a gain badge on a losing percent. Extended fields are zeroed;
/// industry carries the [`NOT_AVAILABLE`] sentinel.
pub fn synthetic_overview(symbol: &str) -> StockOverview {
    let mut rng = rand::thread_rng();
    let change_percent: f64 = rng.gen_range(-2.5..2.5);

    StockOverview {
        symbol: symbol.to_uppercase(),
        name: display_name(symbol, None),
        current_price: rng.gen_range(50.0..550.0),
        change: rng.gen_range(-10.0..10.0),
        change_percent,
        is_positive: change_percent >= 0.0,
        day_high: 0.0,
        day_low: 0.0,
        day_open: 0.0,
        prev_close: 0.0,
        market_cap: 0.0,
        industry: NOT_AVAILABLE.to_string(),
        website: String::new(),
        logo_url: String::new(),
    }
}

/// Generate a synthetic 30-day close series for chart rendering when
/// no history is available: a 150.0 base with ±15% noise.
pub fn synthetic_series(today: NaiveDate) -> Vec<HistoricalPoint> {
    let mut rng = rand::thread_rng();
    let base = 150.0;

    (0..30u64)
        .map(|i| {
            let date = today - Days::new(30 - i);
            let close = base + rng.gen_range(-0.5..0.5) * base * 0.15;
            HistoricalPoint::new(date, close)
        })
        .collect()
}

/// The fixed demo article set substituted when the news provider fails
/// or returns nothing. Timestamps are computed relative to `now` so
/// the articles always read as recent.
pub fn demo_articles(now: i64) -> Vec<NewsArticle> {
    let fixtures: [(&str, &str, &str, &str, i64); 6] = [
        (
            "1",
            "Fed Signals Potential Rate Cuts in 2024",
            "Federal Reserve officials indicated they may begin cutting interest rates.",
            "Reuters",
            7_200,
        ),
        (
            "2",
            "Tech Giants Lead Market Rally",
            "Major technology companies saw significant gains.",
            "Bloomberg",
            14_400,
        ),
        (
            "3",
            "Apple Unveils New M4 MacBook Pro",
            "Apple announced its latest MacBook Pro lineup.",
            "CNBC",
            18_000,
        ),
        (
            "4",
            "Oil Prices Surge on Middle East Tensions",
            "Crude oil prices jumped over 3%.",
            "Financial Times",
            21_600,
        ),
        (
            "5",
            "Tesla Announces Record Q4 Deliveries",
            "Tesla reported record vehicle deliveries.",
            "MarketWatch",
            28_800,
        ),
        (
            "6",
            "Cryptocurrency Market Sees Renewed Interest",
            "Bitcoin rallied following new ETF approvals.",
            "CoinDesk",
            36_000,
        ),
    ];

    fixtures
        .into_iter()
        .map(|(id, headline, summary, source, age)| NewsArticle {
            id: id.to_string(),
            headline: headline.to_string(),
            summary: summary.to_string(),
            source: source.to_string(),
            published_at: now - age,
            url: "#".to_string(),
            image_url: None,
        })
        .collect()
}
