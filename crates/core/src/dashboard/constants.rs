//! Curated symbol lists for the dashboard landing page.

/// Trending tab: technology names.
pub const TECH_SYMBOLS: &[&str] = &[
    "AAPL", "MSFT", "GOOGL", "AMZN", "META", "NVDA", "TSLA", "AMD",
];

/// Trending tab: financials.
pub const FINANCE_SYMBOLS: &[&str] = &["JPM", "V", "MA", "BAC"];

/// Trending tab: consumer names.
pub const CONSUMER_SYMBOLS: &[&str] = &["WMT", "KO", "NKE"];

/// The default landing-page grid.
pub const POPULAR_SYMBOLS: &[&str] = &[
    "AAPL", "MSFT", "GOOGL", "AMZN", "META", "NVDA", "TSLA", "AMD", "JPM", "V", "WMT", "KO",
];

/// ETF proxies for the market-overview strip.
pub const INDEX_SYMBOLS: &[&str] = &["SPY", "QQQ", "DIA", "IWM"];
