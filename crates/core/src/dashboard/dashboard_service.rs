use std::sync::Arc;

use chrono::Utc;
use log::{debug, warn};

use stocksphere_market_data::fallback::synthetic_series;
use stocksphere_market_data::{
    CryptoRate, FetchOutcome, MarketDataProvider, NewsCategory, NewsFeed, NewsService,
    SearchResult, StockAggregator, StockOverview,
};

use crate::dashboard::constants::{INDEX_SYMBOLS, POPULAR_SYMBOLS};
use crate::dashboard::{StockDetails, TrendingCategory};
use crate::errors::{Result, ValidationError};
use crate::watchlist::{WatchlistEntry, WatchlistServiceTrait};

/// Orchestrates provider calls into page-shaped responses.
///
/// Quotes and profiles go through the aggregator over the quote
/// provider; price history, search, and news go to the reference
/// provider. Both are injected so pages and tests can swap either
/// side independently.
pub struct DashboardService {
    aggregator: StockAggregator,
    reference_provider: Arc<dyn MarketDataProvider>,
    news: NewsService,
    watchlist: Arc<dyn WatchlistServiceTrait>,
}

impl DashboardService {
    pub fn new(
        quote_provider: Arc<dyn MarketDataProvider>,
        reference_provider: Arc<dyn MarketDataProvider>,
        watchlist: Arc<dyn WatchlistServiceTrait>,
    ) -> Self {
        DashboardService {
            aggregator: StockAggregator::new(quote_provider.clone()),
            reference_provider,
            news: NewsService::new(quote_provider),
            watchlist,
        }
    }

    /// Quotes for one trending tab, in the tab's curated order.
    pub async fn trending(&self, category: TrendingCategory) -> Result<Vec<FetchOutcome>> {
        self.fetch_list(category.symbols()).await
    }

    /// The default landing-page grid.
    pub async fn popular(&self) -> Result<Vec<FetchOutcome>> {
        self.fetch_list(POPULAR_SYMBOLS).await
    }

    /// The four index-ETF proxies for the market-overview strip.
    pub async fn market_indices(&self) -> Result<Vec<FetchOutcome>> {
        self.fetch_list(INDEX_SYMBOLS).await
    }

    async fn fetch_list(&self, symbols: &[&str]) -> Result<Vec<FetchOutcome>> {
        let symbols: Vec<String> = symbols.iter().map(|s| s.to_string()).collect();
        Ok(self.aggregator.fetch_many(&symbols).await?)
    }

    /// Overview plus 30-day close series for the detail page.
    ///
    /// A failed or empty history fetch substitutes a synthetic series
    /// and clears `sourced_series`; only a malformed symbol is an
    /// error.
    pub async fn stock_details(&self, symbol: &str) -> Result<StockDetails> {
        let symbols = vec![symbol.to_string()];
        let mut outcomes = self.aggregator.fetch_many(&symbols).await?;
        // fetch_many returns exactly one outcome per input symbol.
        let overview = outcomes.remove(0);

        let (series, sourced_series) = match self.reference_provider.daily_series(symbol).await {
            Ok(series) if !series.is_empty() => (series, true),
            Ok(_) => {
                warn!("Empty price history for {}; rendering synthetic series", symbol);
                (synthetic_series(Utc::now().date_naive()), false)
            }
            Err(e) => {
                warn!(
                    "Price history fetch failed for {}: {}; rendering synthetic series",
                    symbol, e
                );
                (synthetic_series(Utc::now().date_naive()), false)
            }
        };

        Ok(StockDetails {
            overview,
            series,
            sourced_series,
        })
    }

    /// News feed for the news page; never fails.
    pub async fn market_news(&self, category: NewsCategory) -> NewsFeed {
        self.news.market_news(category).await
    }

    /// Symbol search against the reference provider.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ValidationError::InvalidInput("empty search query".to_string()).into());
        }
        debug!("Searching symbols for '{}'", query);
        Ok(self.reference_provider.search(query).await?)
    }

    /// Spot rate for a crypto asset from the reference provider.
    pub async fn crypto_rate(&self, crypto: &str, market: &str) -> Result<CryptoRate> {
        Ok(self.reference_provider.crypto_rate(crypto, market).await?)
    }

    /// Add or remove the stock from the watchlist. Returns whether it
    /// is on the watchlist afterwards.
    pub fn toggle_watchlist(&self, overview: &StockOverview) -> Result<bool> {
        self.watchlist.toggle(entry_from_overview(overview))
    }

    pub fn watchlist_entries(&self) -> Vec<WatchlistEntry> {
        self.watchlist.entries()
    }

    /// Re-fetch every watchlist symbol and persist the refreshed
    /// snapshots. Symbols whose fetch fell back keep plausible
    /// placeholder values rather than dropping off the list.
    pub async fn refresh_watchlist(&self) -> Result<Vec<WatchlistEntry>> {
        let symbols = self.watchlist.symbols();
        if symbols.is_empty() {
            return Ok(Vec::new());
        }

        let outcomes = self.aggregator.fetch_many(&symbols).await?;
        let refreshed: Vec<WatchlistEntry> = outcomes
            .iter()
            .map(|o| entry_from_overview(o.overview()))
            .collect();
        self.watchlist.update_snapshots(&refreshed)?;
        Ok(self.watchlist.entries())
    }
}

fn entry_from_overview(overview: &StockOverview) -> WatchlistEntry {
    WatchlistEntry {
        symbol: overview.symbol.clone(),
        name: overview.name.clone(),
        last_price: overview.current_price,
        last_change_percent: overview.change_percent,
        is_positive: overview.is_positive,
    }
}
