//! Per-symbol fetch-with-fallback and ordered concurrent fan-out.
//!
//! The aggregator is the unit of partial failure for the dashboard:
//! one symbol's provider failure is absorbed locally by substituting a
//! synthetic record, and can never affect any other symbol's result or
//! fail the batch. The only aggregate-level failure is a malformed
//! symbol list, which is rejected before any request is issued.

use std::sync::Arc;

use futures::future::join_all;
use log::warn;

use crate::errors::MarketDataError;
use crate::fallback::{display_name, synthetic_overview};
use crate::models::{CompanyProfile, FetchOutcome, StockOverview, StockQuote};
use crate::provider::MarketDataProvider;

/// Fans out per-symbol fetches over an injected provider and collects
/// ordered results. Holds no per-call state: calling twice with the
/// same list produces two independent result sets, and concurrent
/// calls do not interfere.
pub struct StockAggregator {
    provider: Arc<dyn MarketDataProvider>,
}

impl StockAggregator {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    /// Fetch a best-effort quote + profile pair for one symbol.
    ///
    /// The quote and profile calls run concurrently. If both succeed
    /// the combined record is returned as `Sourced`; if either fails
    /// (transport, non-2xx, malformed payload) a synthetic record is
    /// returned as `Fallback`. This function never returns an error.
    pub async fn fetch_with_fallback(&self, symbol: &str) -> FetchOutcome {
        let (quote, profile) = tokio::join!(
            self.provider.quote(symbol),
            self.provider.profile(symbol)
        );

        match (quote, profile) {
            (Ok(quote), Ok(profile)) => {
                FetchOutcome::Sourced(combine(symbol, &quote, &profile))
            }
            (quote, profile) => {
                if let Err(e) = &quote {
                    warn!("Quote fetch failed for {}: {}; using fallback", symbol, e);
                }
                if let Err(e) = &profile {
                    warn!("Profile fetch failed for {}: {}; using fallback", symbol, e);
                }
                FetchOutcome::Fallback(synthetic_overview(symbol))
            }
        }
    }

    /// Fetch all symbols concurrently, returning results in input
    /// order with the same length as the input. Fallback entries are
    /// never dropped: the caller always renders the full requested
    /// set.
    ///
    /// The symbol list is validated up front; a malformed list is the
    /// only error this method returns, and it produces no partial
    /// result.
    pub async fn fetch_many(
        &self,
        symbols: &[String],
    ) -> Result<Vec<FetchOutcome>, MarketDataError> {
        validate_symbols(symbols)?;

        let fetches = symbols.iter().map(|symbol| self.fetch_with_fallback(symbol));
        Ok(join_all(fetches).await)
    }
}

/// Reject a symbol list that cannot be turned into requests: empty
/// lists, empty symbols, or symbols with characters outside the
/// ticker alphabet (ASCII alphanumeric, '.', '-').
fn validate_symbols(symbols: &[String]) -> Result<(), MarketDataError> {
    if symbols.is_empty() {
        return Err(MarketDataError::EmptySymbolList);
    }
    for symbol in symbols {
        let valid = !symbol.is_empty()
            && symbol
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
        if !valid {
            return Err(MarketDataError::InvalidSymbol(symbol.clone()));
        }
    }
    Ok(())
}

/// Combine a sourced quote and profile into the overview record,
/// applying the display-name resolution chain.
fn combine(symbol: &str, quote: &StockQuote, profile: &CompanyProfile) -> StockOverview {
    StockOverview {
        symbol: quote.symbol.clone(),
        name: display_name(symbol, Some(&profile.name)),
        current_price: quote.current_price,
        change: quote.change,
        change_percent: quote.change_percent,
        is_positive: quote.is_positive,
        day_high: quote.day_high,
        day_low: quote.day_low,
        day_open: quote.day_open,
        prev_close: quote.prev_close,
        market_cap: profile.market_cap,
        industry: profile.industry.clone(),
        website: profile.website.clone(),
        logo_url: profile.logo_url.clone(),
    }
}
