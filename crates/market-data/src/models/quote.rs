use serde::{Deserialize, Serialize};

/// Normalized real-time quote for a single symbol.
///
/// Constructed fresh on every fetch and replaced wholesale on refetch;
/// numeric fields that the provider omitted are `0.0`, never `NaN`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuote {
    /// Canonical uppercase symbol (e.g., "AAPL")
    pub symbol: String,

    /// Current/last traded price (>= 0, 0.0 if unknown)
    pub current_price: f64,

    /// Absolute change since previous close (signed)
    pub change: f64,

    /// Percent change since previous close (signed)
    pub change_percent: f64,

    /// High price of the day (0.0 if unknown)
    pub day_high: f64,

    /// Low price of the day (0.0 if unknown)
    pub day_low: f64,

    /// Open price of the day (0.0 if unknown)
    pub day_open: f64,

    /// Previous close price (0.0 if unknown)
    pub prev_close: f64,

    /// Always derived as `change_percent >= 0`; providers do not
    /// supply this flag uniformly so it is never taken from them.
    pub is_positive: bool,
}

impl StockQuote {
    /// Build a quote, canonicalizing the symbol and deriving
    /// `is_positive` from the percent change.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: &str,
        current_price: f64,
        change: f64,
        change_percent: f64,
        day_high: f64,
        day_low: f64,
        day_open: f64,
        prev_close: f64,
    ) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            current_price,
            change,
            change_percent,
            day_high,
            day_low,
            day_open,
            prev_close,
            is_positive: change_percent >= 0.0,
        }
    }
}

/// Combined quote + profile record for one symbol: what a dashboard
/// card renders.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockOverview {
    pub symbol: String,
    /// Display name: provider name, else static lookup, else the symbol
    pub name: String,
    pub current_price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub is_positive: bool,
    pub day_high: f64,
    pub day_low: f64,
    pub day_open: f64,
    pub prev_close: f64,
    /// Market capitalization in absolute units (0.0 if unknown)
    pub market_cap: f64,
    /// Empty when the provider omitted it; "N/A" only on synthetic records
    pub industry: String,
    pub website: String,
    pub logo_url: String,
}

/// Result of a per-symbol fetch.
///
/// The per-symbol fetch never fails: either both provider calls
/// succeeded (`Sourced`) or a synthetic placeholder was generated
/// (`Fallback`). Call sites are forced to acknowledge both branches
/// instead of relying on implicit catch blocks.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "status", content = "stock", rename_all = "camelCase")]
pub enum FetchOutcome {
    /// Values came from a live provider call
    Sourced(StockOverview),
    /// Locally generated placeholder standing in for unavailable data
    Fallback(StockOverview),
}

impl FetchOutcome {
    /// Whether this record was sourced from a live provider call.
    pub fn is_sourced(&self) -> bool {
        matches!(self, Self::Sourced(_))
    }

    /// The overview record, regardless of origin.
    pub fn overview(&self) -> &StockOverview {
        match self {
            Self::Sourced(o) | Self::Fallback(o) => o,
        }
    }

    /// Consume the outcome, returning the overview record.
    pub fn into_overview(self) -> StockOverview {
        match self {
            Self::Sourced(o) | Self::Fallback(o) => o,
        }
    }
}
