//! Search result and exchange rate models.

use serde::{Deserialize, Serialize};

/// Result from a ticker/symbol search.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Symbol/ticker (e.g., "AAPL")
    pub symbol: String,

    /// Display name (e.g., "Apple Inc")
    pub name: String,

    /// Security type (e.g., "Equity", "Common Stock")
    pub security_type: String,

    /// Region or exchange hint (e.g., "United States")
    pub region: String,

    /// Trading currency, when the provider reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl SearchResult {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        security_type: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            security_type: security_type.into(),
            region: region.into(),
            currency: None,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

/// Spot exchange rate for a crypto asset against a fiat market.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoRate {
    /// Source currency code (e.g., "BTC")
    pub from: String,

    /// Target currency code (e.g., "USD")
    pub to: String,

    /// Exchange rate (units of `to` per one `from`)
    pub rate: f64,

    /// Provider-reported last refresh time (provider-formatted string)
    pub last_refreshed: String,
}
