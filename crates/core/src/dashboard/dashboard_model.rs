use serde::{Deserialize, Serialize};

use stocksphere_market_data::{FetchOutcome, HistoricalPoint};

use crate::dashboard::constants::{CONSUMER_SYMBOLS, FINANCE_SYMBOLS, TECH_SYMBOLS};

/// Landing-page trending tabs.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrendingCategory {
    #[default]
    Tech,
    Finance,
    Consumer,
}

impl TrendingCategory {
    pub fn symbols(&self) -> &'static [&'static str] {
        match self {
            TrendingCategory::Tech => TECH_SYMBOLS,
            TrendingCategory::Finance => FINANCE_SYMBOLS,
            TrendingCategory::Consumer => CONSUMER_SYMBOLS,
        }
    }
}

/// Everything the stock detail page renders in one response.
///
/// `sourced_series` distinguishes a real price history from the
/// synthetic chart substituted when the history provider fails.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StockDetails {
    #[serde(flatten)]
    pub overview: FetchOutcome,
    pub series: Vec<HistoricalPoint>,
    pub sourced_series: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_symbol_lists_are_disjoint() {
        for symbol in TrendingCategory::Finance.symbols() {
            assert!(!TrendingCategory::Tech.symbols().contains(symbol));
            assert!(!TrendingCategory::Consumer.symbols().contains(symbol));
        }
    }

    #[test]
    fn test_category_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TrendingCategory::Consumer).unwrap(),
            "\"consumer\""
        );
    }
}
