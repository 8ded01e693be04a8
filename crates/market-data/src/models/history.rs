use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single day in a price history series.
///
/// Series are ordered oldest to newest and, when sourced from a full
/// daily history response, capped to the most recent 30 trading days.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalPoint {
    /// Calendar day of the close
    pub date: NaiveDate,

    /// Closing price for the day
    pub close: f64,
}

impl HistoricalPoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }

    /// Short display label for chart axes, e.g. "Mar 4".
    pub fn label(&self) -> String {
        self.date.format("%b %-d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_short_form() {
        let point = HistoricalPoint::new(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(), 150.25);
        assert_eq!(point.label(), "Mar 4");

        let point = HistoricalPoint::new(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(), 99.0);
        assert_eq!(point.label(), "Dec 31");
    }
}
