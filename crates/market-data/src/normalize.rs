//! Numeric normalization helpers shared by the provider adapters.
//!
//! Providers report prices inconsistently: Finnhub uses optional JSON
//! numbers, Alpha Vantage uses strings (sometimes with a trailing `%`).
//! The dashboard contract is that a missing, null, or unparseable
//! numeric field normalizes to `0.0` and lets the caller decide how to
//! display "unknown". This layer never raises for a bad number and
//! never produces `NaN`.

/// Parse a provider-supplied numeric string, normalizing absent or
/// unparseable values to `0.0`.
pub fn parse_or_zero(raw: &str) -> f64 {
    let value: f64 = raw.trim().parse().unwrap_or(0.0);
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Parse a percent-change string, stripping a trailing `%` if present.
///
/// `"1.25%"` parses to `1.25`.
pub fn parse_percent(raw: &str) -> f64 {
    parse_or_zero(raw.trim().trim_end_matches('%'))
}

/// Normalize an optional provider float to a concrete value.
pub fn or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}
