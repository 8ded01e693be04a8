//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur during market data operations.
///
/// Per-symbol and per-category failures are absorbed by the fallback
/// layer (see [`crate::aggregator`] and [`crate::news`]); these errors
/// surface to callers only from direct provider calls and from
/// aggregate-level input validation.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider does not support the requested operation.
    #[error("Operation '{operation}' not supported by provider {provider}")]
    NotSupported {
        /// The unsupported operation (e.g., "profile", "news")
        operation: String,
        /// The provider that does not support it
        provider: String,
    },

    /// The provider rate limited the request (HTTP 429 or an in-band
    /// rate-limit note in the payload).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred (non-success HTTP status or
    /// an in-band error message).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider returned a success status but an unexpected or
    /// empty payload shape. Treated identically to a transport failure
    /// by the fallback layer.
    #[error("Malformed response from {provider}: {message}")]
    MalformedResponse {
        /// The provider that returned the payload
        provider: String,
        /// What was wrong with the payload
        message: String,
    },

    /// A symbol in an aggregate request failed validation.
    /// This is an aggregate-level error: no partial result is produced.
    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),

    /// An aggregate request was made with an empty symbol list.
    #[error("Empty symbol list")]
    EmptySymbolList,

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Whether this error is recoverable by per-symbol fallback
    /// substitution. Aggregate-level input errors are not: they are
    /// surfaced to the caller before any fetch is issued.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::InvalidSymbol(_) | Self::EmptySymbolList
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors_are_recoverable() {
        let error = MarketDataError::Timeout {
            provider: "FINNHUB".to_string(),
        };
        assert!(error.is_recoverable());

        let error = MarketDataError::ProviderError {
            provider: "ALPHA_VANTAGE".to_string(),
            message: "Internal server error".to_string(),
        };
        assert!(error.is_recoverable());

        let error = MarketDataError::MalformedResponse {
            provider: "FINNHUB".to_string(),
            message: "empty profile".to_string(),
        };
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_input_errors_are_not_recoverable() {
        assert!(!MarketDataError::EmptySymbolList.is_recoverable());
        assert!(!MarketDataError::InvalidSymbol("A B".to_string()).is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::SymbolNotFound("INVALID".to_string());
        assert_eq!(format!("{}", error), "Symbol not found: INVALID");

        let error = MarketDataError::RateLimited {
            provider: "ALPHA_VANTAGE".to_string(),
        };
        assert_eq!(format!("{}", error), "Rate limited: ALPHA_VANTAGE");
    }
}
