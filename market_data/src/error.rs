use thiserror::Error;

/// Errors raised while fetching a price history.
#[derive(Debug, Error)]
pub enum DataError {
    /// The provider could not resolve the ticker.
    #[error("invalid symbol '{symbol}': {reason}")]
    InvalidSymbol { symbol: String, reason: String },

    /// The provider was unreachable or returned nothing usable.
    #[error("no data available for '{symbol}': {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("http client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl DataError {
    pub fn invalid_symbol(symbol: &str, reason: impl Into<String>) -> Self {
        DataError::InvalidSymbol {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }

    pub fn unavailable(symbol: &str, reason: impl Into<String>) -> Self {
        DataError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }
}
