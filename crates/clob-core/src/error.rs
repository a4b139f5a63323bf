//! Error types for CLOB order signing and request authentication.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] config::ConfigError),

    /// Malformed or inconsistent configuration, detected before any signing.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A credential tier required by the request is not configured.
    #[error("Missing credentials: {message}")]
    MissingCredentials { message: String },

    #[error("Invalid typed data: {message}")]
    InvalidTypedData { message: String },

    #[error("Signing error: {message}")]
    Signing { message: String },

    /// The caller supplied an order request that cannot be sized or signed.
    #[error("Invalid order: {message}")]
    InvalidOrder { message: String },

    /// A fill-or-kill market order cannot be filled by the visible book.
    #[error("Can not fill: {message}")]
    CannotFill { message: String },

    #[error("Order book has no {side} liquidity")]
    EmptyBook { side: &'static str },

    #[error("API error: {message}")]
    Api { message: String, status: Option<u16> },

    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Every order of a batch failed; the individual failures are kept.
    #[error("All {} orders failed", failures.len())]
    AllOrdersFailed { failures: Vec<Error> },
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    pub fn invalid_order(message: impl Into<String>) -> Self {
        Error::InvalidOrder {
            message: message.into(),
        }
    }

    /// Whether the error belongs to the liquidity category.
    pub fn is_liquidity(&self) -> bool {
        matches!(self, Error::CannotFill { .. } | Error::EmptyBook { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_orders_failed_message() {
        let err = Error::AllOrdersFailed {
            failures: vec![
                Error::invalid_order("missing price"),
                Error::CannotFill {
                    message: "FOK".to_string(),
                },
            ],
        };
        assert_eq!(err.to_string(), "All 2 orders failed");
    }

    #[test]
    fn test_liquidity_category() {
        assert!(Error::EmptyBook { side: "ask" }.is_liquidity());
        assert!(!Error::config("bad").is_liquidity());
    }
}
