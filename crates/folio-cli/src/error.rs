//! Error types for the folio CLI.

use folio_core::TickerError;
use folio_yaml::ParseError;
use std::io;
use thiserror::Error;

/// Errors from the `folio` commands.
#[derive(Debug, Error)]
pub(crate) enum ServeError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Ticker(#[from] TickerError),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_message_names_address() {
        let err = ServeError::Bind {
            addr: "127.0.0.1:80".to_string(),
            source: "permission denied".into(),
        };
        assert_eq!(err.to_string(), "failed to bind 127.0.0.1:80: permission denied");
    }

    #[test]
    fn test_ticker_error_is_transparent() {
        let err: ServeError = TickerError::ZeroInterval.into();
        assert_eq!(err.to_string(), "tick interval must be greater than zero");
    }

    #[test]
    fn test_parse_error_converts() {
        let err: ServeError = ParseError::MissingField("name".to_string()).into();
        assert!(matches!(err, ServeError::Parse(_)));
    }
}
