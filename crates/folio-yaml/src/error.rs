//! Error types for manifest and config parsing.

use std::path::PathBuf;
use thiserror::Error;

/// Error loading a site manifest or config file.
#[derive(Debug, Error)]
pub enum ParseError {
    /// YAML syntax or schema error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// File could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Missing required field.
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Field present but unusable.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ParseError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::MissingField("name".to_string());
        assert_eq!(err.to_string(), "Missing required field: name");

        let err = ParseError::invalid("refresh_ms", "must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'refresh_ms': must be positive"
        );
    }

    #[test]
    fn test_io_error_mentions_path() {
        let err = ParseError::Io {
            path: PathBuf::from("/nope/site.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/nope/site.yaml"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_yaml_error_from() {
        let yaml_err = serde_yaml_ng::from_str::<u32>("[").unwrap_err();
        let err: ParseError = yaml_err.into();
        assert!(err.to_string().starts_with("YAML error"));
    }
}
