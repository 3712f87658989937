//! Error types for the guardrail engine.
//!
//! Two families live here. [`Error`] covers the collaborators around the
//! decision pipeline (document loading, configuration, output writing) and is
//! propagated with `?`. [`Rejection`] describes why a single raw policy or
//! input record was dropped during normalization; it is logged and never
//! propagated.

use thiserror::Error;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the guardrail engine.
#[derive(Error, Debug)]
pub enum Error {
    /// A document had the wrong top-level shape
    #[error("Parse error: {message}")]
    Parse {
        /// Detailed error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Detailed error message
        message: String,
        /// Configuration key that caused the error
        key: Option<String>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Internal error (unexpected condition)
    #[error("Internal error: {message}")]
    Internal {
        /// Detailed error message
        message: String,
    },
}

impl Error {
    /// Create a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Error::Parse {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: None,
        }
    }

    /// Create a configuration error with key context.
    pub fn config_key(message: impl Into<String>, key: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }

    /// Get the error category for logging.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Parse { .. } => "parse",
            Error::Config { .. } => "config",
            Error::Io(_) => "io",
            Error::Serialization(_) => "serialization",
            Error::Yaml(_) => "yaml",
            Error::Internal { .. } => "internal",
        }
    }
}

impl From<::config::ConfigError> for Error {
    fn from(err: ::config::ConfigError) -> Self {
        Error::config(err.to_string())
    }
}

/// Reason a raw policy or input record was dropped during normalization.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    /// The record is not a key/value object
    #[error("entry is not an object")]
    NotAnObject,

    /// A required string field is absent, empty or not a string
    #[error("missing or invalid '{field}'")]
    MissingField {
        /// Name of the offending field
        field: &'static str,
    },

    /// `allowed_actions` is absent, not a list, or empty
    #[error("'allowed_actions' must be a non-empty list")]
    NoActions,

    /// `allowed_actions` holds a value outside the known action set
    #[error("'allowed_actions' contains unknown action {value}")]
    UnknownAction {
        /// The offending value, rendered as JSON
        value: String,
    },

    /// A score field cannot be read as a number
    #[error("'{field}' is not numeric: {value}")]
    NotNumeric {
        /// Name of the offending field
        field: &'static str,
        /// The offending value, rendered as JSON
        value: String,
    },

    /// A score field is outside [0.0, 1.0]
    #[error("'{field}' {value} is outside [0.0, 1.0]")]
    OutOfRange {
        /// Name of the offending field
        field: &'static str,
        /// The parsed value
        value: f64,
    },

    /// An optional text field is present but not a string
    #[error("'{field}' must be a string")]
    NotText {
        /// Name of the offending field
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::config_key("must not be empty", "output.block_message");
        assert!(matches!(err, Error::Config { key: Some(_), .. }));
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_error_display() {
        let err = Error::internal("logging already initialized");
        assert_eq!(err.to_string(), "Internal error: logging already initialized");

        let err = Error::parse("input document must be an array");
        assert_eq!(err.to_string(), "Parse error: input document must be an array");
        assert_eq!(err.category(), "parse");
    }

    #[test]
    fn test_rejection_display() {
        let rejection = Rejection::OutOfRange {
            field: "confidence",
            value: 1.5,
        };
        assert_eq!(rejection.to_string(), "'confidence' 1.5 is outside [0.0, 1.0]");

        let rejection = Rejection::UnknownAction {
            value: "\"deny\"".to_string(),
        };
        assert!(rejection.to_string().contains("\"deny\""));
    }
}
