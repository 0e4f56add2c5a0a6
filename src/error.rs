// src/error.rs

//! Unified error handling for the availability watcher.

use std::fmt;

use thiserror::Error;

/// Result type alias for watcher operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catalog fetch or parse failed
    #[error("Catalog error for {endpoint}: {message}")]
    Catalog { endpoint: String, message: String },

    /// Messaging API rejected a request
    #[error("Messaging error: {0}")]
    Messaging(String),

    /// Venue discovery error
    #[error("Discovery error: {0}")]
    Discovery(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a catalog error with the endpoint as context.
    pub fn catalog(endpoint: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Catalog {
            endpoint: endpoint.into(),
            message: message.to_string(),
        }
    }

    /// Create a messaging error.
    pub fn messaging(message: impl Into<String>) -> Self {
        Self::Messaging(message.into())
    }

    /// Create a discovery error.
    pub fn discovery(message: impl Into<String>) -> Self {
        Self::Discovery(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = AppError::catalog("https://example.com/items", "bad gateway");
        assert_eq!(
            err.to_string(),
            "Catalog error for https://example.com/items: bad gateway"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: std::result::Result<Vec<u32>, _> = serde_json::from_str("{");
        let err: AppError = parse.unwrap_err().into();
        assert!(matches!(err, AppError::Json(_)));
    }
}
