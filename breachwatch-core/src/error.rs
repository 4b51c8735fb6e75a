//! Error types for BreachWatch.
//!
//! This module provides the error hierarchy using `thiserror`. The cache has
//! no error kind of its own: its operations are total.

use thiserror::Error;

/// Result type alias using `BreachError`.
pub type Result<T> = std::result::Result<T, BreachError>;

/// Main error type for all BreachWatch operations.
#[derive(Debug, Error)]
pub enum BreachError {
    // ═══════════════════════════════════════════════════════════════════════════
    // LOOKUP ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Input failed normalization or the email shape check.
    ///
    /// Never reaches the cache or the store.
    #[error("Malformed input: not a valid email address")]
    MalformedInput,

    /// The authoritative store could not answer.
    ///
    /// The cache is left untouched when this is returned.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Invalid opaque key encoding.
    #[error("Invalid email hash: {0}")]
    InvalidHash(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // STORAGE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Database driver or schema error.
    #[error("Database error: {0}")]
    Database(String),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION & CONFIG ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid hex encoding.
    #[error("Invalid hex encoding: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BreachError {
    /// Returns true if the failure came from the backing store.
    ///
    /// Callers surface these as server-side failures rather than bad input.
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            BreachError::StoreUnavailable(_) | BreachError::Database(_) | BreachError::Io(_)
        )
    }

    /// Returns true if the caller sent input that can never succeed.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            BreachError::MalformedInput | BreachError::InvalidHash(_) | BreachError::Hex(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BreachError::StoreUnavailable("connection refused".into());
        assert!(err.to_string().contains("connection refused"));
        assert!(BreachError::MalformedInput.to_string().contains("email"));
    }

    #[test]
    fn test_error_classification() {
        assert!(BreachError::StoreUnavailable("x".into()).is_store_error());
        assert!(BreachError::Database("x".into()).is_store_error());
        assert!(!BreachError::MalformedInput.is_store_error());

        assert!(BreachError::MalformedInput.is_input_error());
        assert!(BreachError::InvalidHash("x".into()).is_input_error());
        assert!(!BreachError::Config("x".into()).is_input_error());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_result: std::result::Result<serde_json::Value, _> = serde_json::from_str("invalid");
        let result: Result<serde_json::Value> = json_result.map_err(BreachError::from);
        assert!(matches!(result, Err(BreachError::Serialization(_))));
    }
}
