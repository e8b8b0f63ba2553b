//! Error types for the account state library.
//!
//! Reading and writing observable state never fails. Errors come from the
//! edges: decoding keystore records, editing the account registry, and
//! loading configuration.

use thiserror::Error;

/// The main error type for account state operations.
#[derive(Error, Debug)]
pub enum AccountStateError {
    /// Account name rejected by the registry
    #[error("Invalid account: {0}")]
    InvalidAccountError(String),

    /// Configuration file could not be read
    #[error("Storage I/O error: {0}")]
    StorageError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A field could not be viewed in the requested encoding
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Resource already exists
    #[error("Already exists: {0}")]
    AlreadyExistsError(String),
}

/// A specialized Result type for account state operations.
pub type Result<T> = std::result::Result<T, AccountStateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AccountStateError::NotFoundError("alice".to_string());
        assert_eq!(err.to_string(), "Not found: alice");

        let err = AccountStateError::AlreadyExistsError("bob".to_string());
        assert_eq!(err.to_string(), "Already exists: bob");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AccountStateError>();
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: AccountStateError = json_err.into();
        assert!(matches!(err, AccountStateError::JsonError(_)));
        assert!(err.to_string().starts_with("JSON error:"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AccountStateError = io_err.into();
        assert!(matches!(err, AccountStateError::StorageError(_)));
    }
}
