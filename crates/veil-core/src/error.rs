//! Error types for Veil core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are raised where they occur and pass through every decorator
//! unchanged; the CLI layer maps them to exit codes and user-facing messages.

use thiserror::Error;

use crate::payload::PayloadKind;

/// Result type alias for Veil operations.
pub type Result<T> = std::result::Result<T, VeilError>;

/// Core error type for Veil operations.
#[derive(Debug, Error)]
pub enum VeilError {
    /// Bytes are not valid under the configured encoding, or text contains
    /// characters the encoding cannot represent
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Encoding name is not one of the supported encodings
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// Cipher key is empty or otherwise unusable
    #[error("Invalid cipher key: {0}")]
    InvalidKey(String),

    /// Read of a key that was never written
    #[error("No value stored for key: {0}")]
    AbsentValue(String),

    /// Payload variant does not match what the chain edge accepts
    #[error("Payload mismatch: expected {expected}, found {found}")]
    PayloadMismatch {
        expected: PayloadKind,
        found: PayloadKind,
    },

    /// Store was bound to a different encoding or cipher key
    #[error("Chain mismatch: {0}")]
    ChainMismatch(String),

    /// Store file not found
    #[error("Store file not found: {0}")]
    StoreNotFound(String),

    /// Store file is malformed or has an unknown format version
    #[error("Store format error: {0}")]
    Format(String),

    /// Storage backend error (generic)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_mismatch_message() {
        let err = VeilError::PayloadMismatch {
            expected: PayloadKind::Text,
            found: PayloadKind::Bytes,
        };
        assert_eq!(
            err.to_string(),
            "Payload mismatch: expected text, found bytes"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: VeilError = io.into();
        assert!(matches!(err, VeilError::Io { .. }));
        assert!(err.to_string().contains("denied"));
    }
}
