//! The value that flows through a decorator chain.
//!
//! A payload is text at the client edge and bytes at the store edge. Typed
//! chains never see this enum; it exists for the dynamic [`Client`] edge,
//! where the chain shape is only known at runtime.
//!
//! [`Client`]: crate::chain::Client

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VeilError};

/// Which variant a [`Payload`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    Text,
    Bytes,
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadKind::Text => f.write_str("text"),
            PayloadKind::Bytes => f.write_str("bytes"),
        }
    }
}

/// A value written to or read from a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Bytes(Vec<u8>),
}

impl Payload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Text(_) => PayloadKind::Text,
            Payload::Bytes(_) => PayloadKind::Bytes,
        }
    }

    /// Length in bytes of the underlying representation.
    pub fn len(&self) -> usize {
        match self {
            Payload::Text(text) => text.len(),
            Payload::Bytes(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take the text out of the payload.
    ///
    /// # Errors
    ///
    /// Returns `VeilError::PayloadMismatch` if the payload holds bytes.
    pub fn into_text(self) -> Result<String> {
        match self {
            Payload::Text(text) => Ok(text),
            Payload::Bytes(_) => Err(VeilError::PayloadMismatch {
                expected: PayloadKind::Text,
                found: PayloadKind::Bytes,
            }),
        }
    }

    /// Take the bytes out of the payload.
    ///
    /// # Errors
    ///
    /// Returns `VeilError::PayloadMismatch` if the payload holds text.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            Payload::Bytes(bytes) => Ok(bytes),
            Payload::Text(_) => Err(VeilError::PayloadMismatch {
                expected: PayloadKind::Bytes,
                found: PayloadKind::Text,
            }),
        }
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::Text(value)
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::Text(value.to_string())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(value: Vec<u8>) -> Self {
        Payload::Bytes(value)
    }
}

impl From<&[u8]> for Payload {
    fn from(value: &[u8]) -> Self {
        Payload::Bytes(value.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions_pick_variant() {
        assert_eq!(Payload::from("hi").kind(), PayloadKind::Text);
        assert_eq!(Payload::from(String::from("hi")).kind(), PayloadKind::Text);
        assert_eq!(Payload::from(vec![1u8, 2]).kind(), PayloadKind::Bytes);
        assert_eq!(Payload::from(&b"ab"[..]).kind(), PayloadKind::Bytes);
    }

    #[test]
    fn test_kind_serializes_as_display_name() {
        for kind in [PayloadKind::Text, PayloadKind::Bytes] {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::Value::String(kind.to_string()));
            let back: PayloadKind = serde_json::from_value(json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn test_into_text_rejects_bytes() {
        let err = Payload::Bytes(vec![0x68]).into_text().unwrap_err();
        assert!(matches!(
            err,
            VeilError::PayloadMismatch {
                expected: PayloadKind::Text,
                found: PayloadKind::Bytes
            }
        ));
    }

    #[test]
    fn test_into_bytes_rejects_text() {
        assert!(Payload::Text("x".into()).into_bytes().is_err());
        assert_eq!(Payload::Bytes(vec![7]).into_bytes().unwrap(), vec![7]);
    }

    #[test]
    fn test_len_counts_encoded_bytes() {
        assert_eq!(Payload::from("héllo").len(), 6);
        assert!(Payload::Bytes(Vec::new()).is_empty());
    }
}
