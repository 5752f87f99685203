//! Core data types for Veil storage.
//!
//! These types describe what a store file records about itself, separate
//! from the values it holds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current store file format version.
pub const FORMAT_VERSION: u32 = 1;

/// The shape of the chain a store was written through.
///
/// Holds the encoding name and a fingerprint per cipher stage, outermost
/// first. Never holds key material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ChainDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(default)]
    pub cipher_fingerprints: Vec<String>,
}

impl ChainDescriptor {
    /// Explain how `other` differs from `self`, or `None` if they match.
    pub fn mismatch(&self, other: &ChainDescriptor) -> Option<String> {
        if self.encoding != other.encoding {
            return Some(format!(
                "store was written with encoding {}, chain uses {}",
                self.encoding.as_deref().unwrap_or("none (raw bytes)"),
                other.encoding.as_deref().unwrap_or("none (raw bytes)")
            ));
        }
        if self.cipher_fingerprints.len() != other.cipher_fingerprints.len() {
            return Some(format!(
                "store was written with {} cipher layer(s), chain has {}",
                self.cipher_fingerprints.len(),
                other.cipher_fingerprints.len()
            ));
        }
        if self.cipher_fingerprints != other.cipher_fingerprints {
            return Some(
                "cipher key differs from the key this store was written with".to_string(),
            );
        }
        None
    }
}

/// Metadata at the top of a store file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreHeader {
    pub format_version: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<ChainDescriptor>,
}

impl StoreHeader {
    pub fn new() -> Self {
        Self {
            format_version: FORMAT_VERSION,
            created_at: Utc::now(),
            chain: None,
        }
    }
}

impl Default for StoreHeader {
    fn default() -> Self {
        Self::new()
    }
}
