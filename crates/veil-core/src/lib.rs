//! # Veil Core
//!
//! Core library for Veil - layered codec storage over a key-value store.
//!
//! Values are written through a chain of decorators, each transforming the
//! value on the way down and reversing the transform on the way up. The
//! client only ever talks to the outermost layer.
//!
//! ## Architecture
//!
//! - **storage**: `DataSource` capability, `Backend` collaborators, the
//!   `KeyValueStore` leaf and the store file format
//! - **codec**: `TextEncoder` and `XorCipher` decorators, `CipherKey`
//! - **chain**: runtime assembly (`ChainSpec`) and the `Client` edge
//! - **payload**: the text-or-bytes value at the client edge
//!
//! The XOR cipher is obfuscation, not cryptography.

pub mod chain;
pub mod codec;
pub mod error;
pub mod fs;
pub mod payload;
pub mod storage;

pub use chain::{ChainSpec, Client, Stage};
pub use codec::{CipherKey, TextEncoder, TextEncoding, XorCipher};
pub use error::{Result, VeilError};
pub use payload::{Payload, PayloadKind};
pub use storage::{Backend, DataSource, FileBackend, KeyValueStore, MemoryBackend};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
