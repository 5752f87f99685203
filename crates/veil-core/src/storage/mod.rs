//! Storage abstraction for Veil.
//!
//! This module defines the `DataSource` capability every chain layer shares,
//! the byte-level `Backend` collaborator, and the `KeyValueStore` leaf that
//! joins the two.
//!
//! ## Architecture
//!
//! ```text
//! Client ─▶ TextEncoder ─▶ XorCipher ─▶ KeyValueStore ─▶ Backend
//!  text        bytes         bytes          bytes        memory / file
//! ```
//!
//! Backends only ever see bytes. Which transforms sit above them is decided
//! once, when the chain is assembled.

pub mod file;
pub mod memory;
pub mod store;
pub mod traits;
pub mod types;

// Re-export public types
pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use store::KeyValueStore;
pub use traits::{Backend, DataSource};
pub use types::{ChainDescriptor, StoreHeader, FORMAT_VERSION};
