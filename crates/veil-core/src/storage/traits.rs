//! Storage trait definitions.
//!
//! Two seams live here:
//!
//! - [`DataSource`]: the two-operation capability shared by the key-value
//!   store and every decorator stacked on top of it. A decorator wraps any
//!   `DataSource` whose value type it knows how to transform, so chains
//!   compose without any layer knowing the stack depth.
//! - [`Backend`]: the byte-level collaborator underneath the
//!   [`KeyValueStore`](super::KeyValueStore). In-memory and file-backed
//!   implementations ship with the crate; anything else satisfying the
//!   contract can be plugged in.

use crate::error::{Result, VeilError};

/// Read/write capability shared by the store and its decorators.
///
/// The value type is fixed per implementation: `Vec<u8>` for the store and
/// the cipher, `String` for the text encoder. Wrapping a source whose value
/// type does not match is a compile error, not a runtime cast failure.
pub trait DataSource {
    /// The value this source accepts in `write` and returns from `read`.
    type Value;

    /// Write a value under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Decorators return their own transform errors (for example
    /// `VeilError::Encoding`); every layer propagates inner errors unchanged.
    fn write(&mut self, key: &str, value: Self::Value) -> Result<()>;

    /// Read the most recent value written under `key`.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(value))` if found, `Ok(None)` if the key was never
    /// written.
    fn read(&self, key: &str) -> Result<Option<Self::Value>>;

    /// Read a value that must exist.
    ///
    /// # Errors
    ///
    /// Returns `VeilError::AbsentValue` if the key was never written.
    fn read_required(&self, key: &str) -> Result<Self::Value> {
        self.read(key)?
            .ok_or_else(|| VeilError::AbsentValue(key.to_string()))
    }
}

impl<D: DataSource + ?Sized> DataSource for Box<D> {
    type Value = D::Value;

    fn write(&mut self, key: &str, value: Self::Value) -> Result<()> {
        (**self).write(key, value)
    }

    fn read(&self, key: &str) -> Result<Option<Self::Value>> {
        (**self).read(key)
    }
}

/// Byte-level storage collaborator.
///
/// Implementations must ensure:
/// - `put` stores bytes verbatim (last write wins)
/// - `get` returns exactly what was last stored, or `None`
/// - `keys` is sorted so listings are stable
pub trait Backend: Send {
    /// Store `value` under `key`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns `VeilError::Storage` or `VeilError::Io` if the backing medium
    /// cannot be written.
    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Fetch the bytes stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// List every key that holds a value, sorted ascending.
    fn keys(&self) -> Result<Vec<String>>;
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        (**self).put(key, value)
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn keys(&self) -> Result<Vec<String>> {
        (**self).keys()
    }
}
