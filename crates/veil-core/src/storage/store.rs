//! The key-value store at the bottom of every chain.

use tracing::trace;

use super::traits::{Backend, DataSource};
use crate::error::Result;

/// Leaf of a decorator chain: stores bytes verbatim in a [`Backend`].
///
/// No type checking happens here. Whatever bytes the innermost decorator
/// hands over are stored as-is.
#[derive(Debug, Default)]
pub struct KeyValueStore<B> {
    backend: B,
}

impl<B: Backend> KeyValueStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// List every key that has been written.
    pub fn keys(&self) -> Result<Vec<String>> {
        self.backend.keys()
    }
}

impl<B: Backend> DataSource for KeyValueStore<B> {
    type Value = Vec<u8>;

    fn write(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        trace!(key, bytes = value.len(), "store write");
        self.backend.put(key, value)
    }

    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self.backend.get(key)?;
        trace!(key, found = value.is_some(), "store read");
        Ok(value)
    }
}
