//! In-memory backend.

use std::collections::HashMap;

use super::traits::Backend;
use crate::error::Result;

/// Hash map backed storage, useful for testing and single-process use.
///
/// Values live for as long as the backend does.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    slots: HashMap<String, Vec<u8>>,
}

impl MemoryBackend {
    /// Create a new empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Backend for MemoryBackend {
    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        self.slots.insert(key.to_string(), value);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.slots.get(key).cloned())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.slots.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
