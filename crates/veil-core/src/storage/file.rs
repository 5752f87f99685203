//! File-backed storage.
//!
//! The whole store is a single JSON document holding a [`StoreHeader`] and
//! a map of key to base64-encoded bytes. It is loaded into memory on open and
//! rewritten atomically on every `put`.
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "created_at": "2026-01-01T00:00:00Z",
//!   "chain": { "encoding": "utf-8", "cipher_fingerprints": ["3f0c9a17b2d4e816"] },
//!   "slots": { "greeting": "GwAfHgo=" }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::traits::Backend;
use super::types::{ChainDescriptor, StoreHeader, FORMAT_VERSION};
use crate::error::{Result, VeilError};
use crate::fs::write_atomic;

#[derive(Debug, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(flatten)]
    header: StoreHeader,
    #[serde(default)]
    slots: BTreeMap<String, String>,
}

/// A [`Backend`] persisted to a single JSON file.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    header: StoreHeader,
    slots: BTreeMap<String, Vec<u8>>,
}

impl FileBackend {
    /// Create a new, empty store file.
    ///
    /// # Errors
    ///
    /// Returns `VeilError::Storage` if the file already exists, or
    /// `VeilError::Io` if it cannot be written.
    pub fn create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Err(VeilError::Storage(format!(
                "Store file already exists: {}",
                path.display()
            )));
        }
        let backend = Self {
            path: path.to_path_buf(),
            header: StoreHeader::new(),
            slots: BTreeMap::new(),
        };
        backend.persist()?;
        info!(path = %path.display(), "created store");
        Ok(backend)
    }

    /// Open an existing store file.
    ///
    /// # Errors
    ///
    /// Returns `VeilError::StoreNotFound` if the file does not exist, and
    /// `VeilError::Format` if it is malformed or was written by an
    /// unsupported format version.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(VeilError::StoreNotFound(path.display().to_string()));
        }
        let contents = std::fs::read(path)?;
        let document: StoreDocument = serde_json::from_slice(&contents)
            .map_err(|e| VeilError::Format(format!("{}: {}", path.display(), e)))?;

        if document.header.format_version != FORMAT_VERSION {
            return Err(VeilError::Format(format!(
                "Unsupported store format version {} (expected {})",
                document.header.format_version, FORMAT_VERSION
            )));
        }

        let mut slots = BTreeMap::new();
        for (key, encoded) in document.slots {
            let bytes = STANDARD.decode(encoded.as_bytes()).map_err(|e| {
                VeilError::Format(format!("Slot \"{}\" is not valid base64: {}", key, e))
            })?;
            slots.insert(key, bytes);
        }

        debug!(path = %path.display(), slots = slots.len(), "opened store");
        Ok(Self {
            path: path.to_path_buf(),
            header: document.header,
            slots,
        })
    }

    /// Open the store at `path`, creating it if it does not exist.
    pub fn open_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::open(path)
        } else {
            Self::create(path)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &StoreHeader {
        &self.header
    }

    /// Record the chain this store is written through, or check it against
    /// the one already recorded.
    ///
    /// The first bind stamps the descriptor into the file. Later binds must
    /// match it exactly.
    ///
    /// # Errors
    ///
    /// Returns `VeilError::ChainMismatch` if a different chain was bound
    /// before.
    pub fn bind_chain(&mut self, descriptor: &ChainDescriptor) -> Result<()> {
        match &self.header.chain {
            Some(existing) => match existing.mismatch(descriptor) {
                Some(reason) => Err(VeilError::ChainMismatch(reason)),
                None => Ok(()),
            },
            None => {
                self.header.chain = Some(descriptor.clone());
                self.persist()?;
                debug!(path = %self.path.display(), "bound chain to store");
                Ok(())
            }
        }
    }

    fn persist(&self) -> Result<()> {
        let document = StoreDocument {
            header: self.header.clone(),
            slots: self
                .slots
                .iter()
                .map(|(key, bytes)| (key.clone(), STANDARD.encode(bytes)))
                .collect(),
        };
        let contents = serde_json::to_vec_pretty(&document)?;
        write_atomic(&self.path, &contents)?;
        Ok(())
    }
}

impl Backend for FileBackend {
    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        let previous = self.slots.insert(key.to_string(), value);
        if let Err(err) = self.persist() {
            // Keep memory consistent with disk.
            match previous {
                Some(bytes) => self.slots.insert(key.to_string(), bytes),
                None => self.slots.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.slots.get(key).cloned())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.slots.keys().cloned().collect())
    }
}
