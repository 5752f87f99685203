//! Runtime chain assembly and the client edge.
//!
//! Typed chains can be written out by hand:
//!
//! ```
//! use veil_core::codec::{TextEncoder, TextEncoding, XorCipher};
//! use veil_core::storage::{DataSource, KeyValueStore, MemoryBackend};
//!
//! let store = KeyValueStore::new(MemoryBackend::new());
//! let cipher = XorCipher::new(store, "secret").unwrap();
//! let mut source = TextEncoder::new(cipher, TextEncoding::Utf8);
//!
//! source.write("greeting", "hello".to_string()).unwrap();
//! assert_eq!(source.read("greeting").unwrap().as_deref(), Some("hello"));
//! ```
//!
//! When the shape is only known at runtime (from a config file, say),
//! [`ChainSpec`] collects the stages and [`ChainSpec::build`] wraps them
//! around a backend, returning a [`Client`] that speaks [`Payload`].

use std::fmt;

use tracing::debug;

use crate::codec::{CipherKey, TextEncoder, TextEncoding, XorCipher};
use crate::error::{Result, VeilError};
use crate::payload::{Payload, PayloadKind};
use crate::storage::{Backend, ChainDescriptor, DataSource, KeyValueStore};

type ByteSource = Box<dyn DataSource<Value = Vec<u8>>>;
type TextSource = Box<dyn DataSource<Value = String>>;

/// One transform in a chain.
#[derive(Debug, Clone)]
pub enum Stage {
    Text(TextEncoding),
    Xor(CipherKey),
}

/// Ordered list of stages, outermost first.
#[derive(Debug, Clone, Default)]
pub struct ChainSpec {
    stages: Vec<Stage>,
}

impl ChainSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text encoding stage below the stages added so far.
    pub fn text(mut self, encoding: TextEncoding) -> Self {
        self.stages.push(Stage::Text(encoding));
        self
    }

    /// Append an XOR stage below the stages added so far.
    pub fn xor(mut self, key: CipherKey) -> Self {
        self.stages.push(Stage::Xor(key));
        self
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Number of decorator stages above the store.
    pub fn depth(&self) -> usize {
        self.stages.len()
    }

    /// What the client writes and reads: text if the outermost stage is a
    /// text encoder, bytes otherwise.
    pub fn edge_kind(&self) -> PayloadKind {
        match self.stages.first() {
            Some(Stage::Text(_)) => PayloadKind::Text,
            _ => PayloadKind::Bytes,
        }
    }

    /// Check that the stages can be stacked.
    ///
    /// # Errors
    ///
    /// Returns `VeilError::InvalidInput` if a text stage appears anywhere but
    /// outermost. A text encoder produces bytes from text, so nothing that
    /// hands it bytes can sit above it.
    pub fn validate(&self) -> Result<()> {
        let misplaced = self
            .stages
            .iter()
            .skip(1)
            .any(|stage| matches!(stage, Stage::Text(_)));
        if misplaced {
            return Err(VeilError::InvalidInput(
                "a text encoding stage must be the outermost stage".to_string(),
            ));
        }
        Ok(())
    }

    /// Describe this chain for recording in a store.
    pub fn descriptor(&self) -> ChainDescriptor {
        let mut descriptor = ChainDescriptor::default();
        for stage in &self.stages {
            match stage {
                Stage::Text(encoding) => descriptor.encoding = Some(encoding.name().to_string()),
                Stage::Xor(key) => descriptor.cipher_fingerprints.push(key.fingerprint()),
            }
        }
        descriptor
    }

    /// Wrap the stages around `backend`, innermost first.
    ///
    /// # Errors
    ///
    /// Returns the error from [`ChainSpec::validate`].
    pub fn build<B: Backend + 'static>(&self, backend: B) -> Result<Client> {
        self.validate()?;

        let mut source: ByteSource = Box::new(KeyValueStore::new(backend));
        let mut encoding = None;
        for stage in self.stages.iter().rev() {
            match stage {
                Stage::Xor(key) => source = Box::new(XorCipher::with_key(source, key.clone())),
                Stage::Text(text) => encoding = Some(*text),
            }
        }

        debug!(depth = self.depth(), edge = %self.edge_kind(), "assembled chain");
        Ok(match encoding {
            Some(encoding) => Client::from_text_source(TextEncoder::new(source, encoding)),
            None => Client::from_byte_source(source),
        })
    }
}

enum Edge {
    Text(TextSource),
    Bytes(ByteSource),
}

/// Holds the outermost layer of a chain.
///
/// The client neither knows nor needs the depth of the stack beneath it.
pub struct Client {
    edge: Edge,
}

impl Client {
    /// Wrap a chain whose outermost layer speaks text.
    pub fn from_text_source<S>(source: S) -> Self
    where
        S: DataSource<Value = String> + 'static,
    {
        Self {
            edge: Edge::Text(Box::new(source)),
        }
    }

    /// Wrap a chain whose outermost layer speaks bytes.
    pub fn from_byte_source<S>(source: S) -> Self
    where
        S: DataSource<Value = Vec<u8>> + 'static,
    {
        Self {
            edge: Edge::Bytes(Box::new(source)),
        }
    }

    pub fn edge_kind(&self) -> PayloadKind {
        match self.edge {
            Edge::Text(_) => PayloadKind::Text,
            Edge::Bytes(_) => PayloadKind::Bytes,
        }
    }

    /// Write a payload through the chain.
    ///
    /// # Errors
    ///
    /// Returns `VeilError::PayloadMismatch` if the payload variant differs
    /// from [`Client::edge_kind`]; otherwise whatever the chain returns.
    pub fn write(&mut self, key: &str, payload: impl Into<Payload>) -> Result<()> {
        let payload = payload.into();
        match &mut self.edge {
            Edge::Text(source) => source.write(key, payload.into_text()?),
            Edge::Bytes(source) => source.write(key, payload.into_bytes()?),
        }
    }

    /// Read a payload through the chain; `None` if the key was never written.
    pub fn read(&self, key: &str) -> Result<Option<Payload>> {
        match &self.edge {
            Edge::Text(source) => Ok(source.read(key)?.map(Payload::Text)),
            Edge::Bytes(source) => Ok(source.read(key)?.map(Payload::Bytes)),
        }
    }

    /// Read a payload that must exist.
    ///
    /// # Errors
    ///
    /// Returns `VeilError::AbsentValue` if the key was never written.
    pub fn read_required(&self, key: &str) -> Result<Payload> {
        self.read(key)?
            .ok_or_else(|| VeilError::AbsentValue(key.to_string()))
    }

    pub fn write_text(&mut self, key: &str, text: &str) -> Result<()> {
        self.write(key, text)
    }

    pub fn read_text(&self, key: &str) -> Result<Option<String>> {
        self.read(key)?.map(Payload::into_text).transpose()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("edge", &self.edge_kind())
            .finish_non_exhaustive()
    }
}
