//! Repeating-key XOR decorator.
//!
//! Obfuscation only. XOR with a repeating key is not encryption and offers
//! no confidentiality against anyone who looks at more than one value.

use tracing::debug;

use super::key::CipherKey;
use crate::error::Result;
use crate::storage::DataSource;

/// XOR `data` in place with `key`, repeating the key as needed.
///
/// Byte `i` is combined with `key[i % key.len()]`. Applying the transform
/// twice with the same key restores the input.
pub fn xor_apply(data: &mut [u8], key: &CipherKey) {
    let key = key.as_bytes();
    let key_len = key.len();
    for (position, byte) in data.iter_mut().enumerate() {
        *byte ^= key[position % key_len];
    }
}

/// Decorator that XORs bytes with a fixed key before storing them.
#[derive(Debug)]
pub struct XorCipher<S> {
    inner: S,
    key: CipherKey,
}

impl<S> XorCipher<S>
where
    S: DataSource<Value = Vec<u8>>,
{
    /// Wrap `inner` with a cipher over `key`.
    ///
    /// # Errors
    ///
    /// Returns `VeilError::InvalidKey` if `key` is empty. Nothing is read or
    /// written in that case.
    pub fn new(inner: S, key: impl Into<Vec<u8>>) -> Result<Self> {
        Ok(Self::with_key(inner, CipherKey::new(key)?))
    }

    /// Wrap `inner` with an already validated key.
    pub fn with_key(inner: S, key: CipherKey) -> Self {
        Self { inner, key }
    }

    pub fn fingerprint(&self) -> String {
        self.key.fingerprint()
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S> DataSource for XorCipher<S>
where
    S: DataSource<Value = Vec<u8>>,
{
    type Value = Vec<u8>;

    fn write(&mut self, key: &str, mut value: Vec<u8>) -> Result<()> {
        xor_apply(&mut value, &self.key);
        debug!(key, bytes = value.len(), "xor write");
        self.inner.write(key, value)
    }

    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut value = match self.inner.read(key)? {
            Some(value) => value,
            None => return Ok(None),
        };
        xor_apply(&mut value, &self.key);
        debug!(key, bytes = value.len(), "xor read");
        Ok(Some(value))
    }
}
