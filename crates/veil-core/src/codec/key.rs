//! Cipher key material.

use zeroize::ZeroizeOnDrop;

use crate::error::{Result, VeilError};

/// Number of hex characters kept from the BLAKE3 hash in a fingerprint.
const FINGERPRINT_HEX_LEN: usize = 16;

/// A non-empty XOR key.
///
/// Key bytes are zeroized from memory when dropped and redacted from `Debug`
/// output.
#[derive(Clone, ZeroizeOnDrop)]
pub struct CipherKey {
    bytes: Vec<u8>,
}

impl CipherKey {
    /// Create a key from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns `VeilError::InvalidKey` if `bytes` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use veil_core::codec::CipherKey;
    ///
    /// assert!(CipherKey::new(b"secret".to_vec()).is_ok());
    /// assert!(CipherKey::new(Vec::<u8>::new()).is_err());
    /// ```
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(VeilError::InvalidKey(
                "cipher key cannot be empty".to_string(),
            ));
        }
        Ok(Self { bytes })
    }

    /// Get a reference to the raw key bytes.
    ///
    /// Avoid storing or logging this value.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Short, stable identifier for this key.
    ///
    /// The first 16 hex characters of the BLAKE3 hash of the key bytes.
    /// Identical keys always share a fingerprint; the key cannot be
    /// recovered from it.
    pub fn fingerprint(&self) -> String {
        let hash = blake3::hash(&self.bytes);
        hash.to_hex()[..FINGERPRINT_HEX_LEN].to_string()
    }
}

impl std::fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherKey")
            .field("len", &self.bytes.len())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

impl TryFrom<&str> for CipherKey {
    type Error = VeilError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value.as_bytes())
    }
}

impl TryFrom<&[u8]> for CipherKey {
    type Error = VeilError;

    fn try_from(value: &[u8]) -> Result<Self> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_rejected() {
        let err = CipherKey::new(Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, VeilError::InvalidKey(_)));
        assert!(CipherKey::try_from("").is_err());
    }

    #[test]
    fn test_single_byte_key_accepted() {
        let key = CipherKey::new(vec![0x2a]).unwrap();
        assert_eq!(key.len(), 1);
        assert!(!key.is_empty());
    }

    #[test]
    fn test_debug_redacts_bytes() {
        let key = CipherKey::try_from("super-secret").unwrap();
        let debug = format!("{:?}", key);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_fingerprint_is_stable_and_distinct() {
        let a = CipherKey::try_from("secret").unwrap();
        let b = CipherKey::try_from("secret").unwrap();
        let c = CipherKey::try_from("secreT").unwrap();

        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert_eq!(a.fingerprint().len(), 16);
        assert!(a.fingerprint().chars().all(|ch| ch.is_ascii_hexdigit()));
    }
}
