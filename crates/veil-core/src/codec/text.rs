//! Text encoding decorator.
//!
//! Converts text to bytes on the way down and back to text on the way up,
//! using a named character encoding. Conversion failures are reported as
//! `VeilError::Encoding`; text is never lossily repaired.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{Result, VeilError};
use crate::storage::DataSource;

/// Supported character encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
    /// ISO-8859-1: one byte per code point, U+0000..=U+00FF.
    Latin1,
    Ascii,
}

impl TextEncoding {
    /// Canonical name, as written to store descriptors and config files.
    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf16Le => "utf-16le",
            TextEncoding::Utf16Be => "utf-16be",
            TextEncoding::Latin1 => "iso-8859-1",
            TextEncoding::Ascii => "ascii",
        }
    }

    /// Encode `text` into bytes.
    ///
    /// # Errors
    ///
    /// Returns `VeilError::Encoding` if `text` contains a character this
    /// encoding cannot represent.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        match self {
            TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            TextEncoding::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            TextEncoding::Utf16Be => Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            TextEncoding::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).map_err(|_| self.unrepresentable(c)))
                .collect(),
            TextEncoding::Ascii => text
                .chars()
                .map(|c| {
                    if c.is_ascii() {
                        Ok(c as u8)
                    } else {
                        Err(self.unrepresentable(c))
                    }
                })
                .collect(),
        }
    }

    /// Decode `bytes` back into text.
    ///
    /// # Errors
    ///
    /// Returns `VeilError::Encoding` if `bytes` is not valid under this
    /// encoding.
    pub fn decode(&self, bytes: Vec<u8>) -> Result<String> {
        match self {
            TextEncoding::Utf8 => String::from_utf8(bytes).map_err(|e| {
                VeilError::Encoding(format!(
                    "invalid utf-8 sequence at byte {}",
                    e.utf8_error().valid_up_to()
                ))
            }),
            TextEncoding::Utf16Le => self.decode_utf16(&bytes, u16::from_le_bytes),
            TextEncoding::Utf16Be => self.decode_utf16(&bytes, u16::from_be_bytes),
            TextEncoding::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
            TextEncoding::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(index) => Err(VeilError::Encoding(format!(
                    "byte 0x{:02x} at position {} is not ascii",
                    bytes[index], index
                ))),
                None => Ok(bytes.into_iter().map(char::from).collect()),
            },
        }
    }

    fn decode_utf16(&self, bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String> {
        if bytes.len() % 2 != 0 {
            return Err(VeilError::Encoding(format!(
                "{} needs an even number of bytes, got {}",
                self.name(),
                bytes.len()
            )));
        }
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| unit([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units)
            .map_err(|_| VeilError::Encoding(format!("unpaired surrogate in {}", self.name())))
    }

    fn unrepresentable(&self, c: char) -> VeilError {
        VeilError::Encoding(format!(
            "character U+{:04X} cannot be represented in {}",
            u32::from(c),
            self.name()
        ))
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = VeilError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "utf-16le" | "utf16le" => Ok(TextEncoding::Utf16Le),
            "utf-16be" | "utf16be" => Ok(TextEncoding::Utf16Be),
            "iso-8859-1" | "latin-1" | "latin1" => Ok(TextEncoding::Latin1),
            "ascii" | "us-ascii" => Ok(TextEncoding::Ascii),
            _ => Err(VeilError::UnsupportedEncoding(value.to_string())),
        }
    }
}

/// Decorator that stores text as bytes in the wrapped source.
#[derive(Debug)]
pub struct TextEncoder<S> {
    inner: S,
    encoding: TextEncoding,
}

impl<S> TextEncoder<S>
where
    S: DataSource<Value = Vec<u8>>,
{
    pub fn new(inner: S, encoding: TextEncoding) -> Self {
        Self { inner, encoding }
    }

    /// Wrap `inner` using an encoding looked up by name.
    ///
    /// # Errors
    ///
    /// Returns `VeilError::UnsupportedEncoding` for an unknown name.
    pub fn with_encoding_name(inner: S, name: &str) -> Result<Self> {
        Ok(Self::new(inner, name.parse()?))
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
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

impl<S> DataSource for TextEncoder<S>
where
    S: DataSource<Value = Vec<u8>>,
{
    type Value = String;

    fn write(&mut self, key: &str, value: String) -> Result<()> {
        let bytes = self.encoding.encode(&value)?;
        debug!(key, encoding = self.encoding.name(), bytes = bytes.len(), "encode");
        self.inner.write(key, bytes)
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        match self.inner.read(key)? {
            Some(bytes) => {
                debug!(key, encoding = self.encoding.name(), bytes = bytes.len(), "decode");
                self.encoding.decode(bytes).map(Some)
            }
            None => Ok(None),
        }
    }
}
