//! Input and parsing helper functions for the CLI.

use std::io::{self, IsTerminal, Read};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use dialoguer::Password;
use zeroize::Zeroizing;

use veil_core::{CipherKey, VeilError};

use crate::constants::{BASE64_KEY_PREFIX, GENERATED_KEY_LEN, KEY_ENV};

/// Parse a cipher key string.
///
/// `base64:<data>` is decoded; anything else is used as UTF-8 bytes.
pub fn parse_cipher_key(value: &str) -> anyhow::Result<CipherKey> {
    let key = match value.strip_prefix(BASE64_KEY_PREFIX) {
        Some(encoded) => {
            let bytes = Zeroizing::new(STANDARD.decode(encoded.trim()).map_err(|e| {
                VeilError::InvalidKey(format!("{} key is not valid base64: {}", BASE64_KEY_PREFIX, e))
            })?);
            CipherKey::new(bytes.as_slice())?
        }
        None => CipherKey::new(value.as_bytes())?,
    };
    Ok(key)
}

/// Read the cipher key from VEIL_KEY, or prompt for it.
pub fn resolve_cipher_key(interactive: bool) -> anyhow::Result<CipherKey> {
    if let Some(value) = key_from_env() {
        return parse_cipher_key(&value);
    }
    if !interactive {
        return Err(no_key_error());
    }
    let value = Zeroizing::new(
        Password::new()
            .with_prompt("Cipher key")
            .interact()
            .map_err(|e| anyhow::anyhow!("Failed to read cipher key: {}", e))?,
    );
    parse_cipher_key(&value)
}

/// Read the cipher key with confirmation (for init), or from VEIL_KEY.
pub fn resolve_init_cipher_key(interactive: bool) -> anyhow::Result<CipherKey> {
    if let Some(value) = key_from_env() {
        return parse_cipher_key(&value);
    }
    if !interactive {
        return Err(no_key_error());
    }
    let value = Zeroizing::new(
        Password::new()
            .with_prompt("Enter cipher key")
            .with_confirmation("Confirm cipher key", "Keys do not match")
            .interact()
            .map_err(|e| anyhow::anyhow!("Failed to read cipher key: {}", e))?,
    );
    parse_cipher_key(&value)
}

fn key_from_env() -> Option<Zeroizing<String>> {
    std::env::var(KEY_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(Zeroizing::new)
}

fn no_key_error() -> anyhow::Error {
    VeilError::InvalidKey(format!(
        "No cipher key provided and no TTY available. Set {}.",
        KEY_ENV
    ))
    .into()
}

/// Generate a random key in the `base64:` form accepted by `parse_cipher_key`.
pub fn generate_key_string() -> anyhow::Result<String> {
    let mut bytes = Zeroizing::new([0u8; GENERATED_KEY_LEN]);
    getrandom::getrandom(&mut bytes[..])
        .map_err(|e| anyhow::anyhow!("Failed to generate key bytes: {}", e))?;
    Ok(format!("{}{}", BASE64_KEY_PREFIX, STANDARD.encode(&bytes[..])))
}

/// Take the value from the argument, or from stdin when piped.
pub fn read_value(value: Option<String>, no_input: bool) -> anyhow::Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }

    if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        let trimmed = buffer.trim_end_matches(['\n', '\r']).to_string();
        return Ok(trimmed);
    }

    if no_input {
        return Err(anyhow::anyhow!("--no-input requires a VALUE or content on stdin"));
    }
    Err(anyhow::anyhow!(
        "No value provided. Pass VALUE or pipe content via stdin."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_key_uses_utf8_bytes() {
        let key = parse_cipher_key("secret").unwrap();
        assert_eq!(key.as_bytes(), b"secret");
    }

    #[test]
    fn test_base64_key_is_decoded() {
        let key = parse_cipher_key("base64:AAEC/w==").unwrap();
        assert_eq!(key.as_bytes(), &[0x00, 0x01, 0x02, 0xff]);
    }

    #[test]
    fn test_invalid_base64_key_rejected() {
        let err = parse_cipher_key("base64:!!!").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VeilError>(),
            Some(VeilError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_empty_base64_key_rejected() {
        assert!(parse_cipher_key("base64:").is_err());
        assert!(parse_cipher_key("").is_err());
    }

    #[test]
    fn test_generated_key_parses_to_full_length() {
        let generated = generate_key_string().unwrap();
        assert!(generated.starts_with(BASE64_KEY_PREFIX));
        let key = parse_cipher_key(&generated).unwrap();
        assert_eq!(key.len(), GENERATED_KEY_LEN);
    }

    #[test]
    fn test_read_value_prefers_argument() {
        assert_eq!(read_value(Some("x".into()), true).unwrap(), "x");
    }
}
