use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use tracing::debug;
use veil_core::{ChainSpec, Client, FileBackend, TextEncoding, VeilError};

use crate::cli::Cli;
use crate::config::{default_config_path, read_config, ChainSection};
use crate::constants::CONFIG_ENV;
use crate::helpers::resolve_cipher_key;

/// Chain settings resolved from the config file, or defaults without one.
pub struct ChainSettings {
    pub encoding: TextEncoding,
    pub cipher: bool,
}

impl ChainSettings {
    fn from_section(section: &ChainSection) -> anyhow::Result<Self> {
        Ok(Self {
            encoding: section.encoding.parse()?,
            cipher: section.cipher,
        })
    }
}

pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

pub fn resolve_store_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.store.clone() {
        return Ok(PathBuf::from(path));
    }

    let config_path = resolve_config_path()?;
    if !config_path.exists() {
        return Err(VeilError::StoreNotFound(missing_config_message(&config_path)).into());
    }

    let config = read_config(&config_path)?;
    Ok(PathBuf::from(config.store.path))
}

pub fn load_chain_settings() -> anyhow::Result<ChainSettings> {
    let config_path = resolve_config_path()?;
    if !config_path.exists() {
        return ChainSettings::from_section(&ChainSection::default());
    }
    let config = read_config(&config_path)?;
    ChainSettings::from_section(&config.chain)
}

/// Build the chain described by `settings`, asking for a key if it needs one.
pub fn chain_spec(settings: &ChainSettings, interactive: bool) -> anyhow::Result<ChainSpec> {
    let mut spec = ChainSpec::new().text(settings.encoding);
    if settings.cipher {
        spec = spec.xor(resolve_cipher_key(interactive)?);
    }
    Ok(spec)
}

/// Open the configured store and wrap it in the configured chain.
///
/// The chain is checked against the descriptor recorded in the store, so a
/// wrong key or encoding fails here instead of reading back garbage.
pub fn open_client(cli: &Cli, no_input: bool) -> anyhow::Result<Client> {
    let path = resolve_store_path(cli)?;
    let mut backend = FileBackend::open(&path)?;
    let settings = load_chain_settings()?;
    let interactive = std::io::stdin().is_terminal() && !no_input;
    let spec = chain_spec(&settings, interactive)?;

    backend.bind_chain(&spec.descriptor())?;
    debug!(path = %path.display(), depth = spec.depth(), "opened client");
    Ok(spec.build(backend)?)
}

/// Open the configured store without any chain, for raw inspection.
pub fn open_backend(cli: &Cli) -> anyhow::Result<FileBackend> {
    let path = resolve_store_path(cli)?;
    Ok(FileBackend::open(&path)?)
}

pub fn missing_config_message(config_path: &Path) -> String {
    format!(
        "no config at {}\n\nRun:\n  veil init\n\nOr specify a store path:\n  VEIL_STORE=/path/to/store.veil veil init",
        config_path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_message_has_hint() {
        let message = missing_config_message(Path::new("/x/config.toml"));
        assert!(message.contains("/x/config.toml"));
        assert!(message.contains("veil init"));
    }

    #[test]
    fn test_settings_reject_unknown_encoding() {
        let section = ChainSection {
            encoding: "klingon".to_string(),
            cipher: true,
        };
        let err = ChainSettings::from_section(&section).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<VeilError>(),
            Some(VeilError::UnsupportedEncoding(_))
        ));
    }

    #[test]
    fn test_chain_spec_without_cipher_needs_no_key() {
        let settings = ChainSettings {
            encoding: TextEncoding::Ascii,
            cipher: false,
        };
        let spec = chain_spec(&settings, false).unwrap();
        assert_eq!(spec.depth(), 1);
        assert_eq!(spec.descriptor().encoding.as_deref(), Some("ascii"));
    }
}
