use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use veil_core::TextEncoding;

#[derive(Debug, Serialize, Deserialize)]
pub struct VeilConfig {
    pub store: StoreSection,
    #[serde(default)]
    pub chain: ChainSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreSection {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChainSection {
    #[serde(default = "default_encoding")]
    pub encoding: String,
    #[serde(default = "default_cipher")]
    pub cipher: bool,
}

impl Default for ChainSection {
    fn default() -> Self {
        Self {
            encoding: default_encoding(),
            cipher: default_cipher(),
        }
    }
}

fn default_encoding() -> String {
    TextEncoding::default().name().to_string()
}

fn default_cipher() -> bool {
    true
}

impl VeilConfig {
    pub fn new(store_path: PathBuf, encoding: TextEncoding, cipher: bool) -> Self {
        Self {
            store: StoreSection {
                path: store_path.to_string_lossy().to_string(),
            },
            chain: ChainSection {
                encoding: encoding.name().to_string(),
                cipher,
            },
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_store_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("store.veil"))
}

pub fn read_config(path: &Path) -> anyhow::Result<VeilConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &VeilConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("veil"));
        }
    }
    Ok(home_dir()?.join(".config").join("veil"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("veil"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("veil"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = VeilConfig::new(PathBuf::from("/tmp/s.veil"), TextEncoding::Latin1, false);

        write_config(&path, &config).unwrap();
        let loaded = read_config(&path).unwrap();

        assert_eq!(loaded.store.path, "/tmp/s.veil");
        assert_eq!(loaded.chain.encoding, "iso-8859-1");
        assert!(!loaded.chain.cipher);
    }

    #[test]
    fn test_chain_section_defaults() {
        let config: VeilConfig = toml::from_str("[store]\npath = \"/x\"\n").unwrap();
        assert_eq!(config.chain.encoding, "utf-8");
        assert!(config.chain.cipher);
    }

    #[test]
    fn test_missing_config_reports_path() {
        let err = read_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
