use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use veil_core::{ChainSpec, FileBackend, TextEncoding};

use crate::app::resolve_config_path;
use crate::cli::{Cli, InitArgs};
use crate::config::{default_store_path, write_config, VeilConfig};
use crate::helpers::resolve_init_cipher_key;

pub fn handle_init(cli: &Cli, args: &InitArgs) -> anyhow::Result<()> {
    let interactive = std::io::stdin().is_terminal() && !args.no_input;
    let encoding: TextEncoding = args.encoding.parse()?;

    let store_path = match args.path.clone().or_else(|| cli.store.clone()) {
        Some(value) => PathBuf::from(value),
        None => default_store_path()?,
    };

    let config_path = resolve_config_path()?;
    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {}. Use --force to overwrite it.",
            config_path.display()
        ));
    }
    let store_exists = store_path.exists();
    if store_exists && !args.force {
        return Err(anyhow::anyhow!(
            "Store already exists at {}. Use --force to reuse it.",
            store_path.display()
        ));
    }

    // Resolve the key before touching disk so a failed prompt leaves nothing behind.
    let mut spec = ChainSpec::new().text(encoding);
    if !args.no_cipher {
        spec = spec.xor(resolve_init_cipher_key(interactive)?);
    }

    // An existing store keeps its data; binding refuses a different chain.
    let mut backend = if store_exists {
        FileBackend::open(&store_path)?
    } else {
        FileBackend::create(&store_path)?
    };
    if let Err(err) = backend.bind_chain(&spec.descriptor()) {
        discard_new_store(store_exists, &store_path);
        return Err(err.into());
    }

    let config = VeilConfig::new(store_path.clone(), encoding, !args.no_cipher);
    if let Err(err) = write_config(&config_path, &config) {
        discard_new_store(store_exists, &store_path);
        return Err(err);
    }
    info!(
        store = %store_path.display(),
        config = %config_path.display(),
        depth = spec.depth(),
        "initialized"
    );

    if !cli.quiet {
        if store_exists {
            println!("Reusing store at {}", store_path.display());
        } else {
            println!("Initialized new store at {}", store_path.display());
        }
        println!("Config written to {}", config_path.display());
    }
    Ok(())
}

fn discard_new_store(existed: bool, path: &Path) {
    if !existed {
        if let Err(err) = std::fs::remove_file(path) {
            warn!(path = %path.display(), error = %err, "failed to remove partial store");
        }
    }
}
