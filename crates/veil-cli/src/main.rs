//! Veil CLI - layered codec storage from the command line
//!
//! Values are written as text, encoded, XOR-obfuscated and stored in a
//! single file. This binary wires the config file, the cipher key and the
//! core chain together.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use veil_core::VeilError;

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod helpers;
mod output;

use cli::{Cli, Commands};
use constants::exit_codes;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("Error: {}", err);
        std::process::exit(exit_code(&err));
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Init(args) => commands::handle_init(cli, args),
        Commands::Set(args) => commands::handle_set(cli, args),
        Commands::Get(args) => commands::handle_get(cli, args),
        Commands::Inspect(args) => commands::handle_inspect(cli, args),
        Commands::List(args) => commands::handle_list(cli, args),
        Commands::Keygen => commands::handle_keygen(cli),
        Commands::Completions { shell } => commands::handle_completions(*shell),
    }
}

/// Logs go to stderr so command output stays pipeable.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<VeilError>() {
        Some(VeilError::StoreNotFound(_)) | Some(VeilError::AbsentValue(_)) => {
            exit_codes::NOT_FOUND
        }
        Some(VeilError::InvalidKey(_))
        | Some(VeilError::UnsupportedEncoding(_))
        | Some(VeilError::PayloadMismatch { .. })
        | Some(VeilError::InvalidInput(_)) => exit_codes::INVALID_INPUT,
        Some(VeilError::ChainMismatch(_)) => exit_codes::CHAIN_MISMATCH,
        Some(VeilError::Encoding(_)) => exit_codes::ENCODING_FAILED,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_mapping() {
        let absent: anyhow::Error = VeilError::AbsentValue("k".into()).into();
        assert_eq!(exit_code(&absent), exit_codes::NOT_FOUND);

        let mismatch: anyhow::Error = VeilError::ChainMismatch("x".into()).into();
        assert_eq!(exit_code(&mismatch), exit_codes::CHAIN_MISMATCH);

        let encoding: anyhow::Error = VeilError::Encoding("x".into()).into();
        assert_eq!(exit_code(&encoding), exit_codes::ENCODING_FAILED);

        let key: anyhow::Error = VeilError::InvalidKey("x".into()).into();
        assert_eq!(exit_code(&key), exit_codes::INVALID_INPUT);

        let other = anyhow::anyhow!("boom");
        assert_eq!(exit_code(&other), 1);
    }
}
