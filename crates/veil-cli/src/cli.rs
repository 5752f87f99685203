use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use veil_core::VERSION;

/// Veil - layered codec storage: text encoding and XOR obfuscation over a key-value file
#[derive(Parser)]
#[command(name = "veil")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the store file
    #[arg(short, long, global = true, env = "VEIL_STORE")]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the store will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Text encoding for stored values
    #[arg(long, default_value = "utf-8")]
    pub encoding: String,

    /// Store encoded text without the XOR layer
    #[arg(long)]
    pub no_cipher: bool,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `set` command
#[derive(Args)]
pub struct SetArgs {
    /// Key to write
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Value to store (read from stdin when omitted)
    #[arg(value_name = "VALUE")]
    pub value: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `get` command
#[derive(Args)]
pub struct GetArgs {
    /// Key to read
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `inspect` command
#[derive(Args)]
pub struct InspectArgs {
    /// Key whose stored bytes to show
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a store and write the config file
    Init(InitArgs),

    /// Write a value through the chain
    Set(SetArgs),

    /// Read a value through the chain
    Get(GetArgs),

    /// Show the raw bytes stored for a key, bypassing the chain
    Inspect(InspectArgs),

    /// List stored keys
    List(ListArgs),

    /// Print a freshly generated random cipher key
    Keygen,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
