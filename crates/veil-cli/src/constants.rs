//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, and by clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (config, store file, key).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments (bad cipher key, unknown encoding).
    pub const INVALID_INPUT: i32 = 4;

    /// Store was written through a different chain (key or encoding).
    pub const CHAIN_MISMATCH: i32 = 5;

    /// Stored bytes are not valid text under the configured encoding.
    pub const ENCODING_FAILED: i32 = 6;
}

/// Environment variable holding the cipher key.
pub const KEY_ENV: &str = "VEIL_KEY";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "VEIL_CONFIG";

/// Prefix marking a cipher key given as base64.
pub const BASE64_KEY_PREFIX: &str = "base64:";

/// Length in bytes of keys produced by `veil keygen`.
pub const GENERATED_KEY_LEN: usize = 32;
