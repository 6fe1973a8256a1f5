//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (config problems and other unclassified failures)
/// - 2: Misuse of shell command (clap usage errors)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure outside the core taxonomy.
    pub const GENERAL: i32 = 1;

    /// Invalid options, missing or unreadable files, malformed container.
    pub const INVALID_INPUT: i32 = 3;

    /// Key file is not 128 or 256 bits.
    pub const KEY_LENGTH: i32 = 4;

    /// Empty password or mismatched confirmation.
    pub const PASSWORD_REJECTED: i32 = 5;

    /// Authentication failed (wrong password or key, or modified file).
    pub const AUTH_FAILED: i32 = 6;

    /// File was sealed with a key file and none was given.
    pub const KEY_FILE_REQUIRED: i32 = 7;
}

/// Environment variable holding a non-interactive password.
pub const PASSWORD_ENV: &str = "FIALKA_PASSWORD";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "FIALKA_CONFIG";

/// Environment variable holding a log filter.
pub const LOG_ENV: &str = "FIALKA_LOG";
