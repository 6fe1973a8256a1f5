//! Error types for Fialka core operations.
//!
//! Every failure the core can report belongs to one [`ErrorKind`]. The CLI
//! layer maps kinds to exit codes and user-facing messages.

use thiserror::Error;

/// Result type alias for Fialka operations.
pub type Result<T> = std::result::Result<T, FialkaError>;

/// Broad classification of a [`FialkaError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or unreadable file, malformed container, invalid option value.
    Input,
    /// Key file has the wrong size.
    KeyLength,
    /// Empty password or mismatched confirmation.
    Password,
    /// AEAD tag verification failed.
    Authentication,
    /// Container was sealed with a raw key but no key file was given.
    KeyFileRequired,
}

/// Core error type for Fialka operations.
#[derive(Debug, Error)]
pub enum FialkaError {
    /// Key bytes do not have the expected length
    #[error("Key has {actual_bits} bits, expected {expected}")]
    KeyLength {
        actual_bits: usize,
        expected: String,
    },

    /// Password entry was empty
    #[error("Password cannot be empty")]
    EmptyPassword,

    /// Password confirmation did not match the first entry
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Tag verification failed. Deliberately carries no detail.
    #[error("Authentication failed: wrong key or password, or the file was modified")]
    Authentication,

    /// Container requires a key file and none was supplied
    #[error("This file was encrypted using a key file. Please specify it using the -k option.")]
    KeyFileRequired,

    /// Container text could not be parsed
    #[error("Invalid container: {0}")]
    Format(String),

    /// Invalid option or parameter value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Random number generator failure
    #[error("Random source failed: {0}")]
    Random(String),

    /// Cipher construction error (never an authentication failure)
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl FialkaError {
    /// Classify this error for exit-code selection.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FialkaError::KeyLength { .. } => ErrorKind::KeyLength,
            FialkaError::EmptyPassword | FialkaError::PasswordMismatch => ErrorKind::Password,
            FialkaError::Authentication => ErrorKind::Authentication,
            FialkaError::KeyFileRequired => ErrorKind::KeyFileRequired,
            FialkaError::Format(_)
            | FialkaError::InvalidInput(_)
            | FialkaError::Random(_)
            | FialkaError::Crypto(_)
            | FialkaError::Io { .. } => ErrorKind::Input,
        }
    }

    pub(crate) fn key_length(actual_bytes: usize, expected: impl Into<String>) -> Self {
        FialkaError::KeyLength {
            actual_bits: actual_bytes * 8,
            expected: expected.into(),
        }
    }
}

impl From<serde_json::Error> for FialkaError {
    fn from(err: serde_json::Error) -> Self {
        FialkaError::Format(err.to_string())
    }
}
