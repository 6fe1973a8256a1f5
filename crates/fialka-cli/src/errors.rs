//! CLI error types for structured error handling.
//!
//! Core errors are classified by [`ErrorKind`] and mapped to exit codes here,
//! so every command reports failures the same way.

use std::fmt;

use fialka_core::{ErrorKind, FialkaError};

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Invalid options, unreadable files, malformed container
    InvalidInput {
        message: String,
        hint: Option<String>,
    },

    /// Key file has the wrong size
    KeyLength(String),

    /// Password was empty or the confirmation did not match
    PasswordRejected(String),

    /// Tag verification failed
    AuthFailed { message: String, hint: String },

    /// Container needs a key file and none was given
    KeyFileRequired(String),

    /// Anything outside the core taxonomy
    General(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidInput { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::AuthFailed { message, hint } => write!(f, "{}\n{}", message, hint),
            CliError::KeyLength(message)
            | CliError::PasswordRejected(message)
            | CliError::KeyFileRequired(message)
            | CliError::General(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl From<&FialkaError> for CliError {
    fn from(err: &FialkaError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::Input => CliError::InvalidInput {
                message,
                hint: None,
            },
            ErrorKind::KeyLength => CliError::KeyLength(message),
            ErrorKind::Password => CliError::PasswordRejected(message),
            ErrorKind::Authentication => CliError::AuthFailed {
                message,
                hint: "Hint: Check the password or key file. The file may also have been modified."
                    .to_string(),
            },
            ErrorKind::KeyFileRequired => CliError::KeyFileRequired(message),
        }
    }
}

impl CliError {
    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput {
            message: message.into(),
            hint: None,
        }
    }

    /// Create an InvalidInput error with a hint line.
    pub fn invalid_input_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::InvalidInput {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Classify an error returned from a command handler.
    pub fn from_anyhow(err: anyhow::Error) -> Self {
        let err = match err.downcast::<CliError>() {
            Ok(cli_error) => return cli_error,
            Err(err) => err,
        };
        match err.downcast_ref::<FialkaError>() {
            Some(core) => CliError::from(core),
            None => CliError::General(format!("{:#}", err)),
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidInput { .. } => exit_codes::INVALID_INPUT,
            CliError::KeyLength(_) => exit_codes::KEY_LENGTH,
            CliError::PasswordRejected(_) => exit_codes::PASSWORD_REJECTED,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::KeyFileRequired(_) => exit_codes::KEY_FILE_REQUIRED,
            CliError::General(_) => exit_codes::GENERAL,
        }
    }

    /// Print error message to stderr and exit with appropriate code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        std::process::exit(self.exit_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_kinds_map_to_distinct_codes() {
        let errors = [
            FialkaError::InvalidInput("bad".to_string()),
            FialkaError::KeyLength {
                actual_bits: 64,
                expected: "256".to_string(),
            },
            FialkaError::PasswordMismatch,
            FialkaError::Authentication,
            FialkaError::KeyFileRequired,
        ];
        let mut codes: Vec<i32> = errors
            .iter()
            .map(|e| CliError::from(e).exit_code())
            .collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(codes.iter().all(|code| *code >= 3));
    }

    #[test]
    fn test_from_anyhow_finds_core_error() {
        let err = anyhow::Error::new(FialkaError::Authentication);
        let cli_error = CliError::from_anyhow(err);
        assert_eq!(cli_error.exit_code(), exit_codes::AUTH_FAILED);
        assert!(cli_error.to_string().contains("Hint:"));
    }

    #[test]
    fn test_from_anyhow_keeps_cli_error() {
        let err = anyhow::Error::new(CliError::invalid_input("nope"));
        assert_eq!(
            CliError::from_anyhow(err).exit_code(),
            exit_codes::INVALID_INPUT
        );
    }

    #[test]
    fn test_unclassified_errors_are_general() {
        let err = anyhow::anyhow!("Failed to parse config");
        let cli_error = CliError::from_anyhow(err);
        assert_eq!(cli_error.exit_code(), exit_codes::GENERAL);
        assert_eq!(cli_error.to_string(), "Failed to parse config");
    }
}
