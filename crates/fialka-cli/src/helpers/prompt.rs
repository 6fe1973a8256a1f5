//! Password prompt backed by the terminal.

use secrecy::SecretString;

use dialoguer::Password;
use fialka_core::{FialkaError, Result, SecretPrompt};

use crate::constants::PASSWORD_ENV;

/// [`SecretPrompt`] that reads FIALKA_PASSWORD first, then asks on the TTY.
///
/// The environment value answers every prompt, so an encryption confirmation
/// always matches.
pub struct TerminalPrompt {
    interactive: bool,
    env_password: Option<String>,
}

impl TerminalPrompt {
    /// Create a prompt, reading the password environment variable once.
    pub fn from_env(interactive: bool) -> Self {
        let env_password = std::env::var(PASSWORD_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty());
        Self::with_env_password(interactive, env_password)
    }

    pub fn with_env_password(interactive: bool, env_password: Option<String>) -> Self {
        Self {
            interactive,
            env_password,
        }
    }
}

impl SecretPrompt for TerminalPrompt {
    fn prompt_secret(&mut self, message: &str) -> Result<SecretString> {
        if let Some(value) = &self.env_password {
            tracing::debug!("using password from {}", PASSWORD_ENV);
            return Ok(SecretString::from(value.clone()));
        }
        if !self.interactive {
            return Err(FialkaError::InvalidInput(format!(
                "No password provided and no TTY available. Set {} or pass -p.",
                PASSWORD_ENV
            )));
        }
        Password::new()
            .with_prompt(message)
            .allow_empty_password(true)
            .interact()
            .map(SecretString::from)
            .map_err(|e| FialkaError::InvalidInput(format!("Failed to read password: {}", e)))
    }
}
