use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use fialka_core::crypto::kdf::{validate_iterations, validate_salt_bits};
use fialka_core::crypto::{KeyLength, DEFAULT_ITERATIONS, DEFAULT_SALT_BITS};
use fialka_core::pipeline::PasswordSettings;

use crate::constants::CONFIG_ENV;
use crate::errors::CliError;

/// Default extension appended to encrypted files.
pub const DEFAULT_EXTENSION: &str = "aes";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FialkaConfig {
    #[serde(default)]
    pub encrypt: EncryptSection,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncryptSection {
    pub iterations: u32,
    pub key_length: u32,
    pub salt_length: u32,
    pub extension: String,
}

impl Default for EncryptSection {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            key_length: KeyLength::default().bits(),
            salt_length: DEFAULT_SALT_BITS,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl FialkaConfig {
    /// Check config values with the same rules applied to flags.
    pub fn validate(&self) -> anyhow::Result<()> {
        let section = &self.encrypt;
        validate_iterations(section.iterations)
            .map_err(|e| anyhow::anyhow!("Config encrypt.iterations: {}", e))?;
        KeyLength::from_bits(section.key_length)
            .map_err(|e| anyhow::anyhow!("Config encrypt.key_length: {}", e))?;
        validate_salt_bits(section.salt_length)
            .map_err(|e| anyhow::anyhow!("Config encrypt.salt_length: {}", e))?;
        let extension = section.extension.trim_start_matches('.');
        if extension.is_empty() || extension.contains(['/', '\\']) {
            return Err(anyhow::anyhow!(
                "Config encrypt.extension must be a plain file extension (got \"{}\")",
                section.extension
            ));
        }
        Ok(())
    }

    /// Password settings before any flag overrides.
    pub fn password_settings(&self) -> anyhow::Result<PasswordSettings> {
        Ok(PasswordSettings {
            iterations: self.encrypt.iterations,
            length: KeyLength::from_bits(self.encrypt.key_length)?,
            salt_bits: self.encrypt.salt_length,
        })
    }

    /// Extension without a leading dot.
    pub fn extension(&self) -> &str {
        self.encrypt.extension.trim_start_matches('.')
    }
}

/// Resolve the config file path, checking FIALKA_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

/// Load the config, falling back to defaults when the file does not exist.
pub fn load_config() -> anyhow::Result<FialkaConfig> {
    let path = match resolve_config_path() {
        Ok(path) => path,
        // No HOME and no override: nothing to load.
        Err(_) => return Ok(FialkaConfig::default()),
    };
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(FialkaConfig::default());
    }
    let config = read_config(&path)
        .and_then(|config| config.validate().map(|()| config))
        .map_err(|e| CliError::invalid_input(format!("{:#}", e)))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

pub fn read_config(path: &Path) -> anyhow::Result<FialkaConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("fialka"));
        }
    }
    Ok(home_dir()?.join(".config").join("fialka"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
