//! Option validation for the encrypt and decrypt commands.
//!
//! Parsed flags are collected into plain option structs and checked here
//! before any file is touched. The result is a ready-to-run pipeline request.

use std::path::PathBuf;

use secrecy::SecretString;

use fialka_core::crypto::KeyLength;
use fialka_core::pipeline::{DecryptRequest, EncryptRequest, EncryptSecret};

use crate::cli::{DecryptArgs, EncryptArgs};
use crate::config::FialkaConfig;
use crate::errors::CliError;
use crate::helpers::{default_decrypt_output, default_encrypt_output};

/// Encrypt flags as given on the command line.
#[derive(Debug, Default)]
pub struct EncryptOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub password: Option<SecretString>,
    pub key_file: Option<PathBuf>,
    pub force: bool,
    pub associated_data: Option<String>,
    pub iterations: Option<u32>,
    pub length: Option<u32>,
    pub salt_length: Option<u32>,
}

impl From<&EncryptArgs> for EncryptOptions {
    fn from(args: &EncryptArgs) -> Self {
        Self {
            input: args.infile.clone(),
            output: args.output.clone(),
            password: args.password.clone().map(SecretString::from),
            key_file: args.key_file.clone(),
            force: args.force,
            associated_data: args.associated_data.clone(),
            iterations: args.iterations,
            length: args.length,
            salt_length: args.salt_length,
        }
    }
}

/// Decrypt flags as given on the command line.
#[derive(Debug, Default)]
pub struct DecryptOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub password: Option<SecretString>,
    pub key_file: Option<PathBuf>,
}

impl From<&DecryptArgs> for DecryptOptions {
    fn from(args: &DecryptArgs) -> Self {
        Self {
            input: args.infile.clone(),
            output: args.output.clone(),
            password: args.password.clone().map(SecretString::from),
            key_file: args.key_file.clone(),
        }
    }
}

/// Check encrypt options and build the pipeline request.
///
/// Flags override config values. Password and key file are mutually
/// exclusive, `-f` needs `-k`, and the KDF flags only apply to passwords.
pub fn validate_encrypt_options(
    options: EncryptOptions,
    config: &FialkaConfig,
) -> anyhow::Result<EncryptRequest> {
    if options.password.is_some() && options.key_file.is_some() {
        return Err(CliError::invalid_input_with_hint(
            "Password (-p) and key file (-k) cannot be used together",
            "Hint: Pick one; omit both to be prompted for a password.",
        )
        .into());
    }
    if options.force && options.key_file.is_none() {
        return Err(CliError::invalid_input("Overwrite (-f) requires a key file (-k)").into());
    }
    if options.key_file.is_some()
        && (options.iterations.is_some() || options.salt_length.is_some())
    {
        return Err(CliError::invalid_input(
            "--iterations and --salt-length only apply to password encryption",
        )
        .into());
    }

    let length = options.length.map(KeyLength::from_bits).transpose()?;
    let output = options
        .output
        .unwrap_or_else(|| default_encrypt_output(&options.input, config.extension()));
    if output == options.input {
        return Err(CliError::invalid_input("Output file must differ from the input file").into());
    }

    let secret = match options.key_file {
        Some(path) => EncryptSecret::KeyFile {
            path,
            overwrite: options.force,
            length,
        },
        None => {
            let mut settings = config.password_settings()?;
            if let Some(iterations) = options.iterations {
                settings.iterations = iterations;
            }
            if let Some(length) = length {
                settings.length = length;
            }
            if let Some(salt_bits) = options.salt_length {
                settings.salt_bits = salt_bits;
            }
            settings.validate()?;
            EncryptSecret::Password {
                password: options.password,
                settings,
            }
        }
    };

    Ok(EncryptRequest {
        input: options.input,
        output,
        secret,
        associated_data: options.associated_data,
    })
}

/// Check decrypt options and build the pipeline request.
///
/// Both a password and a key file may be given; the container decides which
/// one is used.
pub fn validate_decrypt_options(options: DecryptOptions) -> anyhow::Result<DecryptRequest> {
    let output = match options.output {
        Some(path) => path,
        None => default_decrypt_output(&options.input)
            .map_err(|e| CliError::invalid_input(e.to_string()))?,
    };
    if output == options.input {
        return Err(CliError::invalid_input("Output file must differ from the input file").into());
    }

    Ok(DecryptRequest {
        input: options.input,
        output,
        password: options.password,
        key_file: options.key_file,
    })
}
