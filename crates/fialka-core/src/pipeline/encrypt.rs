//! Plaintext file → container text.

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use zeroize::Zeroizing;

use super::{prompts, Collaborators};
use crate::container::{self, Container, KeyMode};
use crate::crypto::kdf::{validate_iterations, validate_salt_bits};
use crate::crypto::{
    aead, derive_from_password, generate_nonce, generate_random_key, generate_salt,
    key_from_file_bytes, validate_key_file_bytes, KeyLength, KeyMaterial, KeySource,
    DEFAULT_ITERATIONS, DEFAULT_SALT_BITS,
};
use crate::error::{FialkaError, Result};
use crate::traits::{RandomSource, SecretPrompt};

/// Parameters for deriving a new password-based key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordSettings {
    pub iterations: u32,
    pub length: KeyLength,
    pub salt_bits: u32,
}

impl Default for PasswordSettings {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            length: KeyLength::Bits256,
            salt_bits: DEFAULT_SALT_BITS,
        }
    }
}

impl PasswordSettings {
    pub fn validate(&self) -> Result<()> {
        validate_iterations(self.iterations)?;
        validate_salt_bits(self.salt_bits)
    }
}

/// Where the encryption key comes from.
#[derive(Debug)]
pub enum EncryptSecret {
    /// Derive from a password; prompt (with confirmation) when `password` is `None`.
    Password {
        password: Option<SecretString>,
        settings: PasswordSettings,
    },
    /// Use the key stored at `path`, generating it when missing or when
    /// `overwrite` is set. `length` pins the accepted/generated key size.
    KeyFile {
        path: PathBuf,
        overwrite: bool,
        length: Option<KeyLength>,
    },
}

/// Input for [`encrypt_file`].
#[derive(Debug)]
pub struct EncryptRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub secret: EncryptSecret,
    pub associated_data: Option<String>,
}

/// How the key for an encryption was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResolution {
    DerivedFromPassword { iterations: u32 },
    LoadedKeyFile,
    GeneratedKeyFile,
}

/// Summary of a finished encryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptReport {
    pub key_length: KeyLength,
    pub resolution: KeyResolution,
    pub plaintext_len: usize,
}

/// Encrypt `request.input` into a container written to `request.output`.
///
/// Steps run in a fixed order: resolve the key, read the plaintext, draw a
/// nonce, encrypt, serialize, write. Any failure returns early and nothing is
/// written to the output path.
pub fn encrypt_file(
    request: &EncryptRequest,
    collaborators: &mut Collaborators<'_>,
) -> Result<EncryptReport> {
    let (key, resolution) = resolve_encrypt_key(&request.secret, collaborators)?;

    let plaintext = Zeroizing::new(collaborators.files.read_bytes(&request.input)?);
    tracing::debug!(bytes = plaintext.len(), input = %request.input.display(), "read plaintext");

    let container = seal(
        &plaintext,
        &key,
        request.associated_data.as_deref(),
        collaborators.random,
    )?;
    let text = container::serialize(&container)?;
    collaborators.files.write_text(&request.output, &text)?;
    tracing::debug!(output = %request.output.display(), "wrote container");

    Ok(EncryptReport {
        key_length: key.length(),
        resolution,
        plaintext_len: plaintext.len(),
    })
}

/// Resolve the key for a new encryption.
///
/// # Errors
///
/// - `FialkaError::EmptyPassword` / `FialkaError::PasswordMismatch` before
///   any key derivation
/// - `FialkaError::KeyLength` when an existing key file has the wrong size
pub fn resolve_encrypt_key(
    secret: &EncryptSecret,
    collaborators: &mut Collaborators<'_>,
) -> Result<(KeyMaterial, KeyResolution)> {
    match secret {
        EncryptSecret::Password { password, settings } => {
            settings.validate()?;
            let prompted;
            let password = match password {
                Some(value) => value,
                None => {
                    prompted = read_confirmed_password(collaborators.prompt)?;
                    &prompted
                }
            };
            if password.expose_secret().is_empty() {
                return Err(FialkaError::EmptyPassword);
            }
            let salt = generate_salt(settings.salt_bits, collaborators.random)?;
            let key = derive_from_password(
                password.expose_secret(),
                &salt,
                settings.iterations,
                settings.length,
            )?;
            Ok((
                key,
                KeyResolution::DerivedFromPassword {
                    iterations: settings.iterations,
                },
            ))
        }
        EncryptSecret::KeyFile {
            path,
            overwrite,
            length,
        } => {
            if collaborators.files.exists(path) && !overwrite {
                let bytes = collaborators.files.read_bytes(path)?;
                let key = match length {
                    Some(expected) => validate_key_file_bytes(bytes, *expected)?,
                    None => key_from_file_bytes(bytes)?,
                };
                tracing::debug!(bits = key.length().bits(), "loaded key file");
                return Ok((key, KeyResolution::LoadedKeyFile));
            }

            let key = generate_random_key(length.unwrap_or_default(), collaborators.random)?;
            collaborators.files.write_key(path, key.as_bytes())?;
            tracing::debug!(bits = key.length().bits(), path = %path.display(), "generated key file");
            Ok((key, KeyResolution::GeneratedKeyFile))
        }
    }
}

/// Prompt for a new password twice.
///
/// An empty first entry is rejected before the confirmation is asked for.
/// The two entries must match byte for byte.
pub fn read_confirmed_password(prompt: &mut dyn SecretPrompt) -> Result<SecretString> {
    let first = prompt.prompt_secret(prompts::ENCRYPT_PASSWORD)?;
    if first.expose_secret().is_empty() {
        return Err(FialkaError::EmptyPassword);
    }
    let second = prompt.prompt_secret(prompts::CONFIRM_PASSWORD)?;
    if first.expose_secret().as_bytes() != second.expose_secret().as_bytes() {
        return Err(FialkaError::PasswordMismatch);
    }
    Ok(first)
}

/// Encrypt bytes into a container under `key` with a fresh nonce.
///
/// The container records the password parameters iff `key` was derived from
/// a password. An empty `associated_data` string is treated as absent.
pub fn seal(
    plaintext: &[u8],
    key: &KeyMaterial,
    associated_data: Option<&str>,
    random: &mut dyn RandomSource,
) -> Result<Container> {
    let associated_data = associated_data
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    let nonce = generate_nonce(random)?;
    let sealed = aead::encrypt(
        key.as_bytes(),
        &nonce,
        plaintext,
        associated_data.as_deref().map(str::as_bytes),
    )?;

    let key_mode = match key.source() {
        KeySource::Password(params) => KeyMode::PasswordDerived(params.clone()),
        KeySource::RawKeyFile => KeyMode::RawKey,
    };

    Ok(Container {
        key_mode,
        associated_data,
        nonce,
        tag: sealed.tag,
        ciphertext: sealed.ciphertext,
    })
}
