//! Encrypted container format.
//!
//! A container is a JSON document carrying everything needed to decrypt a
//! file except the secret:
//!
//! ```json
//! {
//!   "passwordOptions": { "salt": "<base64>", "iterations": 10000, "length": 256 },
//!   "authenticatedData": "optional cleartext",
//!   "nonce": "<base64, 12 bytes>",
//!   "tag": "<base64, 16 bytes>",
//!   "data": "<base64 ciphertext>"
//! }
//! ```
//!
//! `passwordOptions` and `authenticatedData` are omitted when absent. A
//! missing `passwordOptions` means the file was sealed with a raw key file.
//! Binary fields use standard base64 with padding. An empty
//! `authenticatedData` string is kept as written; AES-GCM authenticates it
//! the same as no associated data.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::crypto::kdf::{validate_iterations, validate_salt_bits};
use crate::crypto::{KeyLength, PasswordParams, NONCE_LEN, TAG_LEN};
use crate::error::{FialkaError, Result};

/// How the key for a container is obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMode {
    /// Key is derived from a password with these parameters
    PasswordDerived(PasswordParams),
    /// Key is read from a raw key file
    RawKey,
}

/// A decoded encrypted container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub key_mode: KeyMode,
    /// Cleartext that is authenticated but not encrypted
    pub associated_data: Option<String>,
    pub nonce: [u8; NONCE_LEN],
    pub tag: [u8; TAG_LEN],
    pub ciphertext: Vec<u8>,
}

impl Container {
    /// Associated data as the bytes fed to the AEAD.
    pub fn associated_data_bytes(&self) -> Option<&[u8]> {
        self.associated_data.as_deref().map(str::as_bytes)
    }

    pub fn password_params(&self) -> Option<&PasswordParams> {
        match &self.key_mode {
            KeyMode::PasswordDerived(params) => Some(params),
            KeyMode::RawKey => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContainerRecord {
    #[serde(default, alias = "PasswordOptions", skip_serializing_if = "Option::is_none")]
    password_options: Option<PasswordOptionsRecord>,
    #[serde(default, alias = "AuthenticatedData", skip_serializing_if = "Option::is_none")]
    authenticated_data: Option<String>,
    #[serde(alias = "Nonce")]
    nonce: String,
    #[serde(alias = "Tag")]
    tag: String,
    #[serde(alias = "Data")]
    data: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct PasswordOptionsRecord {
    #[serde(alias = "Salt")]
    salt: String,
    #[serde(alias = "Iterations")]
    iterations: u32,
    #[serde(alias = "Length")]
    length: u32,
}

/// Serialize a container to pretty-printed JSON.
pub fn serialize(container: &Container) -> Result<String> {
    let record = ContainerRecord {
        password_options: container
            .password_params()
            .map(|params| PasswordOptionsRecord {
                salt: STANDARD.encode(&params.salt),
                iterations: params.iterations,
                length: params.length.bits(),
            }),
        authenticated_data: container.associated_data.clone(),
        nonce: STANDARD.encode(container.nonce),
        tag: STANDARD.encode(container.tag),
        data: STANDARD.encode(&container.ciphertext),
    };
    Ok(serde_json::to_string_pretty(&record)?)
}

/// Parse container text.
///
/// # Errors
///
/// Returns `FialkaError::Format` for malformed JSON or base64, a missing
/// `nonce`, `tag` or `data` field, wrong nonce or tag sizes, or invalid
/// password parameters.
pub fn deserialize(text: &str) -> Result<Container> {
    let record: ContainerRecord = serde_json::from_str(text)?;

    let key_mode = match record.password_options {
        Some(options) => KeyMode::PasswordDerived(decode_password_options(options)?),
        None => KeyMode::RawKey,
    };

    Ok(Container {
        key_mode,
        associated_data: record.authenticated_data,
        nonce: decode_fixed("nonce", &record.nonce)?,
        tag: decode_fixed("tag", &record.tag)?,
        ciphertext: decode_field("data", &record.data)?,
    })
}

fn decode_password_options(options: PasswordOptionsRecord) -> Result<PasswordParams> {
    let salt = decode_field("passwordOptions.salt", &options.salt)?;
    let salt_bits = u32::try_from(salt.len() * 8).unwrap_or(u32::MAX);
    validate_salt_bits(salt_bits)
        .map_err(|e| FialkaError::Format(format!("passwordOptions.salt: {}", e)))?;
    validate_iterations(options.iterations)
        .map_err(|e| FialkaError::Format(format!("passwordOptions.iterations: {}", e)))?;
    let length = KeyLength::from_bits(options.length)
        .map_err(|e| FialkaError::Format(format!("passwordOptions.length: {}", e)))?;
    Ok(PasswordParams {
        salt,
        iterations: options.iterations,
        length,
    })
}

fn decode_field(name: &str, value: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(value)
        .map_err(|e| FialkaError::Format(format!("{} is not valid base64: {}", name, e)))
}

fn decode_fixed<const N: usize>(name: &str, value: &str) -> Result<[u8; N]> {
    let bytes = decode_field(name, value)?;
    bytes.as_slice().try_into().map_err(|_| {
        FialkaError::Format(format!(
            "{} must be {} bytes (got {})",
            name,
            N,
            bytes.len()
        ))
    })
}
