//! Key material and the parameters it was derived from.

use std::fmt;

use zeroize::Zeroizing;

use crate::error::{FialkaError, Result};

/// Supported AES key sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyLength {
    /// AES-128
    Bits128,
    /// AES-256
    #[default]
    Bits256,
}

impl KeyLength {
    /// Key size in bits.
    pub const fn bits(self) -> u32 {
        match self {
            KeyLength::Bits128 => 128,
            KeyLength::Bits256 => 256,
        }
    }

    /// Key size in bytes.
    pub const fn bytes(self) -> usize {
        self.bits() as usize / 8
    }

    /// Parse a bit length, accepting only 128 and 256.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            128 => Ok(KeyLength::Bits128),
            256 => Ok(KeyLength::Bits256),
            other => Err(FialkaError::InvalidInput(format!(
                "Key length must be 128 or 256 bits (got {})",
                other
            ))),
        }
    }

    /// Map a raw key size in bytes to a supported length.
    pub fn from_byte_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(KeyLength::Bits128),
            32 => Some(KeyLength::Bits256),
            _ => None,
        }
    }
}

impl fmt::Display for KeyLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// Password-based derivation parameters persisted in a container.
///
/// The salt is not secret; it is stored next to the ciphertext so the same
/// key can be derived again on decrypt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordParams {
    pub salt: Vec<u8>,
    pub iterations: u32,
    pub length: KeyLength,
}

/// How a [`KeyMaterial`] was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Derived from a password with these parameters
    Password(PasswordParams),
    /// Read from (or generated into) a raw key file
    RawKeyFile,
}

/// A resolved symmetric key.
///
/// The key bytes are zeroized when this value is dropped and never appear in
/// `Debug` output.
pub struct KeyMaterial {
    bytes: Zeroizing<Vec<u8>>,
    length: KeyLength,
    source: KeySource,
}

impl KeyMaterial {
    /// Wrap raw key bytes, checking them against `length`.
    pub(crate) fn new(
        bytes: Zeroizing<Vec<u8>>,
        length: KeyLength,
        source: KeySource,
    ) -> Result<Self> {
        if bytes.len() != length.bytes() {
            return Err(FialkaError::key_length(bytes.len(), length.to_string()));
        }
        Ok(Self {
            bytes,
            length,
            source,
        })
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn length(&self) -> KeyLength {
        self.length
    }

    pub fn source(&self) -> &KeySource {
        &self.source
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("bytes", &"[REDACTED]")
            .field("length", &self.length)
            .field("source", &self.source)
            .finish()
    }
}
