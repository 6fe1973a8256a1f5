//! Key derivation and key-file validation.
//!
//! Passwords are stretched with PBKDF2-HMAC-SHA1. SHA-1 is the PRF the
//! container format has always used; PBKDF2 security does not depend on SHA-1
//! collision resistance, and changing it would break existing files.

use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use zeroize::Zeroizing;

use super::key::{KeyLength, KeyMaterial, KeySource, PasswordParams};
use crate::error::{FialkaError, Result};
use crate::traits::RandomSource;

/// Default PBKDF2 iteration count for new containers.
pub const DEFAULT_ITERATIONS: u32 = 10_000;

/// Lowest accepted PBKDF2 iteration count.
pub const MIN_ITERATIONS: u32 = 1_000;

/// Default salt length for new containers, in bits.
pub const DEFAULT_SALT_BITS: u32 = 128;

/// Accepted salt lengths, in bits.
pub const MIN_SALT_BITS: u32 = 128;
pub const MAX_SALT_BITS: u32 = 1024;

/// Derive a key from a password.
///
/// Same password, salt, iteration count and length always yield the same key.
///
/// # Errors
///
/// - `FialkaError::EmptyPassword` if the password is empty
/// - `FialkaError::InvalidInput` if the salt is empty or `iterations` is
///   below [`MIN_ITERATIONS`]
///
/// # Examples
///
/// ```
/// use fialka_core::crypto::{derive_from_password, KeyLength};
///
/// let salt = [7u8; 16];
/// let key = derive_from_password("my-password", &salt, 1000, KeyLength::Bits128).unwrap();
/// assert_eq!(key.as_bytes().len(), 16);
/// ```
pub fn derive_from_password(
    password: &str,
    salt: &[u8],
    iterations: u32,
    length: KeyLength,
) -> Result<KeyMaterial> {
    if password.is_empty() {
        return Err(FialkaError::EmptyPassword);
    }
    if salt.is_empty() {
        return Err(FialkaError::InvalidInput("Salt cannot be empty".to_string()));
    }
    validate_iterations(iterations)?;

    let mut key = Zeroizing::new(vec![0u8; length.bytes()]);
    pbkdf2_hmac::<Sha1>(password.as_bytes(), salt, iterations, key.as_mut_slice());

    tracing::debug!(
        iterations,
        bits = length.bits(),
        salt_bytes = salt.len(),
        "derived key from password"
    );

    KeyMaterial::new(
        key,
        length,
        KeySource::Password(PasswordParams {
            salt: salt.to_vec(),
            iterations,
            length,
        }),
    )
}

/// Check an iteration count against [`MIN_ITERATIONS`].
pub fn validate_iterations(iterations: u32) -> Result<()> {
    if iterations < MIN_ITERATIONS {
        return Err(FialkaError::InvalidInput(format!(
            "Iteration count must be at least {} (got {})",
            MIN_ITERATIONS, iterations
        )));
    }
    Ok(())
}

/// Check a salt length in bits: a whole number of bytes within the accepted range.
pub fn validate_salt_bits(length_bits: u32) -> Result<()> {
    if length_bits % 8 != 0 {
        return Err(FialkaError::InvalidInput(format!(
            "Salt length must be divisible by 8 (got {})",
            length_bits
        )));
    }
    if !(MIN_SALT_BITS..=MAX_SALT_BITS).contains(&length_bits) {
        return Err(FialkaError::InvalidInput(format!(
            "Salt length must be between {} and {} bits (got {})",
            MIN_SALT_BITS, MAX_SALT_BITS, length_bits
        )));
    }
    Ok(())
}

/// Generate a random salt of `length_bits` bits.
pub fn generate_salt(length_bits: u32, random: &mut dyn RandomSource) -> Result<Vec<u8>> {
    validate_salt_bits(length_bits)?;
    let mut salt = vec![0u8; length_bits as usize / 8];
    random.fill_bytes(&mut salt)?;
    Ok(salt)
}

/// Generate a random key for a new key file.
pub fn generate_random_key(length: KeyLength, random: &mut dyn RandomSource) -> Result<KeyMaterial> {
    let mut key = Zeroizing::new(vec![0u8; length.bytes()]);
    random.fill_bytes(key.as_mut_slice())?;
    KeyMaterial::new(key, length, KeySource::RawKeyFile)
}

/// Accept key-file contents only if they are exactly `expected` long.
///
/// # Errors
///
/// Returns `FialkaError::KeyLength` reporting the bit length found. The bytes
/// are never truncated or padded.
pub fn validate_key_file_bytes(bytes: Vec<u8>, expected: KeyLength) -> Result<KeyMaterial> {
    let bytes = Zeroizing::new(bytes);
    if bytes.len() != expected.bytes() {
        return Err(FialkaError::key_length(bytes.len(), expected.to_string()));
    }
    KeyMaterial::new(bytes, expected, KeySource::RawKeyFile)
}

/// Accept key-file contents of either supported length, inferring which.
pub fn key_from_file_bytes(bytes: Vec<u8>) -> Result<KeyMaterial> {
    let bytes = Zeroizing::new(bytes);
    let length = KeyLength::from_byte_len(bytes.len())
        .ok_or_else(|| FialkaError::key_length(bytes.len(), "128 or 256"))?;
    KeyMaterial::new(bytes, length, KeySource::RawKeyFile)
}
