//! Cryptographic operations for Fialka.
//!
//! This module provides key derivation and authenticated encryption using
//! audited RustCrypto implementations:
//! - **PBKDF2-HMAC-SHA1**: password-based key derivation
//! - **AES-GCM**: 128- or 256-bit keys, 96-bit nonce, 128-bit tag
//!
//! ## Security Model
//!
//! - Keys are held in zeroizing buffers and never logged
//! - Only derivation parameters are persisted, never a key or password
//! - Every encryption draws a fresh random nonce
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the encrypted file
//! - Undetected modification of ciphertext, nonce, tag or associated data
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Weak passwords (PBKDF2 only slows guessing down)

pub mod aead;
pub mod kdf;
pub mod key;
mod random;

pub use aead::{generate_nonce, Sealed, NONCE_LEN, TAG_LEN};
pub use kdf::{
    derive_from_password, generate_random_key, generate_salt, key_from_file_bytes,
    validate_key_file_bytes, DEFAULT_ITERATIONS, DEFAULT_SALT_BITS, MIN_ITERATIONS,
};
pub use key::{KeyLength, KeyMaterial, KeySource, PasswordParams};
pub use random::OsRandom;
