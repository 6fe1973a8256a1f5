//! Collaborator traits consumed by the pipelines.
//!
//! The pipelines never touch the filesystem, the terminal or the operating
//! system's random source directly. Callers inject implementations of these
//! traits, which keeps the pipelines deterministic under test.

use std::path::Path;

use secrecy::SecretString;

use crate::error::Result;

/// Byte and text storage for input, output and key files.
pub trait FileStore {
    /// Read the whole file as bytes.
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>>;

    /// Replace the file with `bytes`.
    fn write_bytes(&mut self, path: &Path, bytes: &[u8]) -> Result<()>;

    /// Read the whole file as UTF-8 text.
    fn read_text(&self, path: &Path) -> Result<String>;

    /// Replace the file with `text`.
    fn write_text(&mut self, path: &Path, text: &str) -> Result<()>;

    /// Replace the file with raw key bytes.
    ///
    /// Implementations backed by a real filesystem should restrict the file to
    /// its owner.
    fn write_key(&mut self, path: &Path, key: &[u8]) -> Result<()> {
        self.write_bytes(path, key)
    }

    /// Whether a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;
}

/// Masked interactive secret entry.
pub trait SecretPrompt {
    /// Show `message` and read one secret line without echoing it.
    ///
    /// # Errors
    ///
    /// Returns `FialkaError::InvalidInput` when no interactive input is
    /// available.
    fn prompt_secret(&mut self, message: &str) -> Result<SecretString>;
}

/// Cryptographically secure random bytes.
///
/// Implementations must never be a counter or otherwise predictable: nonces
/// and salts are drawn from here.
pub trait RandomSource {
    /// Fill `buf` entirely with random bytes.
    fn fill_bytes(&mut self, buf: &mut [u8]) -> Result<()>;
}
