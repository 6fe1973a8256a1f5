//! # Fialka Core
//!
//! Core library for Fialka - file-level authenticated encryption with
//! AES-GCM, keyed either by a password or by a raw key file.
//!
//! This crate holds the cryptography, the container format and the
//! encrypt/decrypt pipelines, independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **crypto**: key material, PBKDF2 derivation, AES-GCM sealing
//! - **container**: the JSON document written to disk
//! - **pipeline**: end-to-end encrypt and decrypt operations
//! - **traits**: injected collaborators (files, prompts, randomness)
//! - **fs**: local filesystem collaborator with atomic writes

pub mod container;
pub mod crypto;
pub mod error;
pub mod fs;
pub mod pipeline;
pub mod traits;

#[cfg(test)]
mod testing;

pub use container::{Container, KeyMode};
pub use error::{ErrorKind, FialkaError, Result};
pub use fs::LocalFileStore;
pub use traits::{FileStore, RandomSource, SecretPrompt};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
