//! End-to-end encrypt and decrypt operations.
//!
//! Each pipeline takes an explicit request struct plus the injected
//! [`Collaborators`] and runs start to finish. Key material lives only for the
//! duration of one call.

mod decrypt;
mod encrypt;

pub use decrypt::{decrypt_file, open, resolve_decrypt_key, DecryptReport, DecryptRequest};
pub use encrypt::{
    encrypt_file, read_confirmed_password, resolve_encrypt_key, seal, EncryptReport,
    EncryptRequest, EncryptSecret, KeyResolution, PasswordSettings,
};

use crate::traits::{FileStore, RandomSource, SecretPrompt};

/// Prompt messages shown by the pipelines.
pub mod prompts {
    pub const ENCRYPT_PASSWORD: &str = "Enter encryption password";
    pub const CONFIRM_PASSWORD: &str = "Confirm encryption password";
    pub const DECRYPT_PASSWORD: &str = "Enter decryption password";
}

/// External capabilities a pipeline run needs.
pub struct Collaborators<'a> {
    pub files: &'a mut dyn FileStore,
    pub prompt: &'a mut dyn SecretPrompt,
    pub random: &'a mut dyn RandomSource,
}
