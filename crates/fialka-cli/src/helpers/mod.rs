//! Helper functions for the CLI.
//!
//! This module contains:
//! - `prompt`: terminal password prompt used by the pipelines
//! - `paths`: default output path derivation

mod paths;
mod prompt;

pub use paths::{default_decrypt_output, default_encrypt_output};
pub use prompt::TerminalPrompt;
