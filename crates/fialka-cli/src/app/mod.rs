//! Application-level utilities for the Fialka CLI.
//!
//! This module provides:
//! - Application context for unified CLI + config handling
//! - Option validation turning parsed flags into pipeline requests

mod context;
mod options;

pub use context::AppContext;
pub use options::{validate_decrypt_options, validate_encrypt_options, DecryptOptions, EncryptOptions};
