//! UI primitives for the Fialka CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, color, unicode)
//! - **Theme**: Badge tokens and styles
//! - **Render**: Badges, key-value lines, step receipts
//! - **Format**: Byte sizes

mod context;
pub mod format;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use format::format_bytes;
pub use render::{badge, kv, print, steps};
pub use theme::Badge;
