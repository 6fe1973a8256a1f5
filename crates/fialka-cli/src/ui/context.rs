//! UI context for environment detection and configuration.

use std::io::IsTerminal;

/// Terminal and environment context for UI decisions.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether color output is enabled
    pub color: bool,
    /// Whether unicode symbols are enabled
    pub unicode: bool,
    /// Suppress progress output
    pub quiet: bool,
}

impl UiContext {
    /// Create context from environment and CLI flags.
    pub fn from_env(quiet: bool) -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        let no_color_env = std::env::var_os("NO_COLOR").is_some();

        Self::resolve(is_tty, term_is_dumb, no_color_env, quiet)
    }

    fn resolve(is_tty: bool, term_is_dumb: bool, no_color_env: bool, quiet: bool) -> Self {
        Self {
            // NO_COLOR and TERM=dumb only affect color on a TTY
            color: is_tty && !no_color_env && !term_is_dumb,
            unicode: is_tty && !term_is_dumb,
            quiet,
        }
    }

    /// Whether decorated output (colors, unicode badges) is in use.
    pub fn is_pretty(&self) -> bool {
        self.unicode
    }
}
