//! Application context for the Fialka CLI.

use std::io::IsTerminal;

use crate::cli::Cli;
use crate::config::{load_config, FialkaConfig};
use crate::helpers::TerminalPrompt;
use crate::ui::UiContext;

/// Application context that bundles CLI args with the loaded configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self { cli }
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Whether prompts may be shown.
    pub fn interactive(&self) -> bool {
        !self.cli.no_input && std::io::stdin().is_terminal()
    }

    /// Load the configuration file, or defaults when there is none.
    pub fn config(&self) -> anyhow::Result<FialkaConfig> {
        load_config()
    }

    pub fn ui_context(&self) -> UiContext {
        UiContext::from_env(self.quiet())
    }

    pub fn prompt(&self) -> TerminalPrompt {
        TerminalPrompt::from_env(self.interactive())
    }
}
