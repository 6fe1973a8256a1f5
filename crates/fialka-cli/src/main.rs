//! Fialka CLI - file encryption with AES-GCM
//!
//! This is the command-line interface for Fialka. It parses options, wires
//! the terminal, filesystem and OS random source into the core pipelines and
//! maps failures to exit codes.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod ui;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{decrypt, encrypt, misc};
use crate::constants::LOG_ENV;
use crate::errors::CliError;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        CliError::from_anyhow(e).exit();
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Encrypt(args) => encrypt::handle_encrypt(ctx, args),
        Commands::Decrypt(args) => decrypt::handle_decrypt(ctx, args),
        Commands::Completions(args) => misc::handle_completions(args),
    }
}

/// Install the stderr log subscriber.
///
/// FIALKA_LOG, then RUST_LOG, wins over `-v`; without either the level
/// comes from the flag count (warn, debug, trace).
fn init_tracing(verbose: u8) {
    let filter = std::env::var(LOG_ENV)
        .ok()
        .and_then(|value| EnvFilter::try_new(value).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(default_level(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}
