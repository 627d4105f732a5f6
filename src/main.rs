//! Minutes CLI entry point
//!
//! This is the main executable for the meeting-minutes generator. It handles
//! command-line argument parsing, error display, and command execution.
//!
//! The CLI supports these commands:
//! - `render` - Resolve a template document for an input record
//! - `scan` - List the placeholders in a template document
//! - `rules` - Print the rule table built for an input record

use anyhow::Result;
use clap::Parser;
use minutes_cli::cli;
use minutes_cli::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
