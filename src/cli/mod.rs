//! Command-line interface for the minutes generator.
//!
//! # Available Commands
//!
//! - `render` - Resolve a template document for an input record and write the result
//! - `scan` - List the placeholders a template document contains
//! - `rules` - Print the ordered rule table built for an input record
//!
//! # Basic Workflow
//!
//! ```bash
//! # See what a template expects
//! minutes scan --document templates/q1_meeting_template.json
//!
//! # Inspect the rules a record produces
//! minutes rules --record meeting.json
//!
//! # Generate the minutes
//! minutes render --record meeting.json --templates-dir templates
//! ```
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Only log errors
//! - `--config` - Path to a `minutes.toml` configuration file
//!
//! Logs go to stderr. Command output (including `--format json`) goes to
//! stdout so it can be piped.

mod common;
pub mod render;
pub mod rules;
pub mod scan;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::MinutesConfig;

pub use common::OutputFormat;

/// Runtime configuration derived from the global flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter directive; `None` defers to `RUST_LOG`, then `info`.
    pub log_level: Option<String>,
    /// Explicit configuration file, overriding discovery.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// The log filter these settings select.
    pub fn env_filter(&self) -> EnvFilter {
        match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        }
    }

    /// Install the stderr log subscriber. Later calls are no-ops.
    pub fn init_tracing(&self) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(self.env_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Load the minutes configuration these settings point at.
    pub fn load_config(&self) -> Result<MinutesConfig> {
        MinutesConfig::discover(self.config_path.as_deref())
    }
}

/// Generate meeting minutes from a template document and an input record.
#[derive(Parser, Debug)]
#[command(
    name = "minutes",
    about = "Generate meeting minutes by resolving template placeholders",
    version,
    long_about = "Resolves the placeholders of a meeting-minutes template document against a \
                  structured input record and reports any placeholders left unresolved."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a configuration file (overrides MINUTES_CONFIG and minutes.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a template document for an input record
    Render(render::RenderCommand),

    /// List the placeholders in a template document
    Scan(scan::ScanCommand),

    /// Print the rule table built for an input record
    Rules(rules::RulesCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_tracing();

        match self.command {
            Commands::Render(cmd) => cmd.execute(&config.load_config()?).await,
            Commands::Scan(cmd) => cmd.execute().await,
            Commands::Rules(cmd) => cmd.execute(&config.load_config()?).await,
        }
    }
}
