//! Configuration management for minutes generation.
//!
//! The engine's template vocabulary (roster entry style, fallback markers,
//! template-specific quirks) is configurable through a TOML file. Every
//! section and key is optional; anything left out keeps the built-in default
//! that matches the shipped template family.
//!
//! # Discovery
//!
//! [`MinutesConfig::discover`] looks for a configuration in this order:
//!
//! 1. An explicit path (the `--config` CLI flag)
//! 2. The `MINUTES_CONFIG` environment variable
//! 3. `minutes.toml` in the current directory
//! 4. `<config dir>/minutes/config.toml` (e.g. `~/.config/minutes/config.toml`)
//!
//! An explicitly named file must exist and parse. Optional locations that do
//! not exist are skipped, and when nothing is found the defaults apply.
//!
//! # Example
//!
//! ```toml
//! [roster]
//! honorific = "Mr."
//! identifier_label = "DIN"
//! placeholder = "[from MCA]"
//!
//! [fallbacks]
//! attendance = "[Authorised Officer to be added]"
//!
//! [template]
//! stale_chairman_surname = "Mehta"
//! headings = ["BOARD OF DIRECTORS MEETING"]
//! ```

pub mod parser;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    ATTENDANCE_FALLBACK, CONFIG_ENV_VAR, CONFIG_FILE_NAME, DEFAULT_HEADINGS, DEFAULT_HONORIFIC,
    DEFAULT_IDENTIFIER_LABEL, DEFAULT_STALE_CHAIRMAN_SURNAME, ROSTER_PLACEHOLDER,
};

pub use parser::parse_config;

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinutesConfig {
    pub roster: RosterConfig,
    pub fallbacks: FallbackConfig,
    pub template: TemplateConfig,
}

/// How person entries are written and which token marks a roster slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Prefix written before every person name (`"Mr."`). Empty disables it.
    pub honorific: String,
    /// Label written before the identifier inside the parentheses (`"DIN"`).
    pub identifier_label: String,
    /// Generic roster placeholder in the template (`"[from MCA]"`).
    pub placeholder: String,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            honorific: DEFAULT_HONORIFIC.to_string(),
            identifier_label: DEFAULT_IDENTIFIER_LABEL.to_string(),
            placeholder: ROSTER_PLACEHOLDER.to_string(),
        }
    }
}

/// Text written when the record has nothing to put in a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Replaces the attendance `[Manual]` slot when no attendee is supplied.
    pub attendance: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            attendance: ATTENDANCE_FALLBACK.to_string(),
        }
    }
}

/// Quirks of the template family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Sample surname hard-coded in the template that stands for the chairman.
    /// Empty disables the replacement.
    pub stale_chairman_surname: String,
    /// Heading phrases collapsed when duplicated back to back.
    pub headings: Vec<String>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            stale_chairman_surname: DEFAULT_STALE_CHAIRMAN_SURNAME.to_string(),
            headings: DEFAULT_HEADINGS.iter().map(|h| (*h).to_string()).collect(),
        }
    }
}

impl MinutesConfig {
    /// Load configuration, searching the standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly requested file (argument or
    /// `MINUTES_CONFIG`) is missing, or if any file found fails to parse.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Self::load(Path::new(&path));
        }

        for candidate in Self::search_paths() {
            if candidate.is_file() {
                tracing::debug!("Using configuration from {}", candidate.display());
                return Self::load(&candidate);
            }
        }

        tracing::debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load(path: &Path) -> Result<Self> {
        parse_config(path)
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("minutes").join("config.toml"));
        }
        paths
    }
}
