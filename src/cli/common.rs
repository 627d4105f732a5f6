//! Helpers shared by the CLI commands.

use anyhow::{Context, Result};
use std::path::Path;

use crate::core::MinutesError;
use crate::models::InputRecord;

/// Output format for command results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with colours.
    #[default]
    Text,
    /// Pretty-printed JSON on stdout.
    Json,
}

/// Read an input record from a JSON file.
pub fn load_record(path: &Path) -> Result<InputRecord> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input record: {}", path.display()))?;
    let record = serde_json::from_str(&content).map_err(|e| MinutesError::RecordParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(record)
}

/// Reject a record that fails validation unless the caller opted out.
pub fn check_record(record: &InputRecord, skip_validation: bool) -> Result<()> {
    if skip_validation {
        return Ok(());
    }
    let problems = record.validate();
    if problems.is_empty() {
        Ok(())
    } else {
        Err(MinutesError::InvalidRecord {
            problems,
        }
        .into())
    }
}
