//! TOML parsing helper with error context.

use anyhow::{Context, Result};
use std::path::Path;

use crate::core::MinutesError;

/// Read and deserialize a TOML file.
///
/// Read failures keep the underlying I/O error as context; syntax errors are
/// reported as [`MinutesError::ConfigParse`] naming the file.
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: T = toml::from_str(&content).map_err(|e| MinutesError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;

    Ok(config)
}
