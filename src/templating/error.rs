//! Formatting errors for the placeholder-resolution engine.
//!
//! These errors never escape a generation run: the rule table builder catches
//! them, logs a warning and substitutes the raw input value instead.

use thiserror::Error;

/// A record value could not be turned into its document form.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The value is not an ISO `YYYY-MM-DD` date.
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The value is not a non-negative whole amount.
    #[error("Invalid amount '{value}': expected a whole number")]
    InvalidAmount {
        value: String,
    },
}

impl FormatError {
    /// The raw value that failed to format.
    pub fn value(&self) -> &str {
        match self {
            FormatError::InvalidDate {
                value,
                ..
            }
            | FormatError::InvalidAmount {
                value,
            } => value,
        }
    }
}
