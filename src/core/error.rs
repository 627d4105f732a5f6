//! Error handling for the minutes CLI
//!
//! This module provides the error type for everything outside the engine and
//! user-friendly error reporting for the command line. The engine itself never
//! fails on content: bad values fall back to their raw form and leftover
//! placeholders are reported as diagnostics. What can fail is the host side:
//! reading configuration, records and documents, and finding templates.
//!
//! # Architecture
//!
//! - [`MinutesError`] - Enumerated error types for host-side failures
//! - [`ErrorContext`] - Wrapper that adds details and an actionable suggestion
//! - [`user_friendly_error`] - Maps any [`anyhow::Error`] to an [`ErrorContext`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use minutes_cli::core::{MinutesError, user_friendly_error};
//!
//! let error = MinutesError::TemplateNotFound {
//!     template: "Q1".to_string(),
//!     tried: vec!["q1_meeting_template.json".to_string()],
//!     available: vec![],
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows coloured error with suggestion
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for host-side minutes operations.
#[derive(Error, Debug)]
pub enum MinutesError {
    /// A configuration file exists but is not valid TOML for [`crate::config::MinutesConfig`].
    #[error("Invalid configuration file {file}: {reason}")]
    ConfigParse {
        file: String,
        reason: String,
    },

    /// The input record could not be parsed.
    #[error("Invalid input record {file}: {reason}")]
    RecordParse {
        file: String,
        reason: String,
    },

    /// The input record parsed but failed validation.
    #[error("Input record failed validation ({} problem(s))", problems.len())]
    InvalidRecord {
        problems: Vec<String>,
    },

    /// The document node list could not be parsed.
    #[error("Invalid document {file}: {reason}")]
    DocumentParse {
        file: String,
        reason: String,
    },

    /// No template document exists for the requested template id.
    #[error("Template file for '{template}' not found")]
    TemplateNotFound {
        template: String,
        tried: Vec<String>,
        available: Vec<String>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{message}")]
    Other {
        message: String,
    },
}

/// Error with user-facing details and a suggestion.
#[derive(Debug)]
pub struct ErrorContext {
    /// The headline message
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable suggestion, shown in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error, shown in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with terminal colours.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with a suggestion where one is known.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(minutes_error) = error.downcast_ref::<MinutesError>() {
        return create_error_context(minutes_error, &error);
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::NotFound {
            return ErrorContext::new(error.to_string())
                .with_details(io_error.to_string())
                .with_suggestion("Check that the file exists and the path is correct");
        }
    }

    ErrorContext::new(error.to_string()).with_details(chain_details(&error))
}

fn chain_details(error: &anyhow::Error) -> String {
    error.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>().join(": ")
}

fn create_error_context(minutes_error: &MinutesError, error: &anyhow::Error) -> ErrorContext {
    let headline = error.to_string();
    match minutes_error {
        MinutesError::ConfigParse {
            ..
        } => ErrorContext::new(headline)
            .with_details(minutes_error.to_string())
            .with_suggestion(
                "Check the TOML syntax; valid sections are [roster], [fallbacks] and [template]",
            ),
        MinutesError::RecordParse {
            ..
        } => ErrorContext::new(headline).with_details(minutes_error.to_string()).with_suggestion(
            "Records are camelCase JSON objects, e.g. {\"companyName\": \"...\", \"presentDirectors\": []}",
        ),
        MinutesError::InvalidRecord {
            problems,
        } => ErrorContext::new(headline)
            .with_details(problems.join("\n"))
            .with_suggestion("Fix the listed fields or pass --skip-validation to render anyway"),
        MinutesError::DocumentParse {
            ..
        } => ErrorContext::new(headline)
            .with_details(minutes_error.to_string())
            .with_suggestion("Documents are JSON objects of the form {\"nodes\": [{\"kind\": \"paragraph\", \"text\": \"...\"}]}"),
        MinutesError::TemplateNotFound {
            tried,
            available,
            ..
        } => {
            let details = if available.is_empty() {
                format!("Tried: {}. No templates are available.", tried.join(", "))
            } else {
                format!("Tried: {}. Available templates: {}", tried.join(", "), available.join(", "))
            };
            ErrorContext::new(headline)
                .with_details(details)
                .with_suggestion("Pass --templates-dir pointing at the template folder, or --document with an explicit file")
        }
        MinutesError::Io(_)
        | MinutesError::Json(_)
        | MinutesError::Other {
            ..
        } => ErrorContext::new(headline).with_details(chain_details(error)),
    }
}
