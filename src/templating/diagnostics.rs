//! Placeholder diagnostics collected over a generation run.
//!
//! A placeholder is any bracketed (`[Name of Company]`), angle-bracketed
//! (`<year>`) or underscore-run (`20____`, `____`) token. The collector records
//! every placeholder seen in a node before substitution as *observed*, and
//! every placeholder still present after cleanup as *unresolved*. Unresolved
//! placeholders are a report for the caller, never an error.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use super::rules::RuleTable;

const PLACEHOLDER_PATTERNS: &[&str] = &[r"\[[^\]]+\]", r"<[^>]+>", r"20_{3,4}", r"_{4}"];

/// Minimum normalized similarity for a rule token to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.5;

fn placeholder_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| PLACEHOLDER_PATTERNS.iter().filter_map(|p| Regex::new(p).ok()).collect())
}

/// Every placeholder-shaped substring of `text`, per pattern, in order.
pub fn find_placeholders(text: &str) -> Vec<String> {
    placeholder_patterns()
        .iter()
        .flat_map(|re| re.find_iter(text).map(|m| m.as_str().to_string()))
        .collect()
}

/// Observed and unresolved placeholders for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    pub observed: BTreeSet<String>,
    pub unresolved: BTreeSet<String>,
}

/// A near-miss suggestion for an unresolved placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub placeholder: String,
    pub closest: String,
    pub similarity: f64,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the placeholders present before substitution.
    pub fn observe(&mut self, text: &str) {
        self.observed.extend(find_placeholders(text));
    }

    /// Record the placeholders still present after cleanup.
    pub fn observe_unresolved(&mut self, text: &str) {
        self.unresolved.extend(find_placeholders(text));
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty() && self.unresolved.is_empty()
    }

    pub fn has_unresolved(&self) -> bool {
        !self.unresolved.is_empty()
    }

    /// Fold another run's diagnostics into this one.
    pub fn merge(&mut self, other: Diagnostics) {
        self.observed.extend(other.observed);
        self.unresolved.extend(other.unresolved);
    }

    /// Closest known rule token for each unresolved bracket or angle placeholder.
    ///
    /// Underscore runs carry no name and are never matched.
    pub fn suggestions(&self, rules: &RuleTable) -> Vec<Suggestion> {
        let tokens: BTreeSet<&str> = rules.literal_patterns().filter(|p| is_named_token(p)).collect();

        self.unresolved
            .iter()
            .filter(|p| is_named_token(p))
            .filter_map(|placeholder| {
                tokens
                    .iter()
                    .filter(|token| **token != placeholder.as_str())
                    .map(|token| (*token, strsim::normalized_levenshtein(placeholder, token)))
                    .filter(|(_, similarity)| *similarity >= SUGGESTION_THRESHOLD)
                    .max_by(|a, b| a.1.total_cmp(&b.1))
                    .map(|(token, similarity)| Suggestion {
                        placeholder: placeholder.clone(),
                        closest: token.to_string(),
                        similarity,
                    })
            })
            .collect()
    }
}

fn is_named_token(text: &str) -> bool {
    (text.starts_with('[') && text.ends_with(']')) || (text.starts_with('<') && text.ends_with('>'))
}
