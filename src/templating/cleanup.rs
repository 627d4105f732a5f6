//! Cleanup passes that repair substitution artifacts.
//!
//! Overlapping rules and template quirks leave a small set of known
//! artifacts behind. Each artifact kind is one row of a declarative table:
//! a regex trigger plus an [`ArtifactKind`] that says how a match is repaired.
//! [`Cleanup::apply`] runs the table in order and repeats until the text
//! stops changing, so `apply(apply(s)) == apply(s)` for every input.

use regex::{Captures, Regex};
use std::fmt;

use super::roster::EntryStyle;

/// The artifacts cleanup knows how to repair, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// `Mr. Mr. Name (DIN: x) (DIN: Mr. Name (DIN: x))` from two rules firing on one entry.
    DuplicatePersonEntry,
    /// `1. 1. Mr. Name (DIN: x)` from a numbered slot inside a numbered paragraph.
    DuplicateNumbering,
    /// `20___` / `20____` left after every specific year rule.
    YearPlaceholder,
    /// Runs of spaces.
    RepeatedSpaces,
    /// A heading phrase inserted twice back to back.
    DuplicateHeading,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactKind::DuplicatePersonEntry => "duplicate person entry",
            ArtifactKind::DuplicateNumbering => "duplicate numbering",
            ArtifactKind::YearPlaceholder => "year placeholder",
            ArtifactKind::RepeatedSpaces => "repeated spaces",
            ArtifactKind::DuplicateHeading => "duplicate heading",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
struct Pass {
    kind: ArtifactKind,
    trigger: Regex,
}

/// The cleanup table for one generation run.
#[derive(Debug, Clone)]
pub struct Cleanup {
    passes: Vec<Pass>,
    honorific: String,
    identifier_label: String,
    fiscal_year: Option<String>,
}

impl Cleanup {
    pub fn new(style: &EntryStyle, fiscal_year: Option<u32>, headings: &[String]) -> Self {
        let h = regex::escape(style.honorific());
        let l = regex::escape(style.identifier_label());

        let mut table: Vec<(ArtifactKind, String)> = Vec::new();
        if !style.honorific().is_empty() {
            table.push((
                ArtifactKind::DuplicatePersonEntry,
                format!(
                    r"(?i){h}\s+{h}\s+([^(]+?)\s+\({l}:\s+([^)]+)\)\s+\({l}:\s+{h}\s+([^(]+?)\s+\({l}:\s+([^)]+)\)\)"
                ),
            ));
        }
        let entry = if style.honorific().is_empty() {
            format!(r"[^(\n]+?\s*\({l}:\s*[^)\n]+\)")
        } else {
            format!(r"{h}\s+[^(\n]+?\s*\({l}:\s*[^)\n]+\)")
        };
        table.push((ArtifactKind::DuplicateNumbering, format!(r"(\d+)\.(?:[ \t]+\d+\.)+([ \t]+)({entry})")));
        if fiscal_year.is_some() {
            table.push((ArtifactKind::YearPlaceholder, "20_{3,4}".to_string()));
        }
        table.push((ArtifactKind::RepeatedSpaces, " {2,}".to_string()));
        for heading in headings.iter().map(|h| h.trim()).filter(|h| !h.is_empty()) {
            let phrase = regex::escape(heading).replace(r"\ ", r"\s+").replace(' ', r"\s+");
            table.push((ArtifactKind::DuplicateHeading, format!(r"(?i)({phrase})(?:\s+{phrase})+")));
        }

        let passes = table
            .into_iter()
            .filter_map(|(kind, pattern)| match Regex::new(&pattern) {
                Ok(trigger) => Some(Pass {
                    kind,
                    trigger,
                }),
                Err(e) => {
                    tracing::warn!("Dropping {kind} cleanup pass: {e}");
                    None
                }
            })
            .collect();

        Self {
            passes,
            honorific: style.honorific().to_string(),
            identifier_label: style.identifier_label().to_string(),
            fiscal_year: fiscal_year.map(|y| y.to_string()),
        }
    }

    /// Artifact kinds in table order.
    pub fn kinds(&self) -> impl Iterator<Item = ArtifactKind> + '_ {
        self.passes.iter().map(|p| p.kind)
    }

    /// Run every pass until the text is stable.
    ///
    /// Terminates: a year repair removes underscores and adds none, and every
    /// other repair shrinks the text without adding underscores.
    pub fn apply(&self, text: &str) -> String {
        let mut current = text.to_string();
        let mut sweeps = 1;
        loop {
            let next = self.sweep(&current);
            if next == current {
                break;
            }
            current = next;
            sweeps += 1;
        }
        tracing::trace!("Cleanup settled after {sweeps} sweep(s)");
        current
    }

    fn sweep(&self, text: &str) -> String {
        let mut current = text.to_string();
        for pass in &self.passes {
            if !pass.trigger.is_match(&current) {
                continue;
            }
            current = pass.trigger.replace_all(&current, |caps: &Captures<'_>| self.repair(pass.kind, caps)).into_owned();
        }
        current
    }

    fn repair(&self, kind: ArtifactKind, caps: &Captures<'_>) -> String {
        match kind {
            ArtifactKind::DuplicatePersonEntry => {
                let (name, id) = (caps[1].trim(), caps[2].trim());
                if name == caps[3].trim() && id == caps[4].trim() {
                    format!("{} {name} ({}: {id})", self.honorific, self.identifier_label)
                } else {
                    caps[0].to_string()
                }
            }
            ArtifactKind::DuplicateNumbering => {
                let separator = if caps[2].contains('\t') { "\t" } else { " " };
                format!("{}.{separator}{}", &caps[1], &caps[3])
            }
            ArtifactKind::YearPlaceholder => match &self.fiscal_year {
                Some(year) => year.clone(),
                None => caps[0].to_string(),
            },
            ArtifactKind::RepeatedSpaces => " ".to_string(),
            ArtifactKind::DuplicateHeading => caps[1].to_string(),
        }
    }
}
