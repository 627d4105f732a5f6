//! Enumerated-list rendering for director rosters.
//!
//! A roster is an ordered slice of [`Person`] entries. Each entry renders as
//! `"<honorific> <name> (<label>: <identifier>)"`, optionally followed by a
//! tab and a role label. Two labelling policies exist:
//!
//! - [`RolePolicy::Uniform`]: every entry gets the same label (or none).
//! - [`RolePolicy::FirstIsChairman`]: entry 0 is labelled `Chairman` when its
//!   name equals the record's chairman name; every other entry, and entry 0
//!   when it does not match, is labelled `Director`.
//!
//! Disclosure and declaration lists use the numbered form instead:
//! `"1.\t<entry>"` per person, separated by a blank line.

use crate::config::RosterConfig;
use crate::constants::{CHAIRMAN_ROLE, DIRECTOR_ROLE};
use crate::models::{Attendee, Person};

/// How entries of a roster are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolePolicy<'a> {
    /// Every entry gets the same label; `None` leaves entries unlabelled.
    Uniform(Option<&'a str>),
    /// Entry 0 is the chairman if its name matches exactly.
    FirstIsChairman {
        chairman_name: &'a str,
    },
}

impl<'a> RolePolicy<'a> {
    /// Label for the entry at `idx`.
    ///
    /// Only entry 0 can be the chairman, and only on an exact name match. A
    /// chairman listed anywhere else is labelled `Director` like everyone else.
    pub fn label_for(&self, idx: usize, person: &Person) -> Option<&'a str> {
        match *self {
            RolePolicy::Uniform(label) => label,
            RolePolicy::FirstIsChairman {
                chairman_name,
            } => {
                if idx == 0 && person.name == chairman_name {
                    Some(CHAIRMAN_ROLE)
                } else {
                    Some(DIRECTOR_ROLE)
                }
            }
        }
    }
}

/// Renders person entries in the configured style.
#[derive(Debug, Clone)]
pub struct EntryStyle {
    honorific: String,
    identifier_label: String,
}

impl EntryStyle {
    pub fn new(honorific: impl Into<String>, identifier_label: impl Into<String>) -> Self {
        Self {
            honorific: honorific.into(),
            identifier_label: identifier_label.into(),
        }
    }

    pub fn honorific(&self) -> &str {
        &self.honorific
    }

    pub fn identifier_label(&self) -> &str {
        &self.identifier_label
    }

    /// `"Mr. John Doe"`, or the bare name when no honorific is configured.
    pub fn named(&self, name: &str) -> String {
        let name = name.trim();
        if self.honorific.is_empty() {
            name.to_string()
        } else {
            format!("{} {name}", self.honorific)
        }
    }

    /// `"Mr. John Doe (DIN: 12345678)"`
    pub fn entry(&self, person: &Person) -> String {
        format!(
            "{} ({}: {})",
            self.named(&person.name),
            self.identifier_label,
            person.identifier.trim()
        )
    }
}

impl From<&RosterConfig> for EntryStyle {
    fn from(config: &RosterConfig) -> Self {
        Self::new(config.honorific.clone(), config.identifier_label.clone())
    }
}

impl Default for EntryStyle {
    fn default() -> Self {
        Self::from(&RosterConfig::default())
    }
}

/// A roster borrowed from the input record together with its entry style.
#[derive(Debug, Clone, Copy)]
pub struct Roster<'a> {
    people: &'a [Person],
    style: &'a EntryStyle,
}

impl<'a> Roster<'a> {
    pub fn new(people: &'a [Person], style: &'a EntryStyle) -> Self {
        Self {
            people,
            style,
        }
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// One line per person, each suffixed with `"\t<label>"` when labelled.
    pub fn lines(&self, policy: RolePolicy<'_>) -> Vec<String> {
        self.people
            .iter()
            .enumerate()
            .map(|(idx, person)| {
                let entry = self.style.entry(person);
                match policy.label_for(idx, person) {
                    Some(label) => format!("{entry}\t{label}"),
                    None => entry,
                }
            })
            .collect()
    }

    /// Labels assigned by `policy`, in roster order.
    pub fn labels<'p>(&self, policy: RolePolicy<'p>) -> Vec<Option<&'p str>> {
        self.people.iter().enumerate().map(|(idx, person)| policy.label_for(idx, person)).collect()
    }

    /// All lines joined with newlines.
    pub fn render(&self, policy: RolePolicy<'_>) -> String {
        self.lines(policy).join("\n")
    }

    /// Entry `n` (1-based) in numbered form: `"n.\t<entry>"`.
    pub fn numbered_entry(&self, n: usize) -> Option<String> {
        let person = self.people.get(n.checked_sub(1)?)?;
        Some(format!("{n}.\t{}", self.style.entry(person)))
    }

    /// Every entry in numbered form, separated by a blank line.
    pub fn render_numbered(&self) -> String {
        (1..=self.people.len()).filter_map(|n| self.numbered_entry(n)).collect::<Vec<_>>().join("\n\n")
    }
}

/// Attendees as `"<name> (<role>)"`, one per line. Empty when there are none.
pub fn render_attendees(attendees: &[Attendee]) -> String {
    attendees
        .iter()
        .map(|a| format!("{} ({})", a.name.trim(), a.role.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}
