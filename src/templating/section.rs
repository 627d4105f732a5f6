//! Section-context classification.
//!
//! Generic roster placeholders mean different things depending on which
//! block of the minutes they sit in. The classifier is a forward-only state
//! machine: each node's lowercased text is checked against a table of
//! triggers, in priority order, and the first match sets the context. When
//! nothing matches, the context carries over from the previous node, so a
//! disclosure heading in one paragraph governs the list paragraphs after it.

use serde::Serialize;
use std::fmt;

/// The semantic block subsequent placeholders belong to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionContext {
    #[default]
    None,
    Attendance,
    InterestDisclosure,
    Disqualification,
}

impl fmt::Display for SectionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionContext::None => "none",
            SectionContext::Attendance => "attendance",
            SectionContext::InterestDisclosure => "interest disclosure",
            SectionContext::Disqualification => "disqualification",
        };
        f.write_str(name)
    }
}

/// A condition on lowercased node text.
#[derive(Debug, Clone, Copy)]
enum Trigger {
    /// Any one of the phrases appears.
    Any(&'static [&'static str]),
    /// Every phrase appears, in any order.
    All(&'static [&'static str]),
}

impl Trigger {
    fn matches(&self, lowered: &str) -> bool {
        match self {
            Trigger::Any(phrases) => phrases.iter().any(|p| lowered.contains(p)),
            Trigger::All(phrases) => phrases.iter().all(|p| lowered.contains(p)),
        }
    }
}

/// Trigger table, checked top to bottom; first match wins.
const TRANSITIONS: &[(Trigger, SectionContext)] = &[
    (Trigger::Any(&["section 184"]), SectionContext::InterestDisclosure),
    (Trigger::All(&["interest", "disclosure"]), SectionContext::InterestDisclosure),
    (Trigger::Any(&["section 164", "164(2)", "disqualification"]), SectionContext::Disqualification),
    (
        Trigger::Any(&["directors were present", "present:", "attendance"]),
        SectionContext::Attendance,
    ),
    (Trigger::All(&["the following", "directors"]), SectionContext::Attendance),
];

impl SectionContext {
    /// Classify one node's text given the context carried from the previous node.
    ///
    /// Returns the context that applies to this node and all following nodes
    /// until another trigger is seen.
    #[must_use]
    pub fn classify(self, text: &str) -> SectionContext {
        let lowered = text.to_lowercase();
        TRANSITIONS
            .iter()
            .find(|(trigger, _)| trigger.matches(&lowered))
            .map_or(self, |(_, next)| *next)
    }

    /// Whether this context draws on a disclosure or declaration roster.
    pub fn is_disclosure(self) -> bool {
        matches!(self, SectionContext::InterestDisclosure | SectionContext::Disqualification)
    }
}
