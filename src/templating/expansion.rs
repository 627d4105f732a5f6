//! Multi-occurrence roster expansion.
//!
//! Templates write director lists as repeated copies of one generic roster
//! placeholder, e.g.
//!
//! ```text
//! Mr. [from MCA] (DIN: [from MCA])    Chairman
//! Mr. [from MCA] (DIN: [from MCA])    Director
//! ```
//!
//! A *slot* is one such copy: the placeholder with its optional honorific
//! and optional `(DIN: <placeholder>)` suffix. Expansion runs before the rule
//! table and maps slots to roster entries according to the section context:
//!
//! - **Attendance**: the first slot followed by a `Chairman` marker takes the
//!   chairman line, later role-marked slots take the remaining entries in
//!   order, and any slot still left gets the full labelled list.
//! - **Interest disclosure / disqualification**: a numbered slot `n.` takes
//!   entry `n` of the disclosure roster; the first unnumbered slot gets the
//!   whole numbered list and further unnumbered slots are dropped.
//! - **None**: every slot gets the labelled present-directors list.
//!
//! An empty active roster leaves every slot untouched so it is reported as
//! unresolved.

use regex::{Captures, NoExpand, Regex};

use crate::constants::{CHAIRMAN_ROLE, DIRECTOR_ROLE};
use crate::models::{InputRecord, Person};

use super::roster::{EntryStyle, RolePolicy, Roster};
use super::section::SectionContext;

/// Slot matchers compiled for one placeholder token and entry style.
#[derive(Debug, Clone)]
pub struct RosterExpander {
    placeholder: String,
    style: EntryStyle,
    slot: Regex,
    chairman_slot: Regex,
    marked_slot: Regex,
    disclosure_slot: Regex,
}

impl RosterExpander {
    /// Compile slot matchers for `placeholder` as written in `style`.
    pub fn new(placeholder: &str, style: EntryStyle) -> Result<Self, regex::Error> {
        let token = regex::escape(placeholder);
        let label = regex::escape(style.identifier_label());
        let honorific = if style.honorific().is_empty() {
            String::new()
        } else {
            format!(r"(?:{}\s*)?", regex::escape(style.honorific()))
        };
        let slot = format!(r"{honorific}{token}(?:\s*\(\s*{label}:\s*{token}\s*\))?");

        Ok(Self {
            placeholder: placeholder.to_string(),
            style,
            slot: Regex::new(&format!("(?i){slot}"))?,
            chairman_slot: Regex::new(&format!(r"(?i){slot}[ \t]+{CHAIRMAN_ROLE}"))?,
            marked_slot: Regex::new(&format!(r"(?i){slot}[ \t]+(?:{CHAIRMAN_ROLE}|{DIRECTOR_ROLE})"))?,
            disclosure_slot: Regex::new(&format!(r"(?i)(?:(?:\d+\.[ \t]+)*(\d+)\.[ \t]+)?{slot}"))?,
        })
    }

    pub fn style(&self) -> &EntryStyle {
        &self.style
    }

    /// Whether `text` contains the roster placeholder at all.
    pub fn has_slots(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.placeholder.to_lowercase())
    }

    /// Expand every roster slot in `text` for the given context.
    pub fn expand(&self, text: &str, context: SectionContext, record: &InputRecord) -> String {
        if !self.has_slots(text) {
            return text.to_string();
        }

        match context {
            SectionContext::Attendance => self.expand_attendance(text, record),
            SectionContext::InterestDisclosure => self.expand_disclosure(text, &record.interest_disclosures),
            SectionContext::Disqualification => {
                self.expand_disclosure(text, &record.disqualification_declarations)
            }
            SectionContext::None => {
                let roster = Roster::new(&record.present_directors, &self.style);
                if roster.is_empty() {
                    return text.to_string();
                }
                let policy = chairman_policy(record);
                self.slot.replace_all(text, NoExpand(&roster.render(policy))).into_owned()
            }
        }
    }

    fn expand_attendance(&self, text: &str, record: &InputRecord) -> String {
        let roster = Roster::new(&record.present_directors, &self.style);
        if roster.is_empty() {
            tracing::debug!("Attendance slots left in place: no present directors");
            return text.to_string();
        }

        let policy = chairman_policy(record);
        let lines = roster.lines(policy);
        let mut out = text.to_string();
        let mut next = 0;
        let mut cursor = 0;

        if roster.labels(policy).first() == Some(&Some(CHAIRMAN_ROLE)) {
            if let Some(m) = self.chairman_slot.find(&out) {
                let range = m.range();
                cursor = range.start + lines[0].len();
                out.replace_range(range, &lines[0]);
                next = 1;
            }
        }

        while next < lines.len() {
            let Some(m) = self.marked_slot.find_at(&out, cursor) else {
                break;
            };
            let range = m.range();
            cursor = range.start + lines[next].len();
            out.replace_range(range, &lines[next]);
            next += 1;
        }

        self.slot.replace_all(&out, NoExpand(&roster.render(policy))).into_owned()
    }

    fn expand_disclosure(&self, text: &str, people: &[Person]) -> String {
        let roster = Roster::new(people, &self.style);
        if roster.is_empty() {
            tracing::debug!("Disclosure slots left in place: roster is empty");
            return text.to_string();
        }

        let full = roster.render_numbered();
        let mut first_bare = true;
        self.disclosure_slot
            .replace_all(text, |caps: &Captures<'_>| match caps.get(1) {
                // Out-of-range numbers keep the slot so it is reported.
                Some(number) => number
                    .as_str()
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| roster.numbered_entry(n))
                    .unwrap_or_else(|| caps[0].to_string()),
                // The first bare slot takes the whole list; later ones are dropped.
                None if std::mem::take(&mut first_bare) => full.clone(),
                None => String::new(),
            })
            .into_owned()
    }
}

fn chairman_policy(record: &InputRecord) -> RolePolicy<'_> {
    RolePolicy::FirstIsChairman {
        chairman_name: &record.chairman_name,
    }
}
