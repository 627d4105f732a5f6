//! Rule model and the rule table builder.
//!
//! A [`RuleTable`] is the ordered list of `(pattern, replacement)` pairs built
//! once per input record. Every value is formatted while the table is built,
//! so applying a rule is plain text replacement.
//!
//! # Ordering
//!
//! Rules carry a [`RuleFamily`] whose discriminant is the rule priority; lower
//! priorities run first. On top of that, the table enforces one structural
//! invariant when a literal rule is inserted: it is placed before any earlier
//! literal rule whose pattern is a substring of its own. A full phrase such as
//! `"Mr. [Manual] occupied the Chair"` therefore always runs before the bare
//! `"[Manual]"` rule, whatever priority the two were given.
//!
//! Identical literal patterns are kept once; the first rule wins.
//!
//! # Skipped rules
//!
//! A rule whose value is absent from the record (an empty string, a missing
//! year or signatory) is not emitted. Its placeholder then survives
//! substitution and shows up in the unresolved diagnostics. The auditor
//! remuneration phrases are the exception: they wrap the generic `[Manual]`
//! token, so an absent value maps them to a named marker instead.

use regex::{NoExpand, Regex};
use std::collections::HashSet;
use std::fmt;

use crate::config::MinutesConfig;
use crate::constants::{
    AUDITOR_AMOUNT_MARKER, AUDITOR_WORDS_MARKER, DIRECTOR_ROLE, MANUAL_PLACEHOLDER,
};
use crate::models::{InputRecord, Signatory};

use super::formatters::{format_amount, long_date, or_raw, ordinal, ordinal_date};
use super::roster::{EntryStyle, render_attendees};

/// The family a rule belongs to. The discriminant is the rule priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleFamily {
    Header = 10,
    Attendance = 20,
    PreviousMinutes = 30,
    Auditor = 40,
    FinancialStatements = 50,
    Signatories = 60,
    Agm = 70,
    SignOff = 80,
    Legacy = 90,
    Generic = 100,
}

impl RuleFamily {
    pub fn priority(self) -> u16 {
        self as u16
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RuleFamily::Header => "header",
            RuleFamily::Attendance => "attendance",
            RuleFamily::PreviousMinutes => "previous-minutes",
            RuleFamily::Auditor => "auditor",
            RuleFamily::FinancialStatements => "financial-statements",
            RuleFamily::Signatories => "signatories",
            RuleFamily::Agm => "agm",
            RuleFamily::SignOff => "sign-off",
            RuleFamily::Legacy => "legacy",
            RuleFamily::Generic => "generic",
        }
    }
}

impl fmt::Display for RuleFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// What a rule looks for.
#[derive(Debug, Clone)]
pub enum Pattern {
    Literal(String),
    Regex(Regex),
}

impl Pattern {
    pub fn as_str(&self) -> &str {
        match self {
            Pattern::Literal(text) => text,
            Pattern::Regex(re) => re.as_str(),
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Pattern::Literal(literal) => text.contains(literal.as_str()),
            Pattern::Regex(re) => re.is_match(text),
        }
    }
}

/// What a match is replaced with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    /// Inserted verbatim.
    Fixed(String),
    /// Regex replacement template; `$1`/`${1}` refer to capture groups.
    Expand(String),
}

impl Replacement {
    pub fn as_str(&self) -> &str {
        match self {
            Replacement::Fixed(text) | Replacement::Expand(text) => text,
        }
    }
}

/// One substitution rule.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Pattern,
    replacement: Replacement,
    family: RuleFamily,
}

impl Rule {
    pub fn literal(family: RuleFamily, pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: Pattern::Literal(pattern.into()),
            replacement: Replacement::Fixed(replacement.into()),
            family,
        }
    }

    pub fn regex(family: RuleFamily, pattern: Regex, replacement: Replacement) -> Self {
        Self {
            pattern: Pattern::Regex(pattern),
            replacement,
            family,
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn replacement(&self) -> &Replacement {
        &self.replacement
    }

    pub fn family(&self) -> RuleFamily {
        self.family
    }

    pub fn priority(&self) -> u16 {
        self.family.priority()
    }

    fn literal_pattern(&self) -> Option<&str> {
        match &self.pattern {
            Pattern::Literal(text) => Some(text),
            Pattern::Regex(_) => None,
        }
    }

    /// Apply the rule to `text`, replacing every occurrence.
    ///
    /// Returns `None` when the pattern does not occur.
    pub fn apply(&self, text: &str) -> Option<String> {
        if !self.pattern.is_match(text) {
            return None;
        }
        let replaced = match (&self.pattern, &self.replacement) {
            (Pattern::Literal(literal), replacement) => text.replace(literal.as_str(), replacement.as_str()),
            (Pattern::Regex(re), Replacement::Fixed(value)) => {
                re.replace_all(text, NoExpand(value)).into_owned()
            }
            (Pattern::Regex(re), Replacement::Expand(template)) => {
                re.replace_all(text, template.as_str()).into_owned()
            }
        };
        Some(replaced)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.pattern {
            Pattern::Literal(_) => "literal",
            Pattern::Regex(_) => "regex",
        };
        write!(
            f,
            "{:>3}  {:<20} {:<7} {:?} => {:?}",
            self.priority(),
            self.family,
            kind,
            self.pattern.as_str(),
            self.replacement.as_str()
        )
    }
}

/// The ordered rule list for one generation run.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
    literals: HashSet<String>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the full rule table for `record`.
    pub fn for_record(record: &InputRecord, config: &MinutesConfig) -> Self {
        let style = EntryStyle::from(&config.roster);
        let mut builder = Builder {
            record,
            config,
            style: &style,
            candidates: Vec::new(),
        };
        builder.header();
        builder.attendance();
        builder.previous_minutes();
        builder.auditor();
        builder.financial_statements();
        builder.signatories();
        builder.agm();
        builder.sign_off();
        if record.template.is_legacy() {
            builder.legacy();
        }
        builder.generic();

        let mut candidates = builder.candidates;
        candidates.sort_by_key(Rule::priority);

        let mut table = Self::new();
        for rule in candidates {
            table.insert(rule);
        }
        tracing::debug!("Built rule table with {} rules for template {}", table.len(), record.template);
        table
    }

    /// Insert a rule, keeping longer literals ahead of their substrings.
    ///
    /// Returns `false` if an identical literal pattern is already present.
    pub fn insert(&mut self, rule: Rule) -> bool {
        let Some(literal) = rule.literal_pattern() else {
            self.rules.push(rule);
            return true;
        };

        if !self.literals.insert(literal.to_string()) {
            tracing::debug!("Skipping duplicate rule for {literal:?}");
            return false;
        }

        let position = self
            .rules
            .iter()
            .position(|existing| existing.literal_pattern().is_some_and(|p| literal.contains(p)))
            .unwrap_or(self.rules.len());
        self.rules.insert(position, rule);
        true
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Literal patterns in table order, used for near-miss suggestions.
    pub fn literal_patterns(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().filter_map(Rule::literal_pattern)
    }

    /// Apply every rule in order.
    pub fn apply(&self, text: &str) -> String {
        let mut current = text.to_string();
        for rule in &self.rules {
            if let Some(next) = rule.apply(&current) {
                current = next;
            }
        }
        current
    }
}

impl fmt::Display for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}

/// Year-end spellings used by the auditor appointment paragraph.
const YEAR_END_SPELLINGS: &[&str] = &["31ST MARCH", "31st March", "31 March", "31 MARCH"];

const OFFICE_ADDRESS_TOKENS: &[&str] =
    &["[From website: MCA]", "[From Website: MCA]", "[FROM WEBSITE: MCA]"];

const ATTENDANCE_SEPARATORS: &[&str] = &[": –", ": -", " –", " -"];

const TIME_SUFFIXES: &[&str] = &["p.m.", "P.M.", "pm", "PM"];

const RECORDING_LAYOUTS: &[&str] = &[
    "Date of Recording    :\t____",
    "Date of Recording    : ____",
    "Date of Recording\t:\t____",
    "Date of Recording : ____",
    "Date of Recording: ____",
];

const SIGNING_LAYOUTS: &[&str] = &[
    "Date of Signing      :\t____",
    "Date of Signing      : ____",
    "Date of Signing\t:\t____",
    "Date of Signing : ____",
    "Date of Signing: ____",
];

const PLACE_LAYOUTS: &[&str] = &["Place\t\t\t: \t____", "Place\t:\t____", "Place : ____", "Place: ____"];

fn present(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn long_date_of(value: &str) -> Option<String> {
    present(value).map(|v| or_raw(long_date(v)))
}

/// Escape `$` so a value can sit inside a regex replacement template.
fn escape_expansion(value: &str) -> String {
    value.replace('$', "$$")
}

/// Strip a leading honorific from a short name: `"Mr. Doe"` -> `"Doe"`.
fn strip_honorific<'a>(name: &'a str, honorific: &str) -> &'a str {
    let name = name.trim();
    let bare = honorific.trim_end_matches('.');
    if bare.is_empty() {
        return name;
    }
    for prefix in [format!("{bare}. "), format!("{bare} ")] {
        if let Some(rest) = name.strip_prefix(prefix.as_str()) {
            return rest.trim_start();
        }
    }
    name
}

struct Builder<'a> {
    record: &'a InputRecord,
    config: &'a MinutesConfig,
    style: &'a EntryStyle,
    candidates: Vec<Rule>,
}

impl Builder<'_> {
    fn literal(&mut self, family: RuleFamily, pattern: impl Into<String>, replacement: impl Into<String>) {
        self.candidates.push(Rule::literal(family, pattern, replacement));
    }

    fn optional(&mut self, family: RuleFamily, pattern: &str, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.literal(family, pattern, value);
        }
    }

    fn regex(&mut self, family: RuleFamily, pattern: &str, replacement: Replacement) {
        match Regex::new(pattern) {
            Ok(re) => self.candidates.push(Rule::regex(family, re, replacement)),
            Err(e) => tracing::warn!("Skipping rule with invalid pattern {pattern:?}: {e}"),
        }
    }

    fn attendees(&self) -> Option<String> {
        present(&render_attendees(&self.record.in_attendance)).map(str::to_string)
    }

    fn header(&mut self) {
        let r = self.record;
        let family = RuleFamily::Header;
        self.optional(family, "[Time: COMMENCED AT]", present(&r.time_commenced));
        self.optional(family, "[Time: CONCLUDED AT]", present(&r.time_concluded));
        self.optional(family, "[Date of Meeting]", long_date_of(&r.meeting_date));
        self.optional(family, "[Day of Meeting]", present(&r.meeting_day));
        self.optional(family, "[Place of Meeting]", present(&r.meeting_place));
        self.optional(family, "[Name of Company]", present(&r.company_name));
        self.optional(family, "[No. of Meeting]", present(&r.meeting_number));
        self.optional(family, "[Type of Meeting]", present(&r.meeting_type));
        for token in OFFICE_ADDRESS_TOKENS {
            self.optional(family, token, present(&r.registered_office_address));
        }
    }

    fn attendance(&mut self) {
        let r = self.record;
        let family = RuleFamily::Attendance;
        if let Some(chairman) = present(&r.chairman_name) {
            self.literal(
                family,
                format!("Mr. {MANUAL_PLACEHOLDER} occupied the Chair"),
                format!("Mr. {chairman} occupied the Chair"),
            );
        }

        let fallback = &self.config.fallbacks.attendance;
        let attendees = self.attendees().unwrap_or_else(|| fallback.clone());
        for separator in ATTENDANCE_SEPARATORS {
            self.literal(
                family,
                format!("In ATTENDANCE{separator} {MANUAL_PLACEHOLDER}"),
                format!("In ATTENDANCE{separator} {attendees}"),
            );
        }
    }

    fn previous_minutes(&mut self) {
        let previous = long_date_of(&self.record.previous_minutes_date);
        self.optional(RuleFamily::PreviousMinutes, "[Auto]", previous);
    }

    fn auditor(&mut self) {
        let r = self.record;
        let family = RuleFamily::Auditor;

        // Emitted even without a value: this `[Manual]` is never the chairman.
        let amount = present(&r.auditor_payment_amount)
            .map_or_else(|| AUDITOR_AMOUNT_MARKER.to_string(), |a| or_raw(format_amount(a)));
        self.literal(family, "Rs. [Manual]/-", format!("Rs. {amount}/-"));
        self.literal(family, "Rs [Manual]/-", format!("Rs. {amount}/-"));

        let words = present(&r.auditor_payment_words).unwrap_or(AUDITOR_WORDS_MARKER);
        self.literal(family, "(Rupees [Manual] Only)", format!("(Rupees {words} Only)"));
        self.literal(family, "Rupees [Manual] Only", format!("Rupees {words} Only"));

        if let Some(year) = r.auditor_payment_year {
            for spelling in YEAR_END_SPELLINGS {
                for separator in [", ", " "] {
                    for underscores in ["____", "___"] {
                        self.literal(
                            family,
                            format!("{spelling}{separator}20{underscores}"),
                            format!("{spelling}{separator}{year}"),
                        );
                    }
                }
            }
        }
    }

    fn financial_statements(&mut self) {
        let r = self.record;
        let family = RuleFamily::FinancialStatements;

        if let Some(year) = r.fs_year {
            self.literal(family, "20<year>", year.to_string());
            self.literal(family, "<year>", year.to_string());
        }

        if let Some(year) = r.directors_report_year {
            self.regex(family, r"(?i)(31st\s+march,\s*)2020\b", Replacement::Expand(format!("${{1}}{year}")));
        }

        if let Some(range) = &r.rpt_fin_year_range {
            self.regex(
                family,
                r"<\s*\d{4}\s+to\s+\d{4}\s*>_*",
                Replacement::Fixed(format!("{} to {}", range.from_year, range.to_year)),
            );
        }
    }

    fn signatories(&mut self) {
        let (r, style) = (self.record, self.style);
        let family = RuleFamily::Signatories;
        let signature = |signatory: &Signatory| {
            let role = present(&signatory.role).unwrap_or(DIRECTOR_ROLE);
            format!(
                "{}, {role} ({}: {})",
                style.named(&signatory.name),
                style.identifier_label(),
                signatory.identifier.trim()
            )
        };

        if let Some(signatory) = &r.signatory1 {
            let line = signature(signatory);
            for pattern in [
                "Mr. <Director Name>, __, Director (DIN: _<DIN Number>___)",
                "Mr. <Director Name>, __, Director (DIN: <DIN Number>___)",
            ] {
                self.literal(family, pattern, line.clone());
            }
        }

        if let Some(signatory) = &r.signatory2 {
            let line = signature(signatory);
            for pattern in [
                "Mr. __<Director Name>__, Director (DIN: __<DIN Number>__)",
                "Mr. <Director Name>__, Director (DIN: __<DIN Number>__)",
            ] {
                self.literal(family, pattern, line.clone());
            }
        }
    }

    fn agm(&mut self) {
        let r = self.record;
        let family = RuleFamily::Agm;

        if let (Some(day), Some(month)) = (r.agm_day, present(&r.agm_month)) {
            let day = ordinal(day);
            for (pattern, prefix) in [
                ("the ____ Day of ____", "the "),
                ("the ____ day of ____", "the "),
                ("____ Day of ____", ""),
                ("____ day of ____", ""),
            ] {
                let word = if pattern.contains("Day") { "Day" } else { "day" };
                self.literal(family, pattern, format!("{prefix}{day} {word} of {month}"));
            }
        }

        if let (Some(year), Some(time)) = (r.agm_year, present(&r.agm_time)) {
            for underscores in ["____", "___"] {
                for suffix in TIME_SUFFIXES {
                    self.literal(family, format!("20{underscores} at ____ {suffix}"), format!("{year} at {time}"));
                }
            }
        }

        self.optional(family, "<no of meeting>", present(&r.agm_number));
        self.optional(family, "<no. of meeting>", present(&r.agm_number));
        self.optional(family, "<day>", present(&r.agm_day_name));

        let Some(short) = present(&r.chairman_short_name) else {
            return;
        };
        let (config, style) = (self.config, self.style);
        let short = strip_honorific(short, style.honorific()).to_string();
        self.literal(family, "Mr. <Chairman>, Chairman", format!("Mr. {short}, Chairman"));
        self.literal(family, "Mr. <Chairman>", format!("Mr. {short}"));
        self.literal(family, "<Chairman>", short.clone());

        let stale = config.template.stale_chairman_surname.trim();
        if stale.is_empty() {
            return;
        }
        let pattern = format!(r"\b{}\b", regex::escape(stale));
        let Ok(word) = Regex::new(&pattern) else {
            tracing::warn!("Skipping stale surname rule with invalid pattern {pattern:?}");
            return;
        };
        // A surname the record itself uses is real data, not a leftover.
        if r.proper_names().any(|name| word.is_match(name)) {
            tracing::debug!("Stale surname {stale:?} occurs in the record; leaving it");
            return;
        }
        self.candidates.push(Rule::regex(family, word, Replacement::Fixed(short)));
    }

    fn sign_off(&mut self) {
        let r = self.record;
        let family = RuleFamily::SignOff;

        if let Some(date) = long_date_of(&r.recording_date) {
            for layout in RECORDING_LAYOUTS {
                self.literal(family, *layout, layout.replace("____", &date));
            }
            self.regex(
                family,
                r"(?m)(Date of Recording[ \t]*:)[ \t]*$",
                Replacement::Expand(format!("${{1}}\t{}", escape_expansion(&date))),
            );
        }

        if let Some(date) = long_date_of(&r.signing_date) {
            for layout in SIGNING_LAYOUTS {
                self.literal(family, *layout, layout.replace("____", &date));
            }
            self.regex(
                family,
                r"(?m)(Date of Signing[ \t]*:)[ \t]*$",
                Replacement::Expand(format!("${{1}}\t{}", escape_expansion(&date))),
            );
        }

        if let Some(place) = present(&r.signing_place) {
            self.literal(
                family,
                "Place\t\t\t: \t____\t\t\t\tChairman",
                format!("Place\t\t\t: \t{place}\t\t\t\tChairman"),
            );
            for layout in PLACE_LAYOUTS {
                self.literal(family, *layout, layout.replace("____", place));
            }
        }
    }

    fn legacy(&mut self) {
        let r = self.record;
        let family = RuleFamily::Legacy;

        self.optional(family, "[AGM Number]", present(&r.agm_number));
        self.optional(family, "[AGM Day]", r.agm_day.map(ordinal));
        self.optional(family, "[AGM Date]", present(&r.agm_date).map(|d| or_raw(ordinal_date(d))));
        self.optional(family, "[AGM Time]", present(&r.agm_time));
        self.optional(family, "[AGM Year]", r.agm_year.or(r.fs_year).map(|y| y.to_string()));
        self.optional(family, "[Recording Date]", long_date_of(&r.recording_date));
        self.optional(family, "[Signing Date]", long_date_of(&r.signing_date));
        self.optional(family, "[Signing Place]", present(&r.signing_place));
        self.optional(family, "[Quorum details]", present(&r.quorum));
        self.optional(family, "[Concern/Interest details]", present(&r.concerns));
        self.optional(family, "[Declaration details]", present(&r.declarations));

        let officer = self.attendees().or_else(|| present(&r.authorised_officer).map(str::to_string));
        self.optional(family, "[Authorised Officer]", officer);
    }

    fn generic(&mut self) {
        let r = self.record;
        let chairman = present(&r.chairman_name).map(str::to_string);
        self.optional(RuleFamily::Generic, MANUAL_PLACEHOLDER, chairman);
    }
}
