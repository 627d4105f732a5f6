//! Shared data models for minutes generation.
//!
//! The [`InputRecord`] is the structured minutes data supplied by the caller
//! once per generation run. It is read-only input to the engine: nothing in
//! the `templating` module mutates or validates it. Validation is offered here
//! for the collaborator that constructs records ([`InputRecord::validate`]).
//!
//! Records are exchanged as camelCase JSON:
//!
//! ```json
//! {
//!   "template": "Q1",
//!   "companyName": "Acme Industries Limited",
//!   "meetingNumber": "42",
//!   "chairmanName": "John Doe",
//!   "presentDirectors": [{ "name": "John Doe", "identifier": "12345678" }],
//!   "inAttendance": [{ "name": "Jane Roe", "role": "Company Secretary" }],
//!   "auditorPaymentAmount": 150000
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::IDENTIFIER_DIGITS;

/// A director or declarant named in the minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    /// Director identification number; the `din` key is accepted as well.
    #[serde(alias = "din")]
    pub identifier: String,
}

impl Person {
    pub fn new(name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
        }
    }
}

/// Someone in attendance who is not a director.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    pub name: String,
    pub role: String,
}

impl Attendee {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
        }
    }
}

/// A signatory of the financial statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signatory {
    pub name: String,
    pub role: String,
    #[serde(alias = "din")]
    pub identifier: String,
}

/// Financial year range for related-party transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRange {
    #[serde(alias = "from_year")]
    pub from_year: u32,
    #[serde(alias = "to_year")]
    pub to_year: u32,
}

/// Which template family the record targets.
///
/// Q1 templates use the phrase-level placeholder family; Q2 to Q4 templates
/// use the older bracket family (`[AGM Number]`, `[Signing Date]`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateId {
    #[default]
    Q1,
    Q2,
    Q3,
    Q4,
}

impl TemplateId {
    /// Whether this template uses the legacy bracket placeholder family.
    pub fn is_legacy(self) -> bool {
        !matches!(self, TemplateId::Q1)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Q1 => "Q1",
            TemplateId::Q2 => "Q2",
            TemplateId::Q3 => "Q3",
            TemplateId::Q4 => "Q4",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "Q1" => Ok(TemplateId::Q1),
            "Q2" => Ok(TemplateId::Q2),
            "Q3" => Ok(TemplateId::Q3),
            "Q4" => Ok(TemplateId::Q4),
            other => Err(format!("Template must be one of: Q1, Q2, Q3, Q4 (got '{other}')")),
        }
    }
}

/// The structured minutes data for one generation run.
///
/// Every field has a default so partial records deserialize; missing values
/// simply leave their placeholders unresolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InputRecord {
    pub template: TemplateId,

    // Company & meeting header
    pub company_name: String,
    pub meeting_number: String,
    pub meeting_type: String,
    pub meeting_day: String,
    pub meeting_date: String,
    pub time_commenced: String,
    pub time_concluded: String,
    pub meeting_place: String,
    pub registered_office_address: String,

    // Attendance
    pub chairman_name: String,
    pub chairman_short_name: String,
    pub present_directors: Vec<Person>,
    pub in_attendance: Vec<Attendee>,
    pub authorised_officer: String,

    // Quorum & previous minutes
    pub previous_minutes_date: String,

    // Disclosures under the Companies Act
    pub interest_disclosures: Vec<Person>,
    pub disqualification_declarations: Vec<Person>,

    // Statutory auditor's payment
    #[serde(deserialize_with = "string_or_number")]
    pub auditor_payment_amount: String,
    pub auditor_payment_words: String,
    pub auditor_payment_year: Option<u32>,

    // Financial statements and directors' report
    pub fs_year: Option<u32>,
    pub directors_report_year: Option<u32>,
    pub rpt_fin_year_range: Option<YearRange>,
    pub signatory1: Option<Signatory>,
    pub signatory2: Option<Signatory>,

    // AGM notice
    pub agm_number: String,
    pub agm_day_name: String,
    pub agm_day: Option<i64>,
    pub agm_month: String,
    pub agm_year: Option<u32>,
    pub agm_date: String,
    pub agm_time: String,

    // Free-text sections used by the legacy template family
    pub quorum: String,
    pub concerns: String,
    pub declarations: String,

    // Sign-off block
    pub recording_date: String,
    pub signing_date: String,
    pub signing_place: String,
}

/// Accept either a JSON string or a JSON number for amount fields.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

impl InputRecord {
    /// Every name, place and address the record supplies.
    pub fn proper_names(&self) -> impl Iterator<Item = &str> {
        let fixed = [
            &self.company_name,
            &self.registered_office_address,
            &self.meeting_place,
            &self.chairman_name,
            &self.chairman_short_name,
            &self.authorised_officer,
            &self.signing_place,
        ];
        let people = self
            .present_directors
            .iter()
            .chain(&self.interest_disclosures)
            .chain(&self.disqualification_declarations)
            .map(|p| &p.name);
        let attendees = self.in_attendance.iter().map(|a| &a.name);
        let signatories = [&self.signatory1, &self.signatory2].into_iter().flatten().map(|s| &s.name);

        fixed
            .into_iter()
            .chain(people)
            .chain(attendees)
            .chain(signatories)
            .map(String::as_str)
    }

    /// Check the record for data the template family cannot sensibly render.
    ///
    /// Returns one human-readable problem per entry; an empty vector means the
    /// record is valid. The engine never calls this: it renders whatever it is
    /// given and reports leftovers as diagnostics.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.company_name.trim().is_empty() {
            problems.push("Company name cannot be empty".to_string());
        }
        if self.meeting_number.trim().is_empty() {
            problems.push("Meeting number cannot be empty".to_string());
        }

        let rosters = [
            ("presentDirectors", &self.present_directors),
            ("interestDisclosures", &self.interest_disclosures),
            ("disqualificationDeclarations", &self.disqualification_declarations),
        ];
        for (field, people) in rosters {
            for (idx, person) in people.iter().enumerate() {
                if person.name.trim().is_empty() {
                    problems.push(format!("{field}[{idx}]: name cannot be empty"));
                }
                if !is_valid_identifier(&person.identifier) {
                    problems.push(format!(
                        "{field}[{idx}]: identifier '{}' must be exactly {IDENTIFIER_DIGITS} digits",
                        person.identifier
                    ));
                }
            }
        }

        let dates = [
            ("meetingDate", &self.meeting_date),
            ("previousMinutesDate", &self.previous_minutes_date),
            ("agmDate", &self.agm_date),
            ("recordingDate", &self.recording_date),
            ("signingDate", &self.signing_date),
        ];
        for (field, value) in dates {
            if !value.is_empty() && chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err()
            {
                problems.push(format!("{field}: date '{value}' must be in YYYY-MM-DD format"));
            }
        }

        problems
    }
}

fn is_valid_identifier(identifier: &str) -> bool {
    identifier.len() == IDENTIFIER_DIGITS && identifier.chars().all(|c| c.is_ascii_digit())
}
