//! Test fixtures for creating sample data structures
//!
//! This module provides ready-made input records and template documents that
//! exercise every placeholder family, plus helpers to write them to disk.

use anyhow::{Context, Result};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

use crate::document::{Document, NodeKind, TextNode, template_candidates};
use crate::models::{InputRecord, TemplateId};

/// The roster slot as it appears in the Q1 template family.
pub const SLOT: &str = "Mr. [from MCA] (DIN: [from MCA])";

/// Test fixture for input record JSON files
#[derive(Clone, Debug)]
pub struct RecordFixture {
    pub content: String,
    pub name: String,
}

impl RecordFixture {
    /// A complete board meeting record: three directors with John Doe in the
    /// chair, two interest disclosures, one disqualification declaration.
    pub fn board_meeting() -> Self {
        let value = json!({
            "template": "Q1",
            "companyName": "Acme Widgets Private Limited",
            "meetingNumber": "12",
            "meetingType": "Board",
            "meetingDay": "Monday",
            "meetingDate": "2025-05-05",
            "timeCommenced": "11:00 a.m.",
            "timeConcluded": "12:30 p.m.",
            "meetingPlace": "the registered office",
            "registeredOfficeAddress": "12 Marine Drive, Mumbai 400002",
            "chairmanName": "John Doe",
            "chairmanShortName": "Mr. Doe",
            "presentDirectors": [
                { "name": "John Doe", "din": "12345678" },
                { "name": "Asha Rao", "din": "23456789" },
                { "name": "Vikram Shah", "din": "34567890" }
            ],
            "inAttendance": [
                { "name": "Jane Roe", "role": "Company Secretary" }
            ],
            "previousMinutesDate": "2025-02-10",
            "interestDisclosures": [
                { "name": "Asha Rao", "din": "23456789" },
                { "name": "Vikram Shah", "din": "34567890" }
            ],
            "disqualificationDeclarations": [
                { "name": "Meera Nair", "din": "45678901" }
            ],
            "auditorPaymentAmount": 150000,
            "auditorPaymentWords": "One Lakh Fifty Thousand",
            "auditorPaymentYear": 2025,
            "fsYear": 2025,
            "directorsReportYear": 2024,
            "rptFinYearRange": { "fromYear": 2024, "toYear": 2025 },
            "agmNumber": "14th",
            "agmDayName": "Monday",
            "agmDay": 22,
            "agmMonth": "September",
            "agmYear": 2025,
            "agmTime": "3:00 p.m.",
            "recordingDate": "2025-05-06",
            "signingDate": "2025-06-01",
            "signingPlace": "Mumbai"
        });
        Self {
            name: "board_meeting".to_string(),
            content: value.to_string(),
        }
    }

    /// One director who is also the chairman, nobody in attendance.
    pub fn minimal() -> Self {
        let value = json!({
            "companyName": "Acme Widgets Private Limited",
            "meetingNumber": "1",
            "meetingDate": "2025-04-01",
            "chairmanName": "John Doe",
            "presentDirectors": [{ "name": "John Doe", "din": "12345678" }],
            "inAttendance": []
        });
        Self {
            name: "minimal".to_string(),
            content: value.to_string(),
        }
    }

    /// A record that parses but fails validation.
    pub fn invalid() -> Self {
        let value = json!({
            "companyName": "",
            "meetingNumber": "3",
            "meetingDate": "05/05/2025",
            "presentDirectors": [{ "name": "John Doe", "din": "1234" }]
        });
        Self {
            name: "invalid".to_string(),
            content: value.to_string(),
        }
    }

    /// Parse the fixture into an [`InputRecord`].
    pub fn record(&self) -> Result<InputRecord> {
        serde_json::from_str(&self.content)
            .with_context(|| format!("Fixture {} is not a valid record", self.name))
    }

    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(format!("{}.json", self.name));
        fs::write(&path, &self.content)?;
        Ok(path)
    }
}

/// Test fixture for template documents
#[derive(Clone, Debug)]
pub struct DocumentFixture {
    pub document: Document,
    pub template: TemplateId,
}

impl DocumentFixture {
    /// A board meeting template covering every Q1 placeholder family.
    pub fn q1_template() -> Self {
        let paragraphs: &[&str] = &[
            "MINUTES OF THE [No. of Meeting] MEETING OF THE BOARD OF DIRECTORS OF [Name of Company] \
             HELD ON [Day of Meeting], [Date of Meeting] AT [Time: COMMENCED AT] AT [Place of Meeting]",
            "Registered Office: [From website: MCA]",
            "The following Directors were present:",
            &format!("{SLOT}\tChairman\n{SLOT}\tDirector\n{SLOT}\tDirector"),
            "In ATTENDANCE: – [Manual]",
            "Mr. [Manual] occupied the Chair and welcomed the Directors.",
            "The minutes of the previous meeting held on [Auto] were read and confirmed.",
            "To take note of the disclosure of interest received from Directors under Section 184 \
             of the Companies Act, 2013:",
            &format!("1.\t1.\t{SLOT}"),
            &format!("2.\t{SLOT}"),
            "To take note of the declarations of non-disqualification under Section 164(2):",
            SLOT,
            "RESOLVED THAT the statutory auditors be paid Rs. [Manual]/- (Rupees [Manual] Only) \
             for the financial year ending 31st March, 20____.",
            "The financial statements for 20<year> and the Directors' Report for the year ended \
             31st March, 2020 were approved.",
            "Related party transactions for FY <2023 to 2024>____ were noted.",
            "RESOLVED THAT the <no of meeting> Annual General Meeting be held on <day>, the ____ Day of ____ \
             20____ at ____ p.m. at the registered office.",
            "There being no other business, the meeting concluded at [Time: CONCLUDED AT].",
        ];
        let cells = [
            "Date of Recording : ____",
            "Date of Signing :",
            "Place : ____",
            "Mr. <Chairman>, Chairman",
        ];

        let mut nodes: Vec<TextNode> = Vec::new();
        nodes.push(TextNode::new(NodeKind::Header, "[Name of Company]"));
        nodes.push(TextNode::new(NodeKind::Header, "BOARD OF DIRECTORS MEETING"));
        nodes.extend(paragraphs.iter().map(|text| TextNode::paragraph(*text)));
        nodes.extend(cells.iter().map(|text| TextNode::new(NodeKind::TableCell, *text)));
        nodes.push(TextNode::new(
            NodeKind::Footer,
            "[Name of Company] - Minutes of Meeting No. [No. of Meeting]",
        ));

        Self {
            document: Document::new(nodes),
            template: TemplateId::Q1,
        }
    }

    /// A legacy bracket-family template.
    pub fn legacy_template(template: TemplateId) -> Self {
        let nodes = vec![
            TextNode::paragraph("[Name of Company]"),
            TextNode::paragraph("The [AGM Number] Annual General Meeting was held on [AGM Date] at [AGM Time]."),
            TextNode::paragraph("Quorum: [Quorum details]"),
            TextNode::paragraph("Authorised officer: [Authorised Officer]"),
            TextNode::new(NodeKind::TableCell, "Date of Signing: [Signing Date] at [Signing Place]"),
        ];
        Self {
            document: Document::new(nodes),
            template,
        }
    }

    /// Write the document under the first lookup name for its template id.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let name = template_candidates(self.template)
            .into_iter()
            .next()
            .context("No template file name for fixture")?;
        let path = dir.join(name);
        self.document.save(&path)?;
        Ok(path)
    }
}
