use minutes_cli::config::MinutesConfig;
use minutes_cli::document::{Document, NodeKind};
use minutes_cli::models::TemplateId;
use minutes_cli::templating::Engine;
use minutes_cli::test_utils::{DocumentFixture, RecordFixture, init_test_logging};
use pretty_assertions::assert_eq;

fn resolve(fixture: &DocumentFixture, record: &RecordFixture) -> (Document, minutes_cli::templating::Diagnostics) {
    init_test_logging(None);
    let record = record.record().unwrap();
    let mut document = fixture.document.clone();
    let diagnostics = document.resolve(&Engine::new(MinutesConfig::default()), &record);
    (document, diagnostics)
}

fn texts_of(document: &Document, kind: NodeKind) -> Vec<&str> {
    document.nodes.iter().filter(|n| n.kind == kind).map(|n| n.text.as_str()).collect()
}

#[test]
fn test_q1_template_resolves_completely() {
    let (document, diagnostics) = resolve(&DocumentFixture::q1_template(), &RecordFixture::board_meeting());

    assert!(diagnostics.unresolved.is_empty(), "unresolved: {:?}", diagnostics.unresolved);
    assert!(diagnostics.observed.contains("[Name of Company]"));
    assert!(diagnostics.observed.contains("[from MCA]"));
    assert!(diagnostics.observed.contains("<Chairman>"));

    let paragraphs = texts_of(&document, NodeKind::Paragraph);
    assert_eq!(
        paragraphs[0],
        "MINUTES OF THE 12 MEETING OF THE BOARD OF DIRECTORS OF Acme Widgets Private Limited \
         HELD ON Monday, 05 May 2025 AT 11:00 a.m. AT the registered office"
    );
    assert_eq!(paragraphs[1], "Registered Office: 12 Marine Drive, Mumbai 400002");
    assert_eq!(
        paragraphs[3],
        "Mr. John Doe (DIN: 12345678)\tChairman\n\
         Mr. Asha Rao (DIN: 23456789)\tDirector\n\
         Mr. Vikram Shah (DIN: 34567890)\tDirector"
    );
    assert_eq!(paragraphs[4], "In ATTENDANCE: – Jane Roe (Company Secretary)");
    assert_eq!(paragraphs[5], "Mr. John Doe occupied the Chair and welcomed the Directors.");
    assert_eq!(
        paragraphs[6],
        "The minutes of the previous meeting held on 10 February 2025 were read and confirmed."
    );
    assert_eq!(paragraphs[8], "1.\tMr. Asha Rao (DIN: 23456789)");
    assert_eq!(paragraphs[9], "2.\tMr. Vikram Shah (DIN: 34567890)");
    assert_eq!(paragraphs[11], "1.\tMr. Meera Nair (DIN: 45678901)");
}

#[test]
fn test_q1_financial_and_agm_paragraphs() {
    let (document, _) = resolve(&DocumentFixture::q1_template(), &RecordFixture::board_meeting());
    let paragraphs = texts_of(&document, NodeKind::Paragraph);

    assert_eq!(
        paragraphs[12],
        "RESOLVED THAT the statutory auditors be paid Rs. 1,50,000/- (Rupees One Lakh Fifty Thousand Only) \
         for the financial year ending 31st March, 2025."
    );
    assert_eq!(
        paragraphs[13],
        "The financial statements for 2025 and the Directors' Report for the year ended \
         31st March, 2024 were approved."
    );
    assert_eq!(paragraphs[14], "Related party transactions for FY 2024 to 2025 were noted.");
    assert_eq!(
        paragraphs[15],
        "RESOLVED THAT the 14th Annual General Meeting be held on Monday, the 22nd Day of September \
         2025 at 3:00 p.m. at the registered office."
    );
    assert_eq!(
        paragraphs[16],
        "There being no other business, the meeting concluded at 12:30 p.m."
    );
}

#[test]
fn test_q1_sign_off_headers_and_footers() {
    let (document, _) = resolve(&DocumentFixture::q1_template(), &RecordFixture::board_meeting());

    assert_eq!(
        texts_of(&document, NodeKind::TableCell),
        vec![
            "Date of Recording : 06 May 2025",
            "Date of Signing :\t01 June 2025",
            "Place : Mumbai",
            "Mr. Doe, Chairman",
        ]
    );
    assert_eq!(
        texts_of(&document, NodeKind::Header),
        vec!["Acme Widgets Private Limited", "BOARD OF DIRECTORS MEETING"]
    );
    assert_eq!(
        texts_of(&document, NodeKind::Footer),
        vec!["Acme Widgets Private Limited - Minutes of Meeting No. 12"]
    );
}

#[test]
fn test_generation_keeps_stored_node_order() {
    let fixture = DocumentFixture::q1_template();
    let (document, _) = resolve(&fixture, &RecordFixture::board_meeting());

    let before: Vec<NodeKind> = fixture.document.nodes.iter().map(|n| n.kind).collect();
    let after: Vec<NodeKind> = document.nodes.iter().map(|n| n.kind).collect();
    assert_eq!(before, after);
}

#[test]
fn test_rerunning_a_resolved_document_changes_nothing() {
    let record = RecordFixture::board_meeting().record().unwrap();
    let engine = Engine::new(MinutesConfig::default());

    let mut document = DocumentFixture::q1_template().document;
    document.resolve(&engine, &record);
    let once = document.clone();
    document.resolve(&engine, &record);

    assert_eq!(document, once);
}

#[test]
fn test_minimal_record_reports_what_it_cannot_fill() {
    let (document, diagnostics) = resolve(&DocumentFixture::q1_template(), &RecordFixture::minimal());

    let paragraphs = texts_of(&document, NodeKind::Paragraph);
    assert_eq!(paragraphs[4], "In ATTENDANCE: – [Authorised Officer to be added]");
    assert_eq!(paragraphs[5], "Mr. John Doe occupied the Chair and welcomed the Directors.");

    // No disclosures: the slots stay in place and are reported.
    assert!(paragraphs[8].contains("[from MCA]"));
    assert!(diagnostics.unresolved.contains("[from MCA]"));
    assert!(diagnostics.unresolved.contains("[Authorised Officer to be added]"));
    assert!(diagnostics.unresolved.contains("<Chairman>"));
    assert!(!diagnostics.unresolved.contains("[Name of Company]"));

    // No auditor fee: named markers, never the chairman's name.
    assert!(paragraphs[12].contains("Rs. [Auditor Payment Amount]/- (Rupees [Auditor Payment in Words] Only)"));
    assert!(!paragraphs[12].contains("John Doe"));
    assert!(diagnostics.unresolved.contains("[Auditor Payment Amount]"));
}

#[test]
fn test_legacy_template_uses_bracket_family() {
    let mut record = RecordFixture::board_meeting().record().unwrap();
    record.template = TemplateId::Q2;
    record.agm_date = "2025-09-22".to_string();
    record.quorum = "Three directors were present throughout".to_string();

    let mut document = DocumentFixture::legacy_template(TemplateId::Q2).document;
    let diagnostics = document.resolve(&Engine::default(), &record);

    assert!(diagnostics.unresolved.is_empty(), "unresolved: {:?}", diagnostics.unresolved);
    let texts: Vec<&str> = document.nodes.iter().map(|n| n.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "Acme Widgets Private Limited",
            "The 14th Annual General Meeting was held on 22nd September 2025 at 3:00 p.m.",
            "Quorum: Three directors were present throughout",
            "Authorised officer: Jane Roe (Company Secretary)",
            "Date of Signing: 01 June 2025 at Mumbai",
        ]
    );
}

#[test]
fn test_legacy_tokens_are_left_alone_for_q1() {
    let record = RecordFixture::board_meeting().record().unwrap();
    let mut document = DocumentFixture::legacy_template(TemplateId::Q2).document;
    let diagnostics = document.resolve(&Engine::default(), &record);

    assert!(diagnostics.unresolved.contains("[AGM Number]"));
    assert!(diagnostics.unresolved.contains("[Signing Date]"));
    assert_eq!(document.nodes[0].text, "Acme Widgets Private Limited");
}

#[test]
fn test_configured_style_flows_through_entries() {
    let mut config = MinutesConfig::default();
    config.roster.honorific = "Shri".to_string();
    config.roster.placeholder = "[Director]".to_string();
    config.fallbacks.attendance = "None".to_string();

    let mut record = RecordFixture::board_meeting().record().unwrap();
    record.in_attendance.clear();

    let mut document = Document::new(vec![
        minutes_cli::document::TextNode::paragraph("The following Directors were present:"),
        minutes_cli::document::TextNode::paragraph("[Director]"),
        minutes_cli::document::TextNode::paragraph("In ATTENDANCE: - [Manual]"),
    ]);
    let diagnostics = document.resolve(&Engine::new(config), &record);

    assert!(diagnostics.unresolved.is_empty(), "unresolved: {:?}", diagnostics.unresolved);
    assert_eq!(
        document.nodes[1].text,
        "Shri John Doe (DIN: 12345678)\tChairman\n\
         Shri Asha Rao (DIN: 23456789)\tDirector\n\
         Shri Vikram Shah (DIN: 34567890)\tDirector"
    );
    assert_eq!(document.nodes[2].text, "In ATTENDANCE: - None");
}
