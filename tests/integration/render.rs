use minutes_cli::document::NodeKind;
use minutes_cli::test_utils::{DocumentFixture, RecordFixture};

use crate::common::TestProject;

const OUTPUT: &str = "templates/meeting_minutes_Q1_20250505_12.json";

/// Template lookup by id, default output name next to the template
#[test]
fn test_render_with_template_lookup() {
    let project = TestProject::new().unwrap();
    project.write_record(&RecordFixture::board_meeting()).unwrap();
    project.write_template(&DocumentFixture::q1_template()).unwrap();

    let output = project.run_minutes(&["render", "--record", "board_meeting.json"]).unwrap();
    output
        .assert_success()
        .assert_stdout_contains("✓ Generated")
        .assert_stdout_contains("meeting_minutes_Q1_20250505_12.json")
        .assert_stdout_contains("All placeholders resolved");

    let document = project.load_document(OUTPUT).unwrap();
    let cell = document.nodes.iter().find(|n| n.kind == NodeKind::TableCell).unwrap();
    assert_eq!(cell.text, "Date of Recording : 06 May 2025");
    assert_eq!(document.nodes[0].text, "Acme Widgets Private Limited");
}

/// The source template is never modified
#[test]
fn test_render_leaves_template_untouched() {
    let project = TestProject::new().unwrap();
    project.write_record(&RecordFixture::board_meeting()).unwrap();
    let fixture = DocumentFixture::q1_template();
    project.write_template(&fixture).unwrap();

    project.run_minutes(&["render", "-r", "board_meeting.json"]).unwrap().assert_success();

    let template = project.load_document("templates/q1_meeting_template.json").unwrap();
    assert_eq!(template, fixture.document);
}

/// Explicit --document and --output with a JSON report
#[test]
fn test_render_json_report() {
    let project = TestProject::new().unwrap();
    project.write_record(&RecordFixture::minimal()).unwrap();
    let template = project.write_template(&DocumentFixture::q1_template()).unwrap();

    let output = project
        .run_minutes(&[
            "render",
            "--record",
            "minimal.json",
            "--document",
            template.to_str().unwrap(),
            "--output",
            "out/minutes.json",
            "--format",
            "json",
        ])
        .unwrap();
    output.assert_success();

    let report = output.json();
    assert_eq!(report["template"], "Q1");
    assert!(report["output"].as_str().unwrap().ends_with("minutes.json"));
    let unresolved: Vec<&str> =
        report["unresolved"].as_array().unwrap().iter().filter_map(|v| v.as_str()).collect();
    assert!(unresolved.contains(&"[Authorised Officer to be added]"));
    assert!(unresolved.contains(&"[from MCA]"));
    assert!(report["observed"].as_array().unwrap().len() >= unresolved.len());

    assert!(project.project_path().join("out/minutes.json").is_file());
}

/// Unresolved placeholders are listed but do not fail the command
#[test]
fn test_render_text_report_lists_unresolved() {
    let project = TestProject::new().unwrap();
    project.write_record(&RecordFixture::minimal()).unwrap();
    project.write_template(&DocumentFixture::q1_template()).unwrap();

    let output = project.run_minutes(&["render", "-r", "minimal.json", "-o", "minutes.json"]).unwrap();
    output
        .assert_success()
        .assert_stdout_contains("placeholder(s) may not have been replaced")
        .assert_stdout_contains("[Authorised Officer to be added]");
}

/// --template overrides the record's template id
#[test]
fn test_render_template_override() {
    let project = TestProject::new().unwrap();
    project.write_record(&RecordFixture::board_meeting()).unwrap();
    project.write_template(&DocumentFixture::legacy_template(minutes_cli::models::TemplateId::Q3)).unwrap();

    let output = project
        .run_minutes(&["render", "-r", "board_meeting.json", "--template", "q3", "-o", "q3.json"])
        .unwrap();
    output.assert_success().assert_stdout_contains("Template: Q3");

    let document = project.load_document("q3.json").unwrap();
    assert_eq!(
        document.nodes[3].text,
        "Authorised officer: Jane Roe (Company Secretary)"
    );
}

/// --skip-validation renders a record that fails validation
#[test]
fn test_render_skip_validation() {
    let project = TestProject::new().unwrap();
    project.write_record(&RecordFixture::invalid()).unwrap();
    project.write_template(&DocumentFixture::q1_template()).unwrap();

    let output = project
        .run_minutes(&["render", "-r", "invalid.json", "--skip-validation", "-o", "out.json"])
        .unwrap();
    output.assert_success();
    assert!(project.project_path().join("out.json").is_file());
}

/// A local minutes.toml changes the rendered entries
#[test]
fn test_render_uses_local_config() {
    let project = TestProject::new().unwrap();
    project.write_record(&RecordFixture::minimal()).unwrap();
    project.write_template(&DocumentFixture::q1_template()).unwrap();
    project.write_file("minutes.toml", "[fallbacks]\nattendance = \"Nil\"\n").unwrap();

    project.run_minutes(&["render", "-r", "minimal.json", "-o", "out.json"]).unwrap().assert_success();

    let document = project.load_document("out.json").unwrap();
    assert!(document.nodes.iter().any(|n| n.text == "In ATTENDANCE: – Nil"));
}
