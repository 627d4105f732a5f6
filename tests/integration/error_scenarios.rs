use minutes_cli::test_utils::{DocumentFixture, RecordFixture};

use crate::common::TestProject;

/// Test validation failures are listed with a suggestion
#[test]
fn test_invalid_record_is_rejected() {
    let project = TestProject::new().unwrap();
    project.write_record(&RecordFixture::invalid()).unwrap();
    project.write_template(&DocumentFixture::q1_template()).unwrap();

    let output = project.run_minutes(&["render", "-r", "invalid.json"]).unwrap();
    output
        .assert_failure()
        .assert_stderr_contains("Input record failed validation (3 problem(s))")
        .assert_stderr_contains("Company name cannot be empty")
        .assert_stderr_contains("--skip-validation");
    assert_eq!(output.code, Some(1));
}

/// Test a record that is not JSON
#[test]
fn test_unparsable_record() {
    let project = TestProject::new().unwrap();
    project.write_file("broken.json", "{\"companyName\": ").unwrap();

    let output = project.run_minutes(&["render", "-r", "broken.json"]).unwrap();
    output.assert_failure().assert_stderr_contains("Invalid input record");
}

/// Test a missing record file
#[test]
fn test_missing_record_file() {
    let project = TestProject::new().unwrap();

    let output = project.run_minutes(&["rules", "-r", "absent.json"]).unwrap();
    output
        .assert_failure()
        .assert_stderr_contains("Failed to read input record")
        .assert_stderr_contains("Check that the file exists");
}

/// Test template lookup lists what it tried and what exists
#[test]
fn test_template_not_found() {
    let project = TestProject::new().unwrap();
    project.write_record(&RecordFixture::board_meeting()).unwrap();
    project.write_template(&DocumentFixture::legacy_template(minutes_cli::models::TemplateId::Q2)).unwrap();

    let output = project.run_minutes(&["render", "-r", "board_meeting.json"]).unwrap();
    output
        .assert_failure()
        .assert_stderr_contains("Template file for 'Q1' not found")
        .assert_stderr_contains("q1_meeting_template.json")
        .assert_stderr_contains("Available templates: q2_meeting_template.json");
}

/// Test a document that is not a node list
#[test]
fn test_invalid_document() {
    let project = TestProject::new().unwrap();
    project.write_record(&RecordFixture::board_meeting()).unwrap();
    project.write_file("bad_template.json", "[1, 2, 3]").unwrap();

    let output = project.run_minutes(&["render", "-r", "board_meeting.json", "-d", "bad_template.json"]).unwrap();
    output.assert_failure().assert_stderr_contains("Invalid document");
}

/// Test a configuration file with bad TOML
#[test]
fn test_invalid_config() {
    let project = TestProject::new().unwrap();
    project.write_record(&RecordFixture::board_meeting()).unwrap();
    project.write_file("minutes.toml", "[roster\nhonorific = ").unwrap();

    let output = project.run_minutes(&["rules", "-r", "board_meeting.json"]).unwrap();
    output
        .assert_failure()
        .assert_stderr_contains("Invalid configuration file")
        .assert_stderr_contains("[roster], [fallbacks] and [template]");
}

/// Test an explicit --config that does not exist
#[test]
fn test_missing_explicit_config() {
    let project = TestProject::new().unwrap();
    project.write_record(&RecordFixture::board_meeting()).unwrap();

    let output = project
        .run_minutes(&["--config", "nowhere.toml", "rules", "-r", "board_meeting.json"])
        .unwrap();
    output.assert_failure().assert_stderr_contains("Failed to read config file");
}

/// Test --verbose and --quiet cannot be combined
#[test]
fn test_verbose_conflicts_with_quiet() {
    let project = TestProject::new().unwrap();

    let output = project.run_minutes(&["-v", "-q", "scan", "-d", "x.json"]).unwrap();
    output.assert_failure();
    assert_eq!(output.code, Some(2));
}
