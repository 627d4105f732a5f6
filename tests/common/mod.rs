//! Shared helpers for the integration tests.

#![allow(dead_code)]

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

use minutes_cli::document::Document;
use minutes_cli::test_utils::{DocumentFixture, RecordFixture};

/// A throwaway working directory with a `templates/` folder.
pub struct TestProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    project_dir: PathBuf,
    templates_dir: PathBuf,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("project");
        let templates_dir = project_dir.join("templates");
        fs::create_dir_all(&templates_dir)?;

        // An empty local config shadows any user-level configuration.
        fs::write(project_dir.join("minutes.toml"), "")?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
            templates_dir,
        })
    }

    pub fn project_path(&self) -> &Path {
        &self.project_dir
    }

    pub fn templates_path(&self) -> &Path {
        &self.templates_dir
    }

    pub fn write_record(&self, fixture: &RecordFixture) -> Result<PathBuf> {
        fixture.write_to(&self.project_dir)
    }

    pub fn write_template(&self, fixture: &DocumentFixture) -> Result<PathBuf> {
        fixture.write_to(&self.templates_dir)
    }

    pub fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.project_dir.join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn load_document(&self, relative: &str) -> Result<Document> {
        Document::load(&self.project_dir.join(relative))
    }

    /// Run the `minutes` binary in the project directory.
    pub fn run_minutes(&self, args: &[&str]) -> Result<CommandOutput> {
        let binary = env!("CARGO_BIN_EXE_minutes");
        let output = Command::new(binary)
            .args(args)
            .current_dir(&self.project_dir)
            .env_remove("MINUTES_CONFIG")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .output()
            .context("Failed to run minutes command")?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }
}

/// Command output helper
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    pub fn assert_success(&self) -> &Self {
        assert!(self.success, "Command failed with code {:?}\nStderr: {}", self.code, self.stderr);
        self
    }

    pub fn assert_failure(&self) -> &Self {
        assert!(!self.success, "Command unexpectedly succeeded\nStdout: {}", self.stdout);
        self
    }

    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Expected stdout to contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Expected stderr to contain '{}'\nActual stderr: {}",
            text,
            self.stderr
        );
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }
}
