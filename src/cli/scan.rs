//! List the placeholders a template document contains.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::document::Document;
use crate::templating::find_placeholders;

use super::common::OutputFormat;

/// Arguments for `minutes scan`.
#[derive(Args, Debug)]
pub struct ScanCommand {
    /// Template document to scan
    #[arg(short, long, value_name = "FILE")]
    pub document: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Placeholders found in a document with their occurrence counts.
#[derive(Debug, Default, Serialize)]
pub struct ScanReport {
    pub nodes: usize,
    pub placeholders: BTreeMap<String, usize>,
}

impl ScanReport {
    pub fn from_document(document: &Document) -> Self {
        let mut report = Self::default();
        for text in document.texts() {
            report.nodes += 1;
            for placeholder in find_placeholders(text) {
                *report.placeholders.entry(placeholder).or_default() += 1;
            }
        }
        report
    }
}

impl ScanCommand {
    pub async fn execute(self) -> Result<()> {
        let document = Document::load(&self.document)?;
        let report = ScanReport::from_document(&document);

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => {
                println!(
                    "{} placeholder(s) in {} node(s) of {}",
                    report.placeholders.len(),
                    report.nodes,
                    self.document.display()
                );
                for (placeholder, count) in &report.placeholders {
                    println!("  {count:>3}  {placeholder}");
                }
            }
        }
        Ok(())
    }
}
