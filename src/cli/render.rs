//! Resolve a template document for an input record.
//!
//! The template is either given directly with `--document` or looked up by
//! the record's template id in `--templates-dir`. Generation runs on a
//! blocking worker; the output file is written only once every node has been
//! resolved, so a failed run never leaves a half-resolved document behind.
//!
//! # Examples
//!
//! ```bash
//! # Look up q1_meeting_template.json (or a variant) in ./templates
//! minutes render --record meeting.json
//!
//! # Explicit template and output, machine-readable report
//! minutes render -r meeting.json -d board.json -o out.json --format json
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::MinutesConfig;
use crate::document::{Document, find_template, output_file_name};
use crate::models::TemplateId;
use crate::templating::{Diagnostics, Engine, Suggestion};

use super::common::{OutputFormat, check_record, load_record};

/// Arguments for `minutes render`.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Input record (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub record: PathBuf,

    /// Template document to resolve (skips template lookup)
    #[arg(short, long, value_name = "FILE")]
    pub document: Option<PathBuf>,

    /// Override the template id from the record (Q1, Q2, Q3, Q4)
    #[arg(short, long)]
    pub template: Option<TemplateId>,

    /// Directory searched for template documents
    #[arg(long, value_name = "DIR", default_value = "templates")]
    pub templates_dir: PathBuf,

    /// Output file (default: meeting_minutes_<template>_<date>_<number>.json next to the template)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Render records that fail validation
    #[arg(long)]
    pub skip_validation: bool,
}

/// Result of a render, as printed with `--format json`.
#[derive(Debug, Serialize)]
pub struct RenderReport {
    pub output: PathBuf,
    pub template: TemplateId,
    pub template_used: PathBuf,
    #[serde(flatten)]
    pub diagnostics: Diagnostics,
    pub suggestions: Vec<Suggestion>,
}

impl RenderCommand {
    pub async fn execute(self, config: &MinutesConfig) -> Result<()> {
        let report = self.render(config).await?;
        print_report(&report, self.format)
    }

    /// Run the generation and write the output document.
    pub async fn render(&self, config: &MinutesConfig) -> Result<RenderReport> {
        let mut record = load_record(&self.record)?;
        if let Some(template) = self.template {
            record.template = template;
        }
        check_record(&record, self.skip_validation)?;

        let source = match &self.document {
            Some(path) => path.clone(),
            None => find_template(&self.templates_dir, record.template)?,
        };
        let document = Document::load(&source)?;
        let output = match &self.output {
            Some(path) => path.clone(),
            None => source.parent().unwrap_or_else(|| Path::new(".")).join(output_file_name(&record)),
        };

        tracing::info!("Rendering {} with template {}", source.display(), record.template);
        let engine = Engine::new(config.clone());
        let template = record.template;
        let (document, diagnostics, suggestions) = tokio::task::spawn_blocking(move || {
            let mut document = document;
            let diagnostics = document.resolve(&engine, &record);
            let suggestions = diagnostics.suggestions(&engine.rule_table(&record));
            (document, diagnostics, suggestions)
        })
        .await
        .context("Generation worker failed")?;

        document.save(&output)?;
        tracing::info!("Generated minutes document: {}", output.display());

        Ok(RenderReport {
            output,
            template,
            template_used: source,
            diagnostics,
            suggestions,
        })
    }
}

fn print_report(report: &RenderReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Text => {
            println!("{} Generated {}", "✓".green(), report.output.display());
            println!("  Template: {} ({})", report.template, report.template_used.display());
            println!("  Placeholders observed: {}", report.diagnostics.observed.len());

            if report.diagnostics.unresolved.is_empty() {
                println!("  {} All placeholders resolved", "✓".green());
            } else {
                println!(
                    "  {} {} placeholder(s) may not have been replaced:",
                    "⚠".yellow(),
                    report.diagnostics.unresolved.len()
                );
                for placeholder in &report.diagnostics.unresolved {
                    match report.suggestions.iter().find(|s| &s.placeholder == placeholder) {
                        Some(s) => println!("    {placeholder} (did you mean {}?)", s.closest.cyan()),
                        None => println!("    {placeholder}"),
                    }
                }
            }
        }
    }
    Ok(())
}
