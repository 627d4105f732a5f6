//! Print the ordered rule table built for an input record.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::config::MinutesConfig;
use crate::models::TemplateId;
use crate::templating::{Engine, Pattern, RuleTable};

use super::common::{OutputFormat, load_record};

/// Arguments for `minutes rules`.
#[derive(Args, Debug)]
pub struct RulesCommand {
    /// Input record (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub record: PathBuf,

    /// Override the template id from the record (Q1, Q2, Q3, Q4)
    #[arg(short, long)]
    pub template: Option<TemplateId>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct RuleEntry<'a> {
    priority: u16,
    family: &'static str,
    kind: &'static str,
    pattern: &'a str,
    replacement: &'a str,
}

fn entries(table: &RuleTable) -> Vec<RuleEntry<'_>> {
    table
        .iter()
        .map(|rule| RuleEntry {
            priority: rule.priority(),
            family: rule.family().as_str(),
            kind: match rule.pattern() {
                Pattern::Literal(_) => "literal",
                Pattern::Regex(_) => "regex",
            },
            pattern: rule.pattern().as_str(),
            replacement: rule.replacement().as_str(),
        })
        .collect()
}

impl RulesCommand {
    pub async fn execute(self, config: &MinutesConfig) -> Result<()> {
        let mut record = load_record(&self.record)?;
        if let Some(template) = self.template {
            record.template = template;
        }
        let table = Engine::new(config.clone()).rule_table(&record);

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries(&table))?),
            OutputFormat::Text => {
                println!("{} rule(s) for template {}, in application order:", table.len(), record.template);
                print!("{table}");
            }
        }
        Ok(())
    }
}
