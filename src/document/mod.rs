//! Host-side document model.
//!
//! The engine only sees text nodes. This module is the collaborator that
//! reads a template document from disk, hands its nodes to the engine in
//! processing order and writes the result back out.
//!
//! Documents are exchanged as JSON:
//!
//! ```json
//! {
//!   "nodes": [
//!     { "kind": "header", "text": "[Name of Company]" },
//!     { "kind": "paragraph", "text": "Mr. [Manual] occupied the Chair." },
//!     { "kind": "table_cell", "text": "Place : ____" }
//!   ]
//! }
//! ```
//!
//! Nodes keep their stored order on disk. Processing order is paragraphs,
//! then table cells, then headers, then footers, stable within each kind.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::MinutesError;
use crate::models::{InputRecord, TemplateId};
use crate::templating::{Diagnostics, Engine, TextBearing};

/// Where a node lives in the document. Variant order is processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Paragraph,
    TableCell,
    Header,
    Footer,
}

/// One paragraph of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextNode {
    pub kind: NodeKind,
    pub text: String,
}

impl TextNode {
    pub fn new(kind: NodeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Paragraph, text)
    }
}

impl TextBearing for TextNode {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
    }
}

/// A document as an ordered list of text nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub nodes: Vec<TextNode>,
}

impl Document {
    pub fn new(nodes: Vec<TextNode>) -> Self {
        Self {
            nodes,
        }
    }

    /// Load a document from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read document: {}", path.display()))?;
        Self::from_json(&content).map_err(|e| {
            MinutesError::DocumentParse {
                file: path.display().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Write the document as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(MinutesError::from)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(path, content + "\n")
            .with_context(|| format!("Failed to write document: {}", path.display()))?;
        Ok(())
    }

    /// Mutable references to every node, in processing order.
    pub fn processing_order(&mut self) -> Vec<&mut TextNode> {
        let mut nodes: Vec<&mut TextNode> = self.nodes.iter_mut().collect();
        nodes.sort_by_key(|node| node.kind);
        nodes
    }

    /// Resolve every node for `record` and return the run's diagnostics.
    pub fn resolve(&mut self, engine: &Engine, record: &InputRecord) -> Diagnostics {
        let mut nodes = self.processing_order();
        engine.generate(record, &mut nodes)
    }

    /// All node texts in processing order, for placeholder scanning.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        let mut nodes: Vec<&TextNode> = self.nodes.iter().collect();
        nodes.sort_by_key(|node| node.kind);
        nodes.into_iter().map(|node| node.text.as_str())
    }
}

/// File names tried for a template id, in lookup order.
pub fn template_candidates(template: TemplateId) -> Vec<String> {
    let upper = template.as_str();
    let lower = upper.to_lowercase();
    vec![
        format!("{lower}_meeting_template.json"),
        format!("{upper}_meeting_template.json"),
        format!("{upper} Meeting Template.json"),
        format!("{lower} template.json"),
        format!("{upper} Template.json"),
    ]
}

/// Find the template document for `template` in `dir`.
///
/// # Errors
///
/// Returns [`MinutesError::TemplateNotFound`] naming the files tried and the
/// `.json` files that do exist in `dir`.
pub fn find_template(dir: &Path, template: TemplateId) -> Result<PathBuf> {
    let tried = template_candidates(template);
    if let Some(found) = tried.iter().map(|name| dir.join(name)).find(|path| path.is_file()) {
        tracing::debug!("Using template {}", found.display());
        return Ok(found);
    }

    let mut available: Vec<String> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .filter(|name| name.ends_with(".json"))
                .collect()
        })
        .unwrap_or_default();
    available.sort();

    Err(MinutesError::TemplateNotFound {
        template: template.to_string(),
        tried,
        available,
    }
    .into())
}

/// Default output file name for a generated document.
///
/// `meeting_minutes_<template>_<date without dashes>_<meeting number>.json`,
/// with spaces and slashes in the meeting number turned into underscores.
pub fn output_file_name(record: &InputRecord) -> String {
    let date = record.meeting_date.trim().replace('-', "");
    let number: String = record
        .meeting_number
        .trim()
        .chars()
        .map(|c| if c == ' ' || c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("meeting_minutes_{}_{date}_{number}.json", record.template)
}
