//! The substitution engine.
//!
//! [`Engine`] holds the configuration; [`Engine::start`] opens a
//! [`GenerationRun`] for one input record. A run owns everything that lives
//! for one document: the rule table, the roster expander, the cleanup table,
//! the section context and the diagnostics. Nothing is shared between runs,
//! so independent runs may execute on different threads.
//!
//! Per node, [`GenerationRun::resolve`]:
//!
//! 1. records the placeholders present as observed,
//! 2. updates the section context from the node text,
//! 3. expands roster slots for that context,
//! 4. applies the rule table,
//! 5. runs cleanup until stable,
//! 6. records the placeholders still present as unresolved.
//!
//! Empty nodes are returned unchanged and do not touch the context.

use crate::config::MinutesConfig;
use crate::models::InputRecord;

use super::cleanup::Cleanup;
use super::diagnostics::Diagnostics;
use super::expansion::RosterExpander;
use super::roster::EntryStyle;
use super::rules::RuleTable;
use super::section::SectionContext;

/// A node of text the engine can read and overwrite.
///
/// Implemented by the host document model; the engine never opens or saves
/// documents itself.
pub trait TextBearing {
    fn text(&self) -> &str;
    fn set_text(&mut self, text: String);
}

impl TextBearing for String {
    fn text(&self) -> &str {
        self
    }

    fn set_text(&mut self, text: String) {
        *self = text;
    }
}

impl<T: TextBearing + ?Sized> TextBearing for &mut T {
    fn text(&self) -> &str {
        (**self).text()
    }

    fn set_text(&mut self, text: String) {
        (**self).set_text(text);
    }
}

/// Entry point for minutes generation.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: MinutesConfig,
}

impl Engine {
    pub fn new(config: MinutesConfig) -> Self {
        Self {
            config,
        }
    }

    pub fn config(&self) -> &MinutesConfig {
        &self.config
    }

    /// The rule table a run for `record` would use.
    pub fn rule_table(&self, record: &InputRecord) -> RuleTable {
        RuleTable::for_record(record, &self.config)
    }

    /// Open a generation run for one record.
    pub fn start<'r>(&self, record: &'r InputRecord) -> GenerationRun<'r> {
        let style = EntryStyle::from(&self.config.roster);
        let placeholder = self.config.roster.placeholder.trim();
        let expander = if placeholder.is_empty() {
            None
        } else {
            match RosterExpander::new(placeholder, style.clone()) {
                Ok(expander) => Some(expander),
                Err(e) => {
                    tracing::warn!("Roster expansion disabled for placeholder {placeholder:?}: {e}");
                    None
                }
            }
        };

        GenerationRun {
            record,
            rules: self.rule_table(record),
            expander,
            cleanup: Cleanup::new(&style, record.fs_year, &self.config.template.headings),
            context: SectionContext::default(),
            diagnostics: Diagnostics::new(),
            nodes: 0,
        }
    }

    /// Resolve every node in document order and write the results back.
    ///
    /// Nodes are only written once all of them have been resolved. An empty
    /// slice yields empty diagnostics.
    pub fn generate<N: TextBearing>(&self, record: &InputRecord, nodes: &mut [N]) -> Diagnostics {
        let mut run = self.start(record);
        let resolved: Vec<String> = nodes.iter().map(|node| run.resolve(node.text())).collect();
        for (node, text) in nodes.iter_mut().zip(resolved) {
            node.set_text(text);
        }
        run.finish()
    }
}

/// State for one document and one input record.
#[derive(Debug)]
pub struct GenerationRun<'r> {
    record: &'r InputRecord,
    rules: RuleTable,
    expander: Option<RosterExpander>,
    cleanup: Cleanup,
    context: SectionContext,
    diagnostics: Diagnostics,
    nodes: usize,
}

impl GenerationRun<'_> {
    /// Resolve one node's text.
    pub fn resolve(&mut self, text: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }
        self.nodes += 1;
        self.diagnostics.observe(text);

        let next = self.context.classify(text);
        if next != self.context {
            tracing::debug!("Node {}: section context {} -> {}", self.nodes, self.context, next);
            self.context = next;
        }

        let expanded = match &self.expander {
            Some(expander) => expander.expand(text, self.context, self.record),
            None => text.to_string(),
        };
        let substituted = self.rules.apply(&expanded);
        let cleaned = self.cleanup.apply(&substituted);

        self.diagnostics.observe_unresolved(&cleaned);
        cleaned
    }

    /// The section context after the last resolved node.
    pub fn context(&self) -> SectionContext {
        self.context
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// End the run and hand back its diagnostics.
    pub fn finish(self) -> Diagnostics {
        tracing::debug!(
            "Resolved {} nodes: {} placeholders observed, {} unresolved",
            self.nodes,
            self.diagnostics.observed.len(),
            self.diagnostics.unresolved.len()
        );
        if self.diagnostics.has_unresolved() {
            tracing::warn!(
                "{} placeholders may not have been replaced: {:?}",
                self.diagnostics.unresolved.len(),
                self.diagnostics.unresolved
            );
        }
        self.diagnostics
    }
}
