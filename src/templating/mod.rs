//! Placeholder resolution for meeting-minutes templates.
//!
//! Minutes templates are ordinary documents whose text carries placeholder
//! tokens: bracketed (`[Name of Company]`), angle-bracketed (`<year>`) and
//! underscore runs (`20____`). This module turns the text of each node into
//! its resolved form for one input record.
//!
//! # Architecture
//!
//! - [`formatters`] - Pure value formatting (ordinals, long dates, grouped amounts)
//! - [`rules`] - The ordered rule table built once per record
//! - [`section`] - Section-context classification carried across nodes
//! - [`roster`] - Director list rendering (labelled and numbered)
//! - [`expansion`] - Mapping repeated roster slots to roster entries
//! - [`cleanup`] - Idempotent repair of substitution artifacts
//! - [`diagnostics`] - Observed and unresolved placeholder tracking
//! - [`engine`] - [`Engine`] and the per-document [`GenerationRun`]
//!
//! # Processing a node
//!
//! ```text
//! text ──► observe ──► classify ──► expand rosters ──► rule table ──► cleanup ──► unresolved
//!                          │
//!                  SectionContext carried to the next node
//! ```
//!
//! Nodes are processed strictly in document order because the section
//! context is sequential state. The engine never fails on content: values
//! that do not format fall back to their raw text, and placeholders nobody
//! resolved are reported through [`Diagnostics`].
//!
//! # Example
//!
//! ```rust,no_run
//! use minutes_cli::config::MinutesConfig;
//! use minutes_cli::models::{InputRecord, Person};
//! use minutes_cli::templating::Engine;
//!
//! let record = InputRecord {
//!     chairman_name: "John Doe".to_string(),
//!     present_directors: vec![Person::new("John Doe", "12345678")],
//!     ..InputRecord::default()
//! };
//! let mut nodes = vec!["Mr. [Manual] occupied the Chair.".to_string()];
//! let diagnostics = Engine::new(MinutesConfig::default()).generate(&record, &mut nodes);
//! assert_eq!(nodes[0], "Mr. John Doe occupied the Chair.");
//! assert!(diagnostics.unresolved.is_empty());
//! ```

pub mod cleanup;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod expansion;
pub mod formatters;
pub mod roster;
pub mod rules;
pub mod section;


pub use cleanup::{ArtifactKind, Cleanup};
pub use diagnostics::{Diagnostics, Suggestion, find_placeholders};
pub use engine::{Engine, GenerationRun, TextBearing};
pub use error::FormatError;
pub use expansion::RosterExpander;
pub use roster::{EntryStyle, RolePolicy, Roster};
pub use rules::{Pattern, Replacement, Rule, RuleFamily, RuleTable};
pub use section::SectionContext;
