//! Meeting-minutes generation by placeholder resolution.
//!
//! A minutes template is a document whose paragraphs, table cells, headers and
//! footers carry placeholder tokens. Given one structured [`models::InputRecord`],
//! the [`templating::Engine`] resolves every node in document order: it tracks
//! which section of the minutes each node belongs to, expands director rosters
//! for that section, applies an ordered rule table and repairs substitution
//! artifacts. Placeholders left over are reported, never raised.
//!
//! # Modules
//!
//! - [`templating`] - The resolution engine
//! - [`models`] - Input record types and validation
//! - [`document`] - JSON document model, template lookup and output naming
//! - [`config`] - `minutes.toml` configuration and discovery
//! - [`core`] - Host-side errors and user-facing error reporting
//! - [`cli`] - The `minutes` command-line front end

// Core functionality modules
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;

// Resolution engine and its data
pub mod document;
pub mod models;
pub mod templating;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
