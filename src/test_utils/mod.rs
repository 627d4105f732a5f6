//! Test utilities for the minutes generator
//!
//! This module provides logging setup for tests and fixtures for input records
//! and template documents.
//!
//! # Example
//!
//! ```rust,no_run
//! use minutes_cli::test_utils::{DocumentFixture, RecordFixture, init_test_logging};
//!
//! init_test_logging(None);
//! let record = RecordFixture::board_meeting().record().unwrap();
//! let template = DocumentFixture::q1_template();
//! assert_eq!(record.company_name, "Acme Widgets Private Limited");
//! assert!(!template.document.nodes.is_empty());
//! ```

pub mod fixtures;

pub use fixtures::{DocumentFixture, RecordFixture, SLOT};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Installs a test-writer subscriber once per process. Uses `level` when
/// given, otherwise `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=minutes_cli=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
