//! Core types shared across the crate: host-side errors and their
//! user-facing presentation.

pub mod error;

pub use error::{ErrorContext, MinutesError, user_friendly_error};
