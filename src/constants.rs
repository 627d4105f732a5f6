//! Global constants used throughout the minutes codebase.
//!
//! This module contains the literal tokens and names that are shared between
//! the engine, the configuration defaults and the CLI. Defining them centrally
//! keeps the template vocabulary in one discoverable place.

/// Generic roster placeholder used by the template family for director lines.
///
/// A single occurrence stands for the whole roster; repeated occurrences
/// followed by a role marker stand for one person each.
pub const ROSTER_PLACEHOLDER: &str = "[from MCA]";

/// Generic manual-entry placeholder, resolved to the chairman name when no
/// more specific rule consumed it.
pub const MANUAL_PLACEHOLDER: &str = "[Manual]";

/// Marker left in the auditor remuneration figure when no amount was supplied.
pub const AUDITOR_AMOUNT_MARKER: &str = "[Auditor Payment Amount]";

/// Marker left in the auditor remuneration phrase when no amount in words was
/// supplied.
pub const AUDITOR_WORDS_MARKER: &str = "[Auditor Payment in Words]";

/// Text written in place of the attendee list when none was supplied.
pub const ATTENDANCE_FALLBACK: &str = "[Authorised Officer to be added]";

/// Default honorific prefixed to every person entry.
pub const DEFAULT_HONORIFIC: &str = "Mr.";

/// Default label for the person identifier (director identification number).
pub const DEFAULT_IDENTIFIER_LABEL: &str = "DIN";

/// Sample chairman surname left behind in the Q1 template family.
pub const DEFAULT_STALE_CHAIRMAN_SURNAME: &str = "Mehta";

/// Heading phrases that cleanup collapses when two rules both insert them.
pub const DEFAULT_HEADINGS: &[&str] = &["BOARD OF DIRECTORS MEETING"];

/// Role label given to the chairman entry of the present-directors roster.
pub const CHAIRMAN_ROLE: &str = "Chairman";

/// Role label given to every other present director.
pub const DIRECTOR_ROLE: &str = "Director";

/// Project-local configuration file name.
pub const CONFIG_FILE_NAME: &str = "minutes.toml";

/// Environment variable that overrides configuration discovery.
pub const CONFIG_ENV_VAR: &str = "MINUTES_CONFIG";

/// Number of digits in a valid director identification number.
pub const IDENTIFIER_DIGITS: usize = 8;
