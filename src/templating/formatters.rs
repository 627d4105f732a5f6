//! Value formatters for minutes documents.
//!
//! Pure functions that turn raw record values (ISO dates, integers) into the
//! strings a legal minutes document expects: ordinal numbers, long-form dates
//! and South-Asian grouped amounts.
//!
//! Formatters that can fail return [`FormatError`]; callers that must never
//! fail wrap them with [`or_raw`], which logs the failure and falls back to the
//! original value.
//!
//! # Examples
//!
//! ```rust
//! use minutes_cli::templating::formatters::{grouped_amount, long_date, ordinal};
//!
//! assert_eq!(ordinal(21), "21st");
//! assert_eq!(grouped_amount(1_234_567), "12,34,567");
//! assert_eq!(long_date("2025-04-05").unwrap(), "05 April 2025");
//! ```

use chrono::{Datelike, NaiveDate};

use super::error::FormatError;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Render `n` with its English ordinal suffix.
///
/// Numbers whose last two digits fall in `10..=20` take "th"; otherwise the
/// last digit decides (1 -> st, 2 -> nd, 3 -> rd, anything else -> th).
/// Zero and negative inputs always take "th".
pub fn ordinal(n: i64) -> String {
    format!("{n}{}", ordinal_suffix(n))
}

fn ordinal_suffix(n: i64) -> &'static str {
    if n <= 0 {
        return "th";
    }
    if (10..=20).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

fn parse_iso_date(iso_date: &str) -> Result<NaiveDate, FormatError> {
    NaiveDate::parse_from_str(iso_date.trim(), ISO_DATE_FORMAT).map_err(|source| {
        FormatError::InvalidDate {
            value: iso_date.to_string(),
            source,
        }
    })
}

/// Render an ISO date as `"<zero-padded day> <full month name> <year>"`.
///
/// `"2025-04-05"` becomes `"05 April 2025"`.
pub fn long_date(iso_date: &str) -> Result<String, FormatError> {
    Ok(parse_iso_date(iso_date)?.format("%d %B %Y").to_string())
}

/// Render an ISO date with an ordinal day, e.g. `"5th April 2025"`.
pub fn ordinal_date(iso_date: &str) -> Result<String, FormatError> {
    let date = parse_iso_date(iso_date)?;
    Ok(format!("{} {}", ordinal(i64::from(date.day())), date.format("%B %Y")))
}

/// Render an amount using South-Asian digit grouping.
///
/// The last three digits form one group and every group before it has two
/// digits: `1234567` becomes `"12,34,567"`, `100000` becomes `"1,00,000"`.
pub fn grouped_amount(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}

/// Parse a raw amount, tolerating surrounding whitespace and existing commas.
pub fn parse_amount(raw: &str) -> Result<u64, FormatError> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<u64>().map_err(|_| FormatError::InvalidAmount {
        value: raw.to_string(),
    })
}

/// Parse and group a raw amount in one step.
pub fn format_amount(raw: &str) -> Result<String, FormatError> {
    parse_amount(raw).map(grouped_amount)
}

/// Unwrap a formatter result, falling back to the raw input on failure.
///
/// The failure is logged at warn level; it is never propagated.
pub fn or_raw(result: Result<String, FormatError>) -> String {
    match result {
        Ok(formatted) => formatted,
        Err(e) => {
            tracing::warn!("{}. Using raw value.", e);
            e.value().to_string()
        }
    }
}
