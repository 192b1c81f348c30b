//! Fixed-pattern UTC timestamps with millisecond precision.

use crate::{Error, Result};
use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};

/// `yyyy-MM-dd HH:mm:ss.SSS`, always UTC.
pub const PATTERN: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Formats an instant, dropping anything below milliseconds.
#[must_use]
pub fn format(at: &DateTime<Utc>) -> String {
    at.format(PATTERN).to_string()
}

/// Parses an instant written by [`format`].
///
/// # Errors
///
/// Returns [`Error::Format`] if the text does not match [`PATTERN`].
pub fn parse(text: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(text, PATTERN)
        .map(|naive| naive.and_utc())
        .map_err(|e| Error::format("timestamp", text, e))
}

/// Returns the current instant truncated to milliseconds.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
