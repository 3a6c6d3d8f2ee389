//! Interchange timestamp handling
//!
//! Every instant leaves the crate as `YYYY-MM-DDTHH:MM:SSZ` in UTC and is read
//! back with the same fixed format.

use crate::error::{DayportError, Result};
use chrono::{DateTime, NaiveDateTime, SubsecRound, TimeZone, Utc};

/// Fixed interchange format, always UTC
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Format an instant in any zone as a UTC interchange string
pub fn format_timestamp<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    instant
        .with_timezone(&Utc)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Parse an interchange string, tagging the result as UTC
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| {
            DayportError::MalformedInput(format!("Invalid timestamp '{}': {}", value, e))
        })
}

/// Convert epoch seconds into a UTC instant
pub fn from_epoch_seconds(seconds: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(seconds, 0).single()
}

/// Current time at the precision the interchange format can carry
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}
