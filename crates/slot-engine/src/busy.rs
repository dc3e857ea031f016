//! Normalize provider busy intervals into UTC instants.
//!
//! Calendar providers report busy periods as ISO 8601 strings. This module turns
//! them into [`BusyInterval`]s sorted by start time. Malformed provider data is an
//! error, never an empty schedule: treating it as "no busy intervals" would
//! report the user as free when they are not.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulingError};

/// A busy period exactly as the calendar provider reported it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBusyInterval {
    pub start: String,
    pub end: String,
}

impl RawBusyInterval {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// A provider-reported conflict, as UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusyInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Parse an ISO 8601 instant into `DateTime<Utc>`.
///
/// Accepts RFC 3339 with an offset (e.g., "2026-03-16T09:00:00-04:00") and naive
/// local time (e.g., "2026-03-16T09:00:00"), which is interpreted as UTC.
pub fn parse_instant(s: &str) -> std::result::Result<DateTime<Utc>, String> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| format!("invalid datetime '{}': {}", s, e))
}

/// Convert provider busy intervals into UTC [`BusyInterval`]s, sorted by
/// `(start, end)`.
///
/// # Errors
/// Returns `SchedulingError::MalformedBusyInterval` if an instant cannot be parsed
/// or an interval ends before it starts.
pub fn normalize_busy(raw: &[RawBusyInterval]) -> Result<Vec<BusyInterval>> {
    let mut intervals = raw
        .iter()
        .enumerate()
        .map(|(index, interval)| -> Result<BusyInterval> {
            let malformed =
                |reason: String| SchedulingError::MalformedBusyInterval { index, reason };
            let start = parse_instant(&interval.start).map_err(malformed)?;
            let end = parse_instant(&interval.end).map_err(malformed)?;
            if end < start {
                return Err(malformed(format!("end {} is before start {}", end, start)));
            }
            Ok(BusyInterval { start, end })
        })
        .collect::<Result<Vec<_>>>()?;

    intervals.sort_by_key(|b| (b.start, b.end));
    Ok(intervals)
}
