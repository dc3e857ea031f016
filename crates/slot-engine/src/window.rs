//! Meeting request model and input validation.
//!
//! Validation runs before any slot is generated. Once a request is validated the
//! rest of the pipeline is total: it degrades to an empty result instead of
//! failing.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulingError};

pub const MIN_DURATION_MINUTES: u32 = 15;
pub const MAX_DURATION_MINUTES: u32 = 480;
pub const DEFAULT_MAX_RESULTS: usize = 3;
/// Longest searchable window. Bounds the candidate grid at 31 * 48 starts.
pub const MAX_WINDOW_DAYS: i64 = 31;

/// The span searched for a meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// IANA timezone used for hour-of-day and weekday scoring.
    pub timezone: String,
}

/// A request to propose meeting slots, as received from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRequest {
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,
    #[serde(default = "default_user_id")]
    pub user_id: String,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<usize>,
}

impl MeetingRequest {
    /// Parse a request from JSON.
    ///
    /// # Errors
    /// Returns `SchedulingError::MalformedRequest` if the text is not valid JSON
    /// or a field has the wrong shape (unparseable instant, negative duration).
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SchedulingError::MalformedRequest(e.to_string()))
    }
}

fn default_calendar_id() -> String {
    "primary".to_string()
}

fn default_user_id() -> String {
    "default".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

/// A request that passed validation, with its timezone and duration resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub calendar_id: String,
    pub user_id: String,
    pub window: TimeWindow,
    pub tz: Tz,
    pub duration: Duration,
    pub max_results: usize,
}

impl ValidatedRequest {
    pub fn duration_minutes(&self) -> i64 {
        self.duration.num_minutes()
    }
}

/// Parse an IANA timezone name.
///
/// # Errors
/// Returns `SchedulingError::InvalidTimezone` if the name is unknown.
pub fn parse_timezone(timezone: &str) -> Result<Tz> {
    timezone
        .parse()
        .map_err(|_| SchedulingError::InvalidTimezone(timezone.to_string()))
}

/// Check a request and resolve it into a [`ValidatedRequest`].
///
/// A window whose end equals its start is accepted; it simply yields no slots.
///
/// # Errors
/// - `InvalidWindow` if `window_end` is before `window_start`
/// - `WindowTooLong` if the window spans more than [`MAX_WINDOW_DAYS`] days
/// - `InvalidDuration` if `duration_minutes` is outside 15..=480
/// - `InvalidTimezone` if `timezone` is not an IANA identifier
/// - `InvalidMaxResults` if `max_results` is `Some(0)`
pub fn validate(request: &MeetingRequest) -> Result<ValidatedRequest> {
    if request.window_end < request.window_start {
        return Err(SchedulingError::InvalidWindow {
            start: request.window_start,
            end: request.window_end,
        });
    }

    let span = request.window_end - request.window_start;
    if span > Duration::days(MAX_WINDOW_DAYS) {
        return Err(SchedulingError::WindowTooLong {
            days: span.num_days(),
            max_days: MAX_WINDOW_DAYS,
        });
    }

    if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&request.duration_minutes) {
        return Err(SchedulingError::InvalidDuration(request.duration_minutes));
    }

    let tz = parse_timezone(&request.timezone)?;

    let max_results = request.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
    if max_results == 0 {
        return Err(SchedulingError::InvalidMaxResults);
    }

    Ok(ValidatedRequest {
        calendar_id: request.calendar_id.clone(),
        user_id: request.user_id.clone(),
        window: TimeWindow {
            start: request.window_start,
            end: request.window_end,
            timezone: request.timezone.clone(),
        },
        tz,
        duration: Duration::minutes(i64::from(request.duration_minutes)),
        max_results,
    })
}
