//! Error types for slot-engine operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Failure reported by an external collaborator (calendar or preference store).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("authentication rejected by provider")]
    Unauthorized,

    #[error("provider quota exceeded")]
    QuotaExceeded,

    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("malformed provider response: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Invalid window: end {end} is before start {start}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid window: {days} days exceeds the {max_days}-day limit")]
    WindowTooLong { days: i64, max_days: i64 },

    #[error("Invalid duration: {0} minutes (expected 15-480)")]
    InvalidDuration(u32),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid max_results: must be at least 1")]
    InvalidMaxResults,

    #[error("Malformed busy interval #{index}: {reason}")]
    MalformedBusyInterval { index: usize, reason: String },

    #[error("Calendar provider error: {0}")]
    Calendar(#[source] ProviderError),

    #[error("Preference store error: {0}")]
    Preferences(#[source] ProviderError),
}

impl SchedulingError {
    /// True for errors caused by the caller's request rather than an upstream
    /// collaborator.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SchedulingError::MalformedRequest(_)
                | SchedulingError::InvalidWindow { .. }
                | SchedulingError::WindowTooLong { .. }
                | SchedulingError::InvalidDuration(_)
                | SchedulingError::InvalidTimezone(_)
                | SchedulingError::InvalidMaxResults
        )
    }
}

pub type Result<T> = std::result::Result<T, SchedulingError>;
