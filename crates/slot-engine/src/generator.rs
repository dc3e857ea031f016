//! Candidate slot generation on a fixed grid.
//!
//! Candidates start at `window_start + k * 30min` for k = 0, 1, 2, ... and stop
//! before the first one whose end would pass `window_end`. Each start is
//! recomputed from the window start rather than accumulated, so there is no drift.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Distance between consecutive candidate starts, independent of duration.
pub const SLOT_STEP_MINUTES: i64 = 30;

/// A proposed meeting placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// True iff the slot conflicts with no busy interval.
    pub available: bool,
    /// Relative desirability. Only meaningful for ordering.
    pub score: i64,
    /// Human-readable explanation of `score` (or of the conflict).
    pub reason: String,
}

impl CandidateSlot {
    pub fn new(start: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            start,
            end: start + duration,
            available: true,
            score: 0,
            reason: String::new(),
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Generate every candidate slot of `duration` that fits inside the window.
///
/// Returns an empty list when the duration is longer than the window or is not
/// positive. Output is in chronological order.
pub fn generate_candidates(
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    duration: Duration,
) -> Vec<CandidateSlot> {
    if duration <= Duration::zero() || window_end - window_start < duration {
        return Vec::new();
    }

    let mut candidates = Vec::new();
    for k in 0i64.. {
        let start = window_start + Duration::minutes(SLOT_STEP_MINUTES * k);
        if start + duration > window_end {
            break;
        }
        candidates.push(CandidateSlot::new(start, duration));
    }

    candidates
}
