//! User scheduling preferences and the slot desirability score.
//!
//! The score of a slot starting at local hour `h` on weekday `d` is:
//!
//! 1. `+50` if `d` is a business day and `h` is within business hours (inclusive)
//! 2. for each preferred range containing `h` (inclusive): `+30` high, `+20`
//!    medium, `+10` otherwise
//! 3. `-20` if `h < 8` or `h > 18`
//! 4. `+max(0, 18 - h)`, a mild early-in-day bonus
//!
//! Scores are unbounded and only used for ordering.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::busy::BusyInterval;
use crate::generator::CandidateSlot;

const BUSINESS_HOURS_POINTS: i64 = 50;
const OFF_HOURS_PENALTY: i64 = 20;
const EARLIEST_REASONABLE_HOUR: i64 = 8;
const LATEST_REASONABLE_HOUR: i64 = 18;

/// Working hours and days. Hours are local to the request's timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    pub start_hour: u32,
    pub end_hour: u32,
    pub days: Vec<Weekday>,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 17,
            days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
        }
    }
}

/// How strongly a preferred range is favoured. Unknown labels count as `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferenceWeight {
    High,
    Medium,
    #[serde(other)]
    Low,
}

impl PreferenceWeight {
    pub fn points(self) -> i64 {
        match self {
            PreferenceWeight::High => 30,
            PreferenceWeight::Medium => 20,
            PreferenceWeight::Low => 10,
        }
    }

    fn label(self) -> &'static str {
        match self {
            PreferenceWeight::High => "high",
            PreferenceWeight::Medium => "medium",
            PreferenceWeight::Low => "low",
        }
    }
}

/// An hour range the user prefers meetings in, inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferredRange {
    pub start_hour: u32,
    pub end_hour: u32,
    pub weight: PreferenceWeight,
}

impl PreferredRange {
    pub fn new(start_hour: u32, end_hour: u32, weight: PreferenceWeight) -> Self {
        Self {
            start_hour,
            end_hour,
            weight,
        }
    }

    pub fn contains_hour(&self, hour: u32) -> bool {
        (self.start_hour..=self.end_hour).contains(&hour)
    }
}

/// Scheduling hints for one user.
///
/// `blocked_times` is carried for the caller's benefit; ranking only consults
/// the calendar's busy intervals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreference {
    #[serde(default)]
    pub business_hours: BusinessHours,
    #[serde(default = "default_preferred_ranges")]
    pub preferred_ranges: Vec<PreferredRange>,
    #[serde(default)]
    pub blocked_times: Vec<BusyInterval>,
}

fn default_preferred_ranges() -> Vec<PreferredRange> {
    vec![
        PreferredRange::new(9, 11, PreferenceWeight::High),
        PreferredRange::new(14, 16, PreferenceWeight::Medium),
    ]
}

impl Default for UserPreference {
    fn default() -> Self {
        Self {
            business_hours: BusinessHours::default(),
            preferred_ranges: default_preferred_ranges(),
            blocked_times: Vec::new(),
        }
    }
}

/// The score of a single slot and the rules that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotScore {
    pub score: i64,
    pub reason: String,
}

/// Score a slot starting at `start`, evaluated in timezone `tz`.
pub fn score_slot(start: DateTime<Utc>, tz: Tz, prefs: &UserPreference) -> SlotScore {
    let local = start.with_timezone(&tz);
    let hour = local.hour();
    let weekday = local.weekday();
    let hour_i = i64::from(hour);

    let mut score = 0;
    let mut reasons = Vec::new();

    let hours = &prefs.business_hours;
    if hours.days.contains(&weekday) && (hours.start_hour..=hours.end_hour).contains(&hour) {
        score += BUSINESS_HOURS_POINTS;
        reasons.push("within business hours".to_string());
    }

    for range in prefs.preferred_ranges.iter().filter(|r| r.contains_hour(hour)) {
        score += range.weight.points();
        reasons.push(format!(
            "preferred {:02}:00-{:02}:00 ({})",
            range.start_hour,
            range.end_hour,
            range.weight.label()
        ));
    }

    if hour_i < EARLIEST_REASONABLE_HOUR || hour_i > LATEST_REASONABLE_HOUR {
        score -= OFF_HOURS_PENALTY;
        reasons.push("outside 08:00-18:00".to_string());
    }

    let early_bonus = (LATEST_REASONABLE_HOUR - hour_i).max(0);
    if early_bonus > 0 {
        score += early_bonus;
        reasons.push(format!("early-day bonus +{}", early_bonus));
    }

    let reason = if reasons.is_empty() {
        "no preference matched".to_string()
    } else {
        reasons.join("; ")
    };

    SlotScore { score, reason }
}

/// Score every available candidate in place. Unavailable candidates keep their
/// conflict reason and a zero score.
pub fn score_candidates(candidates: &mut [CandidateSlot], tz: Tz, prefs: &UserPreference) {
    for slot in candidates.iter_mut().filter(|s| s.available) {
        let SlotScore { score, reason } = score_slot(slot.start, tz, prefs);
        slot.score = score;
        slot.reason = reason;
    }
}
