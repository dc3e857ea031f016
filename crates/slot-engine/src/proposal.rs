//! End-to-end slot proposal with external collaborators.
//!
//! Pipeline: validate → fetch busy intervals → normalize → fetch preferences →
//! generate candidates → mark conflicts → score → rank.
//!
//! The calendar and preference lookups are the only fallible steps after
//! validation. Their failures surface as distinct [`SchedulingError`] variants;
//! the algorithm never runs on partial data.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::busy::{normalize_busy, BusyInterval, RawBusyInterval};
use crate::conflict::mark_availability;
use crate::error::{ProviderError, Result, SchedulingError};
use crate::generator::{generate_candidates, CandidateSlot};
use crate::ranker::rank;
use crate::scoring::{score_candidates, UserPreference};
use crate::window::{validate, MeetingRequest, TimeWindow, ValidatedRequest};

/// Source of busy intervals for a calendar identity.
pub trait CalendarProvider {
    fn busy_intervals(
        &self,
        calendar_id: &str,
        window: &TimeWindow,
    ) -> std::result::Result<Vec<RawBusyInterval>, ProviderError>;
}

/// Source of stored scheduling preferences. `Ok(None)` means "use defaults".
pub trait PreferenceStore {
    fn preferences(&self, user_id: &str)
        -> std::result::Result<Option<UserPreference>, ProviderError>;
}

/// A ranked meeting slot in the proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub score: i64,
    pub reason: String,
}

impl From<CandidateSlot> for ProposedSlot {
    fn from(slot: CandidateSlot) -> Self {
        Self {
            start: slot.start,
            end: slot.end,
            score: slot.score,
            reason: slot.reason,
        }
    }
}

/// The response handed back to the caller.
///
/// Besides the ranked slots it carries the busy intervals and the preference
/// snapshot that produced them, for transparency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingProposal {
    /// Best slots first, at most `max_results` of them.
    pub slots: Vec<ProposedSlot>,
    pub busy: Vec<BusyInterval>,
    pub preferences: UserPreference,
    pub timezone: String,
    pub duration_minutes: i64,
    /// Number of grid candidates evaluated before filtering.
    pub candidates_considered: usize,
    pub generated_at: DateTime<Utc>,
}

/// Run the pure part of the pipeline: generate, filter, score and rank.
///
/// Returns the ranked slots and the number of candidates generated.
pub fn suggest_slots(
    window: &TimeWindow,
    duration: chrono::Duration,
    tz: Tz,
    busy: &[BusyInterval],
    prefs: &UserPreference,
    limit: usize,
) -> (Vec<CandidateSlot>, usize) {
    let mut candidates = generate_candidates(window.start, window.end, duration);
    let considered = candidates.len();

    mark_availability(&mut candidates, busy);
    score_candidates(&mut candidates, tz, prefs);

    let available = candidates.iter().filter(|s| s.available).count();
    debug!(considered, available, busy = busy.len(), "scored candidate slots");

    (rank(candidates, limit), considered)
}

/// Propose meeting slots for `request`.
///
/// `now` timestamps the response; it does not influence ranking.
///
/// # Errors
/// - validation errors (see [`validate`]), for which `is_client_error()` is true
/// - `SchedulingError::Calendar` if the calendar provider fails
/// - `SchedulingError::MalformedBusyInterval` if the provider's data is unusable
/// - `SchedulingError::Preferences` if the preference store fails
///
/// An empty `slots` list is a successful result, not an error.
pub fn propose_slots<C, P>(
    request: &MeetingRequest,
    calendar: &C,
    preferences: &P,
    now: DateTime<Utc>,
) -> Result<MeetingProposal>
where
    C: CalendarProvider + ?Sized,
    P: PreferenceStore + ?Sized,
{
    let ValidatedRequest {
        calendar_id,
        user_id,
        window,
        tz,
        duration,
        max_results,
    } = validate(request)?;

    let raw_busy = calendar
        .busy_intervals(&calendar_id, &window)
        .map_err(SchedulingError::Calendar)?;
    let busy = normalize_busy(&raw_busy)?;
    debug!(calendar_id = %calendar_id, busy = busy.len(), "fetched busy intervals");

    let prefs = preferences
        .preferences(&user_id)
        .map_err(SchedulingError::Preferences)?
        .unwrap_or_default();

    let (ranked, candidates_considered) =
        suggest_slots(&window, duration, tz, &busy, &prefs, max_results);

    Ok(MeetingProposal {
        slots: ranked.into_iter().map(ProposedSlot::from).collect(),
        busy,
        preferences: prefs,
        timezone: window.timezone,
        duration_minutes: duration.num_minutes(),
        candidates_considered,
        generated_at: now,
    })
}

/// In-memory calendar: a fixed busy list per calendar id, or a fixed failure.
///
/// Unknown calendar ids report an empty schedule.
#[derive(Debug, Clone, Default)]
pub struct StaticCalendar {
    busy: HashMap<String, Vec<RawBusyInterval>>,
    failure: Option<ProviderError>,
}

impl StaticCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_busy(mut self, calendar_id: impl Into<String>, busy: Vec<RawBusyInterval>) -> Self {
        self.busy.insert(calendar_id.into(), busy);
        self
    }

    /// A calendar whose every lookup fails with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self {
            busy: HashMap::new(),
            failure: Some(error),
        }
    }
}

impl CalendarProvider for StaticCalendar {
    fn busy_intervals(
        &self,
        calendar_id: &str,
        _window: &TimeWindow,
    ) -> std::result::Result<Vec<RawBusyInterval>, ProviderError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(self.busy.get(calendar_id).cloned().unwrap_or_default())
    }
}

/// In-memory preference store.
#[derive(Debug, Clone, Default)]
pub struct StaticPreferences {
    stored: HashMap<String, UserPreference>,
    failure: Option<ProviderError>,
}

impl StaticPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user_id: impl Into<String>, prefs: UserPreference) -> Self {
        self.stored.insert(user_id.into(), prefs);
        self
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            stored: HashMap::new(),
            failure: Some(error),
        }
    }
}

impl PreferenceStore for StaticPreferences {
    fn preferences(
        &self,
        user_id: &str,
    ) -> std::result::Result<Option<UserPreference>, ProviderError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(self.stored.get(user_id).cloned())
    }
}
