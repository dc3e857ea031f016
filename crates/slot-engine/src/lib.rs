//! # slot-engine
//!
//! Deterministic meeting slot proposal for the Optigence scheduling assistant.
//!
//! Given a search window, a meeting duration, the busy intervals reported by a
//! calendar provider and the user's scheduling preferences, the engine proposes
//! the best few meeting placements. Every stage is a pure function over plain
//! data; the only collaborators (calendar and preference lookups) sit behind the
//! traits in [`proposal`].
//!
//! ## Modules
//!
//! - [`window`] — Request model, time window, input validation
//! - [`busy`] — Provider busy intervals → UTC instants
//! - [`generator`] — Candidate slots on a fixed 30-minute grid
//! - [`conflict`] — Three-clause overlap test against busy intervals
//! - [`scoring`] — User preferences and the desirability score
//! - [`ranker`] — Stable descending sort and truncation
//! - [`proposal`] — Collaborator traits and the end-to-end pipeline
//! - [`error`] — Error types

pub mod busy;
pub mod conflict;
pub mod error;
pub mod generator;
pub mod proposal;
pub mod ranker;
pub mod scoring;
pub mod window;

pub use busy::{normalize_busy, BusyInterval, RawBusyInterval};
pub use conflict::{conflicts_with, mark_availability};
pub use error::{ProviderError, SchedulingError};
pub use generator::{generate_candidates, CandidateSlot};
pub use proposal::{
    propose_slots, suggest_slots, CalendarProvider, MeetingProposal, PreferenceStore,
    ProposedSlot, StaticCalendar, StaticPreferences,
};
pub use ranker::rank;
pub use scoring::{score_candidates, score_slot, PreferenceWeight, UserPreference};
pub use window::{validate, MeetingRequest, TimeWindow, ValidatedRequest};
