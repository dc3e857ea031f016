//! Detect candidate slots that collide with busy intervals.
//!
//! A slot `[s, e)` conflicts with a busy interval `[bs, be)` when any of:
//!
//! - `bs <= s < be` (the slot starts inside the busy interval)
//! - `bs < e <= be` (the slot ends inside the busy interval)
//! - `s <= bs && e >= be` (the slot contains the busy interval)
//!
//! Adjacent intervals (one ends exactly when the other starts) are NOT conflicts,
//! except that a zero-length busy interval sitting inside a slot is caught by the
//! containment clause.

use chrono::{DateTime, Utc};

use crate::busy::BusyInterval;
use crate::generator::CandidateSlot;

/// Whether the slot `[slot_start, slot_end)` conflicts with `busy`.
pub fn conflicts_with(
    slot_start: DateTime<Utc>,
    slot_end: DateTime<Utc>,
    busy: &BusyInterval,
) -> bool {
    let starts_inside = busy.start <= slot_start && slot_start < busy.end;
    let ends_inside = busy.start < slot_end && slot_end <= busy.end;
    let contains = slot_start <= busy.start && slot_end >= busy.end;

    starts_inside || ends_inside || contains
}

/// Count the busy intervals a slot conflicts with.
pub fn count_conflicts(slot: &CandidateSlot, busy: &[BusyInterval]) -> usize {
    busy.iter()
        .filter(|b| conflicts_with(slot.start, slot.end, b))
        .count()
}

/// Set `available` on every candidate. Unavailable slots get a reason naming how
/// many busy intervals they hit.
pub fn mark_availability(candidates: &mut [CandidateSlot], busy: &[BusyInterval]) {
    for slot in candidates.iter_mut() {
        let hits = count_conflicts(slot, busy);
        slot.available = hits == 0;
        if hits > 0 {
            slot.reason = format!(
                "conflicts with {} busy interval{}",
                hits,
                if hits == 1 { "" } else { "s" }
            );
        }
    }
}
