//! Order available slots by score and keep the best few.

use crate::generator::CandidateSlot;

/// Keep available slots, sort by descending score and truncate to `limit`.
///
/// The sort is stable, so equal scores keep their chronological order. Fewer
/// than `limit` available slots returns all of them; none returns an empty list.
pub fn rank(candidates: Vec<CandidateSlot>, limit: usize) -> Vec<CandidateSlot> {
    let mut available: Vec<CandidateSlot> =
        candidates.into_iter().filter(|s| s.available).collect();
    available.sort_by(|a, b| b.score.cmp(&a.score));
    available.truncate(limit);
    available
}
