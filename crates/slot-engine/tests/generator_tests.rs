//! Tests for candidate slot generation.

use chrono::{DateTime, Duration, TimeZone, Utc};
use slot_engine::generator::{generate_candidates, SLOT_STEP_MINUTES};

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, hour, min, 0).unwrap()
}

#[test]
fn hour_long_slots_on_half_hour_grid() {
    // Window 09:00-17:00, 60 min → starts 09:00, 09:30, ..., 16:00 = 15 slots
    let slots = generate_candidates(at(9, 0), at(17, 0), Duration::minutes(60));

    assert_eq!(slots.len(), 15);
    assert_eq!(slots[0].start, at(9, 0));
    assert_eq!(slots[1].start, at(9, 30));
    assert_eq!(slots.last().unwrap().start, at(16, 0));
    assert_eq!(slots.last().unwrap().end, at(17, 0));
}

#[test]
fn step_is_independent_of_duration() {
    let slots = generate_candidates(at(9, 0), at(12, 0), Duration::minutes(15));

    for pair in slots.windows(2) {
        assert_eq!((pair[1].start - pair[0].start).num_minutes(), SLOT_STEP_MINUTES);
    }
    // Last start 11:30 (11:30 + 15 = 11:45 ≤ 12:00); 12:00 would end past the window.
    assert_eq!(slots.len(), 6);
}

#[test]
fn every_slot_has_the_requested_duration() {
    let slots = generate_candidates(at(8, 0), at(18, 0), Duration::minutes(45));
    assert!(!slots.is_empty());
    assert!(slots.iter().all(|s| s.duration_minutes() == 45));
}

#[test]
fn no_slot_ends_after_window() {
    let slots = generate_candidates(at(9, 0), at(10, 45), Duration::minutes(60));
    // Starts: 09:00 (ends 10:00), 09:30 (ends 10:30); 10:00 would end 11:00.
    assert_eq!(slots.len(), 2);
    assert!(slots.iter().all(|s| s.end <= at(10, 45)));
}

#[test]
fn duration_longer_than_window_is_empty() {
    let slots = generate_candidates(at(9, 0), at(9, 45), Duration::minutes(60));
    assert!(slots.is_empty());
}

#[test]
fn full_day_meeting_on_exact_window_yields_one_slot() {
    let slots = generate_candidates(at(9, 0), at(17, 0), Duration::minutes(480));
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].start, at(9, 0));
    assert_eq!(slots[0].end, at(17, 0));
}

#[test]
fn empty_window_is_empty() {
    assert!(generate_candidates(at(9, 0), at(9, 0), Duration::minutes(15)).is_empty());
}

#[test]
fn inverted_window_is_empty() {
    assert!(generate_candidates(at(10, 0), at(9, 0), Duration::minutes(15)).is_empty());
}

#[test]
fn new_candidates_start_available_and_unscored() {
    let slots = generate_candidates(at(9, 0), at(10, 0), Duration::minutes(30));
    assert!(slots.iter().all(|s| s.available && s.score == 0 && s.reason.is_empty()));
}

#[test]
fn grid_crosses_midnight() {
    let start = Utc.with_ymd_and_hms(2026, 3, 16, 23, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2026, 3, 17, 1, 0, 0).unwrap();
    let slots = generate_candidates(start, end, Duration::minutes(60));

    assert_eq!(slots.len(), 3);
    assert_eq!(slots[2].start, Utc.with_ymd_and_hms(2026, 3, 17, 0, 0, 0).unwrap());
}
