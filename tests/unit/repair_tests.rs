/*!
 * Tests for the timestamp repair passes
 */

use srtran::repair::{fix_timestamps, resolve_overlaps};
use srtran::subtitle_processor::format_timecode;

use crate::common::entry;

const MIN_DISPLAY_MS: u64 = 800;

#[test]
fn test_fix_timestamps_withOverlap_shouldClampNextStartToPrevEnd() {
    let mut entries = vec![
        entry(1, "00:00:01,000", "00:00:02,000", "a"),
        entry(2, "00:00:01,500", "00:00:03,000", "b"),
    ];

    let repaired = fix_timestamps(&mut entries, MIN_DISPLAY_MS);
    assert_eq!(repaired, 1);

    // Overlap resolved; end unchanged since 3000 > 2000
    assert_eq!(format_timecode(entries[1].start_time_ms), "00:00:02,000");
    assert_eq!(format_timecode(entries[1].end_time_ms), "00:00:03,000");
    assert_eq!(entries[0].start_time_ms, 1_000);
    assert_eq!(entries[0].end_time_ms, 2_000);
}

#[test]
fn test_fix_timestamps_withInvertedInterval_shouldExtendEnd() {
    let mut entries = vec![entry(1, "00:00:05,000", "00:00:04,000", "x")];

    fix_timestamps(&mut entries, MIN_DISPLAY_MS);

    assert_eq!(format_timecode(entries[0].end_time_ms), "00:00:05,800");
}

#[test]
fn test_fix_timestamps_withZeroLengthInterval_shouldExtendEnd() {
    let mut entries = vec![entry(1, "00:00:05,000", "00:00:05,000", "x")];

    fix_timestamps(&mut entries, MIN_DISPLAY_MS);

    assert_eq!(entries[0].end_time_ms, 5_800);
}

#[test]
fn test_fix_timestamps_whenClampEmptiesInterval_shouldReExtendEnd() {
    // Entry 2 is fully inside entry 1's interval: after the clamp its end
    // is behind its start again, so the minimum duration re-applies
    let mut entries = vec![
        entry(1, "00:00:01,000", "00:00:05,000", "a"),
        entry(2, "00:00:02,000", "00:00:03,000", "b"),
    ];

    fix_timestamps(&mut entries, MIN_DISPLAY_MS);

    assert_eq!(entries[1].start_time_ms, 5_000);
    assert_eq!(entries[1].end_time_ms, 5_800);
}

#[test]
fn test_fix_timestamps_shouldEstablishInvariants() {
    let mut entries = vec![
        entry(1, "00:00:03,000", "00:00:02,000", "a"),
        entry(2, "00:00:01,000", "00:00:01,200", "b"),
        entry(3, "00:00:02,000", "00:00:10,000", "c"),
        entry(4, "00:00:02,500", "00:00:02,400", "d"),
    ];

    fix_timestamps(&mut entries, MIN_DISPLAY_MS);

    for e in &entries {
        assert!(e.end_time_ms > e.start_time_ms, "end must exceed start: {:?}", e);
    }
    for pair in entries.windows(2) {
        assert!(
            pair[1].start_time_ms >= pair[0].end_time_ms,
            "no overlap allowed: {:?}",
            pair
        );
    }
}

#[test]
fn test_fix_timestamps_shouldBeIdempotent() {
    let mut entries = vec![
        entry(1, "00:00:01,000", "00:00:02,000", "a"),
        entry(2, "00:00:01,500", "00:00:01,400", "b"),
        entry(3, "00:00:01,600", "00:00:09,000", "c"),
    ];

    fix_timestamps(&mut entries, MIN_DISPLAY_MS);
    let first_pass = entries.clone();

    let repaired_again = fix_timestamps(&mut entries, MIN_DISPLAY_MS);
    assert_eq!(repaired_again, 0);
    assert_eq!(entries, first_pass);
}

#[test]
fn test_fix_timestamps_firstEntry_shouldHaveNoPredecessorConstraint() {
    // A perfectly valid first entry is untouched even at offset zero
    let mut entries = vec![entry(1, "00:00:00,000", "00:00:01,000", "a")];

    let repaired = fix_timestamps(&mut entries, MIN_DISPLAY_MS);
    assert_eq!(repaired, 0);
    assert_eq!(entries[0].start_time_ms, 0);
}

#[test]
fn test_fix_timestamps_neverLooksAhead() {
    // A later entry starting earlier must not pull an earlier entry back
    let mut entries = vec![
        entry(1, "00:00:05,000", "00:00:06,000", "a"),
        entry(2, "00:00:01,000", "00:00:02,000", "b"),
    ];

    fix_timestamps(&mut entries, MIN_DISPLAY_MS);

    assert_eq!(entries[0].start_time_ms, 5_000);
    assert_eq!(entries[0].end_time_ms, 6_000);
    assert_eq!(entries[1].start_time_ms, 6_000);
    assert_eq!(entries[1].end_time_ms, 6_800);
}

#[test]
fn test_resolve_overlaps_shouldOnlyTouchOverlappingPairs() {
    let mut entries = vec![
        entry(1, "00:00:01,000", "00:00:02,000", "a"),
        entry(2, "00:00:01,500", "00:00:03,000", "b"),
        entry(3, "00:00:04,000", "00:00:05,000", "c"),
    ];

    let adjusted = resolve_overlaps(&mut entries, MIN_DISPLAY_MS);
    assert_eq!(adjusted, 1);

    assert_eq!(entries[1].start_time_ms, 2_000);
    assert_eq!(entries[1].end_time_ms, 3_000);
    // Non-overlapping entry untouched
    assert_eq!(entries[2].start_time_ms, 4_000);
}

#[test]
fn test_resolve_overlaps_whenClampEmptiesInterval_shouldExtendEnd() {
    let mut entries = vec![
        entry(1, "00:00:01,000", "00:00:05,000", "a"),
        entry(2, "00:00:02,000", "00:00:04,000", "b"),
    ];

    resolve_overlaps(&mut entries, MIN_DISPLAY_MS);

    assert_eq!(entries[1].start_time_ms, 5_000);
    assert_eq!(entries[1].end_time_ms, 5_800);
}
