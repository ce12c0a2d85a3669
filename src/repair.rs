/*!
 * Timestamp repair for subtitle sequences.
 *
 * A single left-to-right pass enforces, in sequence order:
 * - every entry displays for a positive duration (`end > start`), extending
 *   too-short intervals by a minimum display duration
 * - no entry starts before its predecessor ends
 *
 * The pass never looks ahead: a later entry's original timing never
 * influences an earlier entry. The first entry has no predecessor
 * constraint. Repair is idempotent.
 */

use log::debug;

use crate::subtitle_processor::SubtitleEntry;

/// Repair timestamps in place. Returns the number of entries adjusted.
pub fn fix_timestamps(entries: &mut [SubtitleEntry], min_display_ms: u64) -> usize {
    let mut repaired = 0;
    let mut prev_end_ms: Option<u64> = None;

    for entry in entries.iter_mut() {
        let mut touched = false;

        // Inverted or zero-length interval: extend the end
        if entry.end_time_ms <= entry.start_time_ms {
            entry.end_time_ms = entry.start_time_ms + min_display_ms;
            touched = true;
        }

        // Overlap with the committed predecessor: push the start forward,
        // then re-check the interval against the new start
        if let Some(prev_end) = prev_end_ms {
            if entry.start_time_ms < prev_end {
                entry.start_time_ms = prev_end;
                touched = true;
                if entry.end_time_ms <= entry.start_time_ms {
                    entry.end_time_ms = entry.start_time_ms + min_display_ms;
                }
            }
        }

        if touched {
            repaired += 1;
        }
        prev_end_ms = Some(entry.end_time_ms);
    }

    if repaired > 0 {
        debug!("Repaired timestamps on {} of {} entries", repaired, entries.len());
    }

    repaired
}

/// Simplified overlap-only pass used on the translated sequence after a
/// run, to absorb any timing drift introduced by the translation
/// round-trip. Only the overlap condition triggers an adjustment; the
/// interval is then re-validated and extended if the clamp emptied it.
pub fn resolve_overlaps(entries: &mut [SubtitleEntry], min_display_ms: u64) -> usize {
    let mut adjusted = 0;

    for i in 1..entries.len() {
        let prev_end = entries[i - 1].end_time_ms;
        if entries[i].start_time_ms < prev_end {
            entries[i].start_time_ms = prev_end;
            if entries[i].end_time_ms <= entries[i].start_time_ms {
                entries[i].end_time_ms = entries[i].start_time_ms + min_display_ms;
            }
            adjusted += 1;
        }
    }

    if adjusted > 0 {
        debug!("Resolved {} overlap(s) in translated sequence", adjusted);
    }

    adjusted
}
