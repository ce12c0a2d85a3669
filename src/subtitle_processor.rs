use std::fmt;
use std::path::{Path, PathBuf};
use regex::Regex;
use once_cell::sync::Lazy;
use anyhow::Result;
use log::{debug, error, warn};

use crate::errors::{ConfigError, FormatError};
use crate::file_utils::FileManager;

// @module: SRT parsing, serialization and manipulation

// @const: Strict SRT timecode pattern (HH:MM:SS,mmm)
static TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{2}:\d{2}:\d{2},\d{3}$").unwrap()
});

// @const: Timing line pattern. Deliberately loose around the arrow so that
// entries with malformed timecodes still reach the fallback rules instead
// of being dropped wholesale.
static TIMING_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\S+)\s+-->\s+(\S+)").unwrap()
});

/// Parse a strict SRT timecode (HH:MM:SS,mmm) to milliseconds.
///
/// Anything that does not match the fixed-width pattern is a `FormatError`;
/// callers must treat that as "invalid, use fallback" and never coerce to
/// zero themselves.
pub fn parse_timecode(text: &str) -> Result<u64, FormatError> {
    if !TIMECODE_REGEX.is_match(text) {
        return Err(FormatError::InvalidTimecode(text.to_string()));
    }

    let field = |s: &str| -> Result<u64, FormatError> {
        s.parse()
            .map_err(|_| FormatError::InvalidTimecodeField(text.to_string()))
    };

    let hours = field(&text[0..2])?;
    let minutes = field(&text[3..5])?;
    let seconds = field(&text[6..8])?;
    let millis = field(&text[9..12])?;

    Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
}

/// Format a millisecond offset as an SRT timecode (HH:MM:SS,mmm).
///
/// Values of 100 hours or more widen past two digits instead of being
/// clamped or wrapped. The SRT field is fixed-width only up to 99 hours;
/// this is an accepted format limitation.
pub fn format_timecode(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    // @field: Original ordinal from the file. Need not be contiguous or
    // sorted; sequence position is the display order.
    pub index: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Subtitle text, may be multi-line
    pub text: String,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry
    #[allow(dead_code)] // Used by tests and external consumers
    pub fn new(index: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Self {
        SubtitleEntry {
            index,
            start_time_ms,
            end_time_ms,
            text,
        }
    }

    /// Build an entry from textual timecodes, applying the fallback rules
    /// for invalid text: a start that fails the strict pattern becomes
    /// `00:00:00,000`, an end that fails it becomes `start + min_display_ms`.
    pub fn from_raw(
        index: usize,
        start: &str,
        end: &str,
        text: String,
        min_display_ms: u64,
    ) -> Self {
        let start_time_ms = parse_timecode(start).unwrap_or(0);
        let end_time_ms =
            parse_timecode(end).unwrap_or(start_time_ms + min_display_ms);

        SubtitleEntry {
            index,
            start_time_ms,
            end_time_ms,
            text,
        }
    }

    /// Convert start time to formatted SRT timecode
    pub fn format_start_time(&self) -> String {
        format_timecode(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timecode
    pub fn format_end_time(&self) -> String {
        format_timecode(self.end_time_ms)
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\n{} --> {}\n{}",
            self.index,
            self.format_start_time(),
            self.format_end_time(),
            self.text
        )
    }
}

/// Result of a lenient parse: the well-formed entries plus a count of the
/// blocks that were dropped for not matching the SRT grammar. Leniency is
/// deliberate (the input may be malformed or LLM-generated near-SRT text)
/// but the loss is reported so callers can log it.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    /// Entries parsed in file order
    pub entries: Vec<SubtitleEntry>,

    /// Number of blocks skipped for not matching the grammar
    pub skipped_blocks: usize,
}

/// Parse SRT text into subtitle entries.
///
/// A block is a line of digits, a `start --> end` timing line, then one or
/// more text lines; blocks are separated by blank lines. Blocks that do not
/// match are skipped and counted, never an error. `\r` and surrounding
/// whitespace are stripped from text bodies. `min_display_ms` is the
/// fallback duration for entries whose end timecode is unparseable.
pub fn parse_srt_string(content: &str, min_display_ms: u64) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    // Normalize line endings so CRLF files split into blocks the same way
    let content = content.replace("\r\n", "\n");

    for block in content.split("\n\n") {
        let lines: Vec<&str> = block
            .lines()
            .map(|l| l.trim_end_matches('\r').trim())
            .skip_while(|l| l.is_empty())
            .collect();

        // Whitespace between blocks, not a grammar violation
        if lines.iter().all(|l| l.is_empty()) {
            continue;
        }

        match parse_block(&lines, min_display_ms) {
            Some(entry) => outcome.entries.push(entry),
            None => {
                debug!("Skipping malformed subtitle block: {:?}", lines.first());
                outcome.skipped_blocks += 1;
            }
        }
    }

    if outcome.skipped_blocks > 0 {
        warn!(
            "Skipped {} malformed subtitle block(s) during parse",
            outcome.skipped_blocks
        );
    }

    outcome
}

/// Parse one block's trimmed lines, or None if the grammar does not match.
fn parse_block(lines: &[&str], min_display_ms: u64) -> Option<SubtitleEntry> {
    let index: usize = lines.first()?.parse().ok()?;

    let timing = lines.get(1)?;
    let caps = TIMING_LINE_REGEX.captures(timing)?;
    let start = caps.get(1)?.as_str();
    let end = caps.get(2)?.as_str();

    let text = lines.get(2..)?.join("\n").trim().to_string();
    if text.is_empty() {
        return None;
    }

    Some(SubtitleEntry::from_raw(index, start, end, text, min_display_ms))
}

/// Serialize entries to SRT text: blocks in sequence order separated by one
/// blank line, no trailing blank line at end of file.
pub fn serialize_entries(entries: &[SubtitleEntry]) -> String {
    entries
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Collection of subtitle entries with their source file
#[derive(Debug)]
pub struct SubtitleCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// List of subtitle entries
    pub entries: Vec<SubtitleEntry>,

    /// Blocks dropped by the lenient parser when this collection was loaded
    pub skipped_blocks: usize,
}

impl SubtitleCollection {
    /// Create a new subtitle collection
    pub fn new(source_file: PathBuf, entries: Vec<SubtitleEntry>) -> Self {
        SubtitleCollection {
            source_file,
            entries,
            skipped_blocks: 0,
        }
    }

    /// Parse SRT content into a collection
    pub fn from_srt_string<P: AsRef<Path>>(
        source_file: P,
        content: &str,
        min_display_ms: u64,
    ) -> Self {
        let outcome = parse_srt_string(content, min_display_ms);
        SubtitleCollection {
            source_file: source_file.as_ref().to_path_buf(),
            entries: outcome.entries,
            skipped_blocks: outcome.skipped_blocks,
        }
    }

    /// Serialize the collection to SRT text
    pub fn to_srt_string(&self) -> String {
        serialize_entries(&self.entries)
    }

    /// Write the collection to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        FileManager::write_to_file(path, &self.to_srt_string())
    }

    /// Split entries into contiguous batches of at most `max_entries`
    /// consecutive entries for translation. The final batch may be smaller.
    /// Batches partition the sequence exactly.
    pub fn split_into_batches(
        &self,
        max_entries: usize,
    ) -> Result<Vec<Vec<SubtitleEntry>>, ConfigError> {
        split_into_batches(&self.entries, max_entries)
    }
}

/// Greedy left-to-right partition of entries into batches of at most
/// `max_entries`. `max_entries` must be at least 1.
pub fn split_into_batches(
    entries: &[SubtitleEntry],
    max_entries: usize,
) -> Result<Vec<Vec<SubtitleEntry>>, ConfigError> {
    if max_entries == 0 {
        return Err(ConfigError::InvalidBatchSize(max_entries));
    }

    let batches: Vec<Vec<SubtitleEntry>> = entries
        .chunks(max_entries)
        .map(|chunk| chunk.to_vec())
        .collect();

    // Protect against accidental loss of subtitles
    let total_batched: usize = batches.iter().map(|b| b.len()).sum();
    if total_batched != entries.len() {
        error!(
            "Lost entries during batching! Original: {}, after batching: {}",
            entries.len(),
            total_batched
        );
    }

    Ok(batches)
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        Ok(())
    }
}
