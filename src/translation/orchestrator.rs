/*!
 * Translation run orchestration.
 *
 * A `TranslationRun` owns both the original and the translated sequence for
 * the duration of one end-to-end run. Batches are processed strictly
 * sequentially: the upstream service and its rate limits make sequential
 * calls the safe default, and later batches never depend on earlier
 * results. Failure is isolated per batch; a failed batch keeps the original
 * text and the run continues.
 *
 * `execute` consumes the run, so a second run over the same session state
 * cannot start while one is active, and nothing else can mutate the
 * sequences mid-run.
 */

use std::collections::HashMap;
use std::sync::Arc;
use log::{error, info, warn};

use crate::errors::ConfigError;
use crate::providers::Provider;
use crate::repair;
use crate::subtitle_processor::{self, SubtitleEntry};
use crate::translation::prompts::PromptBuilder;

/// State of a translation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Created but not started
    Idle,
    /// Batches in flight
    Running,
    /// All batches processed
    Completed,
    /// Run could not proceed
    Aborted,
}

/// Outcome of a completed run
#[derive(Debug)]
pub struct RunReport {
    /// Translated entries in original sequence order, overlap-repaired
    pub entries: Vec<SubtitleEntry>,

    /// Total number of batches processed
    pub total_batches: usize,

    /// Batches that fell back to the original text
    pub failed_batches: usize,

    /// Final state (`Completed` unless the run aborted before dispatch)
    pub state: RunState,
}

/// One end-to-end translation attempt across all batches of a loaded file
pub struct TranslationRun {
    /// Original entries, already timestamp-repaired
    entries: Vec<SubtitleEntry>,

    /// Translated sequence, parallel to `entries`. Pre-seeded with the
    /// original text so no slot can ever reach export empty; batch failure
    /// and partial misses simply leave the seed in place.
    translated: Vec<SubtitleEntry>,

    /// Index value -> sequence position, for index-keyed merging
    slot_by_index: HashMap<usize, usize>,

    provider: Arc<dyn Provider>,
    prompt_builder: PromptBuilder,
    model: String,
    max_entries_per_batch: usize,
    min_display_ms: u64,
    state: RunState,
}

impl TranslationRun {
    /// Create a new run over the given entries.
    ///
    /// Fails with `ConfigError` before any network activity if the batch
    /// size is invalid.
    pub fn new(
        entries: Vec<SubtitleEntry>,
        provider: Arc<dyn Provider>,
        prompt_builder: PromptBuilder,
        model: impl Into<String>,
        max_entries_per_batch: usize,
        min_display_ms: u64,
    ) -> Result<Self, ConfigError> {
        if max_entries_per_batch == 0 {
            return Err(ConfigError::InvalidBatchSize(max_entries_per_batch));
        }

        // Later duplicates of an index win, matching merge behavior
        let slot_by_index = entries
            .iter()
            .enumerate()
            .map(|(pos, e)| (e.index, pos))
            .collect();

        let translated = entries.clone();

        Ok(Self {
            entries,
            translated,
            slot_by_index,
            provider,
            prompt_builder,
            model: model.into(),
            max_entries_per_batch,
            min_display_ms,
            state: RunState::Idle,
        })
    }

    /// Current run state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Drive all batches through the provider and return the merged,
    /// overlap-repaired translated sequence.
    ///
    /// `progress` is invoked with `(completed_batches, total_batches)` after
    /// each batch, in batch order.
    pub async fn execute(mut self, progress: impl Fn(usize, usize)) -> RunReport {
        if self.entries.is_empty() {
            warn!("No subtitle entries to translate");
            self.state = RunState::Aborted;
            return RunReport {
                entries: self.translated,
                total_batches: 0,
                failed_batches: 0,
                state: self.state,
            };
        }

        self.state = RunState::Running;

        // Batch size was validated in new(). Batches are re-sliced per
        // iteration so the merge can take `&mut self` between them.
        let total_entries = self.entries.len();
        let total_batches = total_entries.div_ceil(self.max_entries_per_batch);
        let mut failed_batches = 0;

        info!(
            "Starting translation run: {} entries in {} batch(es)",
            total_entries, total_batches
        );

        for batch_number in 0..total_batches {
            let start = batch_number * self.max_entries_per_batch;
            let end = usize::min(start + self.max_entries_per_batch, total_entries);
            let prompt = self.prompt_builder.build(&self.entries[start..end]);

            // A cooperative cancellation check would go here, between
            // batches; an in-flight call is never interrupted.
            match self.provider.translate(&self.model, &prompt).await {
                Err(e) => {
                    error!(
                        "API error on batch {} of {}: {}. Falling back to original text for this batch.",
                        batch_number + 1,
                        total_batches,
                        e
                    );
                    failed_batches += 1;
                    // Slots keep their pre-seeded original text
                }
                Ok(response_text) => {
                    let parsed = subtitle_processor::parse_srt_string(
                        &response_text,
                        self.min_display_ms,
                    );

                    if parsed.entries.is_empty() {
                        warn!(
                            "Parsed 0 entries from response for batch {} of {}; keeping original text.",
                            batch_number + 1,
                            total_batches
                        );
                        failed_batches += 1;
                    } else {
                        self.merge_results(&parsed.entries);
                    }
                }
            }

            progress(batch_number + 1, total_batches);
        }

        // Absorb any timing drift from the translation round-trip
        repair::resolve_overlaps(&mut self.translated, self.min_display_ms);

        self.state = RunState::Completed;
        info!(
            "Translation run completed: {}/{} batch(es) succeeded",
            total_batches - failed_batches,
            total_batches
        );

        RunReport {
            entries: self.translated,
            total_batches,
            failed_batches,
            state: self.state,
        }
    }

    /// Merge parsed result entries into the translated sequence, keyed by
    /// `index` equality, never by position: the response may reorder, omit,
    /// or duplicate entries. Only the text field is overwritten; results
    /// whose index has no match are discarded silently.
    fn merge_results(&mut self, results: &[SubtitleEntry]) {
        for result in results {
            if let Some(&slot) = self.slot_by_index.get(&result.index) {
                self.translated[slot].text = result.text.clone();
            }
        }
    }
}
