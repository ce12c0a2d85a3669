use anyhow::{Context, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::providers::gemini::Gemini;
use crate::repair;
use crate::subtitle_processor::SubtitleCollection;
use crate::translation::{PromptBuilder, TranslationRun};

// @module: Application controller for subtitle repair and translation

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Load a subtitle file: read with encoding fallback, parse leniently,
    /// and repair timestamps. The returned collection satisfies the timing
    /// invariants (positive durations, no overlaps).
    pub fn load_subtitles<P: AsRef<Path>>(&self, input_file: P) -> Result<SubtitleCollection> {
        let input_file = input_file.as_ref();

        let content = FileManager::read_to_string(input_file)
            .with_context(|| format!("Failed to read subtitle file: {:?}", input_file))?;

        let mut collection =
            SubtitleCollection::from_srt_string(input_file, &content, self.config.min_display_ms);

        if collection.entries.is_empty() {
            return Err(anyhow::anyhow!(
                "No subtitle entries found in {:?} ({} block(s) skipped)",
                input_file,
                collection.skipped_blocks
            ));
        }

        let repaired =
            repair::fix_timestamps(&mut collection.entries, self.config.min_display_ms);

        info!(
            "Loaded {} entries from {:?} ({} skipped, {} repaired)",
            collection.entries.len(),
            input_file,
            collection.skipped_blocks,
            repaired
        );

        Ok(collection)
    }

    /// Repair timestamps and write the fixed file.
    pub fn fix<P: AsRef<Path>>(&self, input_file: P, output: Option<PathBuf>) -> Result<PathBuf> {
        let input_file = input_file.as_ref();
        let collection = self.load_subtitles(input_file)?;

        let output_path = output
            .unwrap_or_else(|| FileManager::generate_output_path(input_file, "fixed", "srt"));

        collection.write_to_srt(&output_path)?;
        info!("Wrote repaired subtitles to {:?}", output_path);

        Ok(output_path)
    }

    /// Run the full pipeline: load, repair, translate in batches, and write
    /// the translated file.
    pub async fn translate<P: AsRef<Path>>(
        &self,
        input_file: P,
        output: Option<PathBuf>,
        api_key: String,
    ) -> Result<PathBuf> {
        let input_file = input_file.as_ref();

        self.config.validate()?;

        let collection = self.load_subtitles(input_file)?;
        let source_file = collection.source_file.clone();

        let provider = Arc::new(Gemini::new(
            api_key,
            self.config.endpoint.clone(),
            self.config.timeout_secs,
        ));

        let prompt_builder =
            PromptBuilder::new(self.config.target_language, self.config.mode);

        let run = TranslationRun::new(
            collection.entries,
            provider,
            prompt_builder,
            self.config.model.clone(),
            self.config.max_entries_per_batch,
            self.config.min_display_ms,
        )?;

        info!(
            "Translating to {} ({} mode) with model {}",
            self.config.target_language.display_name(),
            self.config.mode,
            self.config.model
        );

        let progress_bar = ProgressBar::new(0);
        progress_bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} batches ({eta})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );

        let pb = progress_bar.clone();
        let report = run
            .execute(move |completed, total| {
                pb.set_length(total as u64);
                pb.set_position(completed as u64);
            })
            .await;
        progress_bar.finish_and_clear();

        if report.failed_batches > 0 {
            warn!(
                "{} of {} batch(es) fell back to the original text",
                report.failed_batches, report.total_batches
            );
        }

        let output_path = output.unwrap_or_else(|| {
            FileManager::generate_output_path(
                input_file,
                self.config.target_language.code(),
                "srt",
            )
        });

        let translated = SubtitleCollection::new(source_file, report.entries);
        translated.write_to_srt(&output_path)?;

        info!("Wrote translated subtitles to {:?}", output_path);

        Ok(output_path)
    }
}
