/*!
 * Prompt construction for subtitle translation.
 *
 * The prompt is a deterministic template: a fixed instruction block, the
 * target language and mode, then one rendered SRT block per entry. The
 * model is asked to reply in the same near-SRT shape so the lenient parser
 * can recover the entries and match them back by index.
 */

use crate::app_config::{TargetLanguage, TranslationMode};
use crate::subtitle_processor::SubtitleEntry;

/// Fixed instruction block prepended to every batch
const TRANSLATION_INSTRUCTIONS: &str = "\
Translate the following subtitle entries with these requirements:
- Keep the order and the timecodes (start/end) exactly as given.
- Do not change the number of lines or add new sentences.
- Do not let a translated line repeat the meaning of the previous one; keep the flow continuous.
- Keep character names and terminology unchanged and consistent.
Return .srt format (index \\n start --> end \\n translated_text).";

/// Mode-specific tone instruction
fn mode_instruction(mode: TranslationMode) -> &'static str {
    match mode {
        TranslationMode::SmoothHumorous => {
            "- Translate naturally and fluidly, with a light humorous touch (never overdone)."
        }
        TranslationMode::Fast => {
            "- Translate concisely and literally, with minimal rephrasing."
        }
    }
}

/// Builder for per-batch translation prompts
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    target_language: TargetLanguage,
    mode: TranslationMode,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(target_language: TargetLanguage, mode: TranslationMode) -> Self {
        Self {
            target_language,
            mode,
        }
    }

    /// Build the prompt for one batch of entries
    pub fn build(&self, batch: &[SubtitleEntry]) -> String {
        let mut prompt = String::new();

        prompt.push_str(&format!(
            "Target language: {} ({})\nMode: {}\n",
            self.target_language.code(),
            self.target_language.display_name(),
            self.mode
        ));
        prompt.push_str(TRANSLATION_INSTRUCTIONS);
        prompt.push('\n');
        prompt.push_str(mode_instruction(self.mode));
        prompt.push_str("\n\n");

        for entry in batch {
            prompt.push_str(&entry.to_string());
            prompt.push_str("\n\n");
        }

        prompt.trim_end().to_string()
    }
}
