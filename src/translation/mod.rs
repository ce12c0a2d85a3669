/*!
 * Translation of subtitle sequences using an LLM provider.
 *
 * Split into two submodules:
 *
 * - `prompts`: Prompt templates and the per-batch prompt builder
 * - `orchestrator`: The translation run state machine that drives batches
 *   through the provider, recovers from per-batch failures, and merges
 *   results back by entry index
 */

// Re-export main types for easier usage
pub use self::orchestrator::{RunReport, RunState, TranslationRun};
pub use self::prompts::PromptBuilder;

// Submodules
pub mod orchestrator;
pub mod prompts;
