/*!
 * # srtran - SRT subtitle repair and AI translation
 *
 * A Rust library and CLI for repairing SubRip (.srt) subtitle timing and
 * translating subtitle text with Google Gemini.
 *
 * ## Features
 *
 * - Lenient SRT parsing with auditable skip counts
 * - Timestamp repair: positive display durations and no overlaps,
 *   enforced in a single left-to-right pass
 * - Batched translation with per-batch failure isolation: a failed batch
 *   keeps the original text and the run continues
 * - Index-keyed reassembly of translated entries, tolerant of responses
 *   that reorder, omit, or duplicate entries
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management and the credential store
 * - `subtitle_processor`: Timecode codec, SRT parsing and serialization
 * - `repair`: Timestamp repair passes
 * - `translation`: Prompt building and the translation run orchestrator
 * - `providers`: Gemini API client behind the `Provider` trait
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod providers;
pub mod repair;
pub mod subtitle_processor;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::{Config, CredentialStore, TargetLanguage, TranslationMode};
pub use app_controller::Controller;
pub use errors::{AppError, ConfigError, FormatError, ProviderError, TranslationError};
pub use subtitle_processor::{SubtitleCollection, SubtitleEntry};
pub use translation::{RunReport, RunState, TranslationRun};
