/*!
 * Error types for the srtran application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when working with the provider API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors from malformed subtitle data. Recovered locally with fallback
/// defaults, never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Timecode text does not match the strict HH:MM:SS,mmm pattern
    #[error("Invalid timecode: {0:?}")]
    InvalidTimecode(String),

    /// A numeric field inside a timecode could not be parsed
    #[error("Invalid timecode field in {0:?}")]
    InvalidTimecodeField(String),
}

/// Errors in user-supplied configuration, surfaced before any network
/// activity starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Batch size must be at least 1
    #[error("Invalid batch size: {0} (must be at least 1)")]
    InvalidBatchSize(usize),

    /// No API key available from flag, environment, or credential store
    #[error("No API key configured. Use --api-key, GEMINI_API_KEY, or `srtran set-key`")]
    MissingApiKey,

    /// Model name is empty
    #[error("Model name must not be empty")]
    EmptyModel,

    /// Endpoint is not a valid URL
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    /// Unknown target language code
    #[error("Unknown target language: {0} (expected one of vi, en, fr, es)")]
    UnknownLanguage(String),

    /// Unknown translation mode
    #[error("Unknown translation mode: {0} (expected smooth-humorous or fast)")]
    UnknownMode(String),
}

/// Errors that can occur during a translation run
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The provider returned content that yielded no subtitle entries
    #[error("Provider response contained no parseable subtitle entries")]
    EmptyResponse,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from malformed subtitle data
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Error from configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Error from the provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
