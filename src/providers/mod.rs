/*!
 * Provider implementations for the translation service.
 *
 * The `Provider` trait is the seam between the translation orchestrator and
 * the network: the orchestrator only ever hands a prompt to a provider and
 * receives text or an error back. The concrete client here is Google
 * Gemini; tests substitute a scripted mock.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for LLM providers
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Translate the given prompt using the named model.
    ///
    /// # Returns
    /// * `Ok(text)` - The raw response text from the model
    /// * `Err(ProviderError)` - Any failure; callers must treat all error
    ///   variants uniformly (fall back at batch granularity)
    async fn translate(&self, model: &str, prompt: &str) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self, model: &str) -> Result<(), ProviderError>;
}

pub mod gemini;
