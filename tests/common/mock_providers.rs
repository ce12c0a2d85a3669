/*!
 * Mock provider implementation for testing
 *
 * Provides a scripted implementation of the Provider trait to avoid
 * external API calls in tests. Each call pops the next scripted outcome;
 * prompts are recorded so tests can assert on what was sent.
 */

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use srtran::errors::ProviderError;
use srtran::providers::Provider;

/// Scripted outcome for one mock call
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Respond with the given text
    Respond(String),
    /// Fail with a request error carrying the given message
    Fail(String),
}

/// Shared state tracking calls made against the mock
#[derive(Debug, Default)]
pub struct CallLog {
    /// Number of calls made
    pub call_count: usize,
    /// Prompts received, in call order
    pub prompts: Vec<String>,
}

/// Mock provider with a scripted sequence of outcomes
#[derive(Debug)]
pub struct MockProvider {
    script: Mutex<VecDeque<MockOutcome>>,
    log: Arc<Mutex<CallLog>>,
}

impl MockProvider {
    /// Create a mock that plays back the given outcomes in order
    pub fn with_script(outcomes: Vec<MockOutcome>) -> Self {
        MockProvider {
            script: Mutex::new(outcomes.into()),
            log: Arc::new(Mutex::new(CallLog::default())),
        }
    }

    /// Create a mock that answers every call with the same response text
    pub fn always(response: &str) -> Self {
        Self::with_script(vec![MockOutcome::Respond(response.to_string())])
    }

    /// Get the call log
    pub fn log(&self) -> Arc<Mutex<CallLog>> {
        self.log.clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn translate(&self, _model: &str, prompt: &str) -> Result<String, ProviderError> {
        {
            let mut log = self.log.lock().unwrap();
            log.call_count += 1;
            log.prompts.push(prompt.to_string());
        }

        let mut script = self.script.lock().unwrap();
        let outcome = match script.len() {
            0 => return Err(ProviderError::RequestFailed("no scripted response".into())),
            // Keep replaying the last outcome so `always` mocks never run dry
            1 => script.front().cloned().unwrap(),
            _ => script.pop_front().unwrap(),
        };

        match outcome {
            MockOutcome::Respond(text) => Ok(text),
            MockOutcome::Fail(message) => Err(ProviderError::RequestFailed(message)),
        }
    }

    async fn test_connection(&self, _model: &str) -> Result<(), ProviderError> {
        Ok(())
    }
}
