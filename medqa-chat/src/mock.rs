//! Mock language model for tests and offline development.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{ChatError, Result};
use crate::llm::Llm;

/// A scriptable [`Llm`] that replays canned responses.
///
/// Responses are consumed in order; once exhausted, a fixed default is
/// returned. Every received prompt is recorded so tests can assert on what
/// the orchestrator actually sent.
pub struct MockLlm {
    responses: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
    delay: Option<Duration>,
    fail: bool,
}

impl Default for MockLlm {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLlm {
    /// Create a mock that always answers with a fixed default.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
            delay: None,
            fail: false,
        }
    }

    /// Queue canned responses, replayed in order.
    pub fn with_responses(responses: &[&str]) -> Self {
        let mock = Self::new();
        mock.responses.lock().unwrap().extend(responses.iter().map(|r| r.to_string()));
        mock
    }

    /// Sleep before answering, to exercise in-flight submission handling.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make every call fail, to exercise backend-unavailable paths.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// The prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// How many completions were requested.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl Llm for MockLlm {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(ChatError::Backend { message: "mock backend failure".to_string() });
        }

        let response = self.responses.lock().unwrap().pop_front();
        Ok(response.unwrap_or_else(|| "mock answer".to_string()))
    }
}
