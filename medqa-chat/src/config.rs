//! Configuration for the conversation orchestrator.

use serde::{Deserialize, Serialize};

use crate::error::{ChatError, Result};

/// Configuration parameters for answering questions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatConfig {
    /// Number of records to retrieve as context per question.
    pub top_k: usize,
    /// When true, an empty retrieval skips the model entirely and answers
    /// with the fixed fallback phrase. When false (default), the prompt is
    /// built with an empty context section and the model is trusted to emit
    /// the fallback itself.
    pub deterministic_fallback: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { top_k: 3, deterministic_fallback: false }
    }
}

impl ChatConfig {
    /// Create a new builder for constructing a [`ChatConfig`].
    pub fn builder() -> ChatConfigBuilder {
        ChatConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`ChatConfig`].
#[derive(Debug, Clone, Default)]
pub struct ChatConfigBuilder {
    config: ChatConfig,
}

impl ChatConfigBuilder {
    /// Set the number of records retrieved as context per question.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Enable or disable the deterministic empty-retrieval fallback.
    pub fn deterministic_fallback(mut self, enabled: bool) -> Self {
        self.config.deterministic_fallback = enabled;
        self
    }

    /// Build the [`ChatConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Config`] if `top_k == 0`.
    pub fn build(self) -> Result<ChatConfig> {
        if self.config.top_k == 0 {
            return Err(ChatError::Config("top_k must be greater than zero".to_string()));
        }
        Ok(self.config)
    }
}
