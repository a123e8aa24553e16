//! Chat-completions client for OpenAI-compatible `/v1/chat/completions`
//! endpoints.
//!
//! Covers hosted APIs and local servers (llama.cpp `llama-server`, Ollama,
//! vLLM) alike. No streaming and no tool calls; the orchestrator only needs
//! one blocking completion per question.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{ChatError, Result};
use crate::llm::Llm;

/// Generous request timeout so a wedged backend surfaces as a failure
/// instead of hanging the session indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// An [`Llm`] backed by an OpenAI-compatible chat completions API.
///
/// # Example
///
/// ```rust,ignore
/// use medqa_chat::OpenAiChatModel;
///
/// let model = OpenAiChatModel::compatible(
///     "http://localhost:8080/v1/chat/completions",
///     "llama-3.1-8b-instruct",
/// )?;
/// let answer = model.complete("Say hello.").await?;
/// ```
pub struct OpenAiChatModel {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
}

impl OpenAiChatModel {
    /// Create a client for an authenticated endpoint.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        let mut client = Self::compatible(endpoint, model)?;
        client.api_key = Some(api_key.into());
        Ok(client)
    }

    /// Create a client for a local OpenAI-compatible endpoint that needs no
    /// api key.
    pub fn compatible(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build().map_err(|e| {
            ChatError::Backend { message: format!("failed to build HTTP client: {e}") }
        })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: None,
            temperature: 0.0,
        })
    }

    /// Set the sampling temperature. Defaults to 0.0 for reproducible
    /// answers.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

// ── Wire types ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

#[async_trait]
impl Llm for OpenAiChatModel {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        debug!(model = %self.model, prompt_len = prompt.len(), "requesting completion");

        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            temperature: self.temperature,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            error!(endpoint = %self.endpoint, error = %e, "completion request failed");
            ChatError::Backend { message: format!("request failed: {e}") }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            error!(endpoint = %self.endpoint, %status, "completion endpoint error");
            return Err(ChatError::Backend {
                message: format!("endpoint returned {status}: {detail}"),
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            ChatError::Backend { message: format!("failed to parse response: {e}") }
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ChatError::Backend {
                message: "endpoint returned no choices".to_string(),
            })
    }
}
