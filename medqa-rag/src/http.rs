//! HTTP embedding provider for OpenAI-compatible `/v1/embeddings` endpoints.
//!
//! Works against hosted APIs as well as local servers (llama.cpp `--embedding`,
//! Ollama, vLLM) that speak the same wire format. The api key is optional
//! since local deployments usually run without one.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

const PROVIDER: &str = "Http";

/// Generous request timeout; embedding a large batch on CPU is slow but
/// should never hang forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// An [`EmbeddingProvider`] backed by an OpenAI-compatible embeddings API.
///
/// # Example
///
/// ```rust,ignore
/// use medqa_rag::HttpEmbeddingProvider;
///
/// let provider = HttpEmbeddingProvider::new(
///     "http://localhost:8080/v1/embeddings",
///     "all-minilm-l6-v2",
///     384,
/// )?;
/// let embedding = provider.embed("hello world").await?;
/// ```
pub struct HttpEmbeddingProvider {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    dimensions: usize,
    api_key: Option<String>,
}

impl HttpEmbeddingProvider {
    /// Create a provider for the given endpoint URL, model name, and
    /// embedding dimensionality.
    ///
    /// `dimensions` must match what the served model actually produces; it
    /// is the value the vector store is sized against.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Embedding`] if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        dimensions: usize,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| embedding_error(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            dimensions,
            api_key: None,
        })
    }

    /// Set a bearer token, for endpoints that require one.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

fn embedding_error(message: String) -> RagError {
    RagError::Embedding { provider: PROVIDER.to_string(), message }
}

// ── Wire types ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let results = self.embed_batch(&[text]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| embedding_error("endpoint returned empty response".to_string()))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(batch_size = texts.len(), model = %self.model, "embedding batch");

        let body = EmbeddingRequest { model: &self.model, input: texts.to_vec() };
        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            error!(endpoint = %self.endpoint, error = %e, "embedding request failed");
            embedding_error(format!("request failed: {e}"))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            error!(endpoint = %self.endpoint, %status, "embedding endpoint error");
            return Err(embedding_error(format!("endpoint returned {status}: {detail}")));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| embedding_error(format!("failed to parse response: {e}")))?;

        if parsed.data.len() != texts.len() {
            return Err(embedding_error(format!(
                "endpoint returned {} embeddings for {} inputs",
                parsed.data.len(),
                texts.len()
            )));
        }
        for data in &parsed.data {
            if data.embedding.len() != self.dimensions {
                return Err(embedding_error(format!(
                    "endpoint returned dimension {}, expected {}",
                    data.embedding.len(),
                    self.dimensions
                )));
            }
        }

        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
