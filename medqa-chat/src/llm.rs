//! Language-model backend boundary.

use async_trait::async_trait;

use crate::error::Result;

/// A language-model backend that completes a prompt into text.
///
/// The orchestrator treats the backend as blocking request/response; any
/// internal batching or token streaming is the backend's concern. No
/// structured output is required.
#[async_trait]
pub trait Llm: Send + Sync {
    /// A short name for the backing model, for logs and display.
    fn name(&self) -> &str;

    /// Complete `prompt` into generated text.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Backend`](crate::ChatError::Backend) if the
    /// backend is unavailable or the request fails.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
