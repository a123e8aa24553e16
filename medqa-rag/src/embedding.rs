//! Embedding service boundary.

use async_trait::async_trait;

use crate::error::Result;

/// A service that turns text into fixed-dimension embedding vectors.
///
/// The whole knowledge base lives in a single embedding space: indexing and
/// querying must go through the same provider and model, since vectors from
/// different spaces silently corrupt similarity ranking.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of texts, in order.
    ///
    /// The default implementation embeds each text sequentially. Providers
    /// with a native batch endpoint should override it, indexing throughput
    /// depends on it.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// Dimensionality of the vectors this provider produces.
    fn dimensions(&self) -> usize;
}
