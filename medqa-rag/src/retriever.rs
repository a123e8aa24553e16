//! Query-time retrieval: embed the question, search the store.

use std::sync::Arc;

use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::record::Scored;
use crate::store::VectorStore;

/// Retrieves the stored records most similar to a query string.
///
/// Holds the same [`EmbeddingProvider`] used at indexing time; handing it a
/// different one breaks the single-embedding-space invariant.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    similarity_threshold: Option<f32>,
}

impl Retriever {
    /// Create a retriever over an embedding provider and a vector store.
    ///
    /// No score filtering by default: a non-empty store always yields
    /// results, however dissimilar. Negative cosines are normal in real
    /// embedding spaces.
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store, similarity_threshold: None }
    }

    /// Drop results scoring below `threshold`.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = Some(threshold);
        self
    }

    /// Return up to `top_k` records ordered by descending similarity to
    /// `query`, ties broken by insertion order.
    ///
    /// An empty store yields an empty vec, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Embedding`] or [`RagError::Store`] if the
    /// respective backend fails.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<Scored>> {
        if top_k == 0 {
            return Err(RagError::Config("top_k must be greater than zero".to_string()));
        }

        let query_embedding = self.embedder.embed(query).await.map_err(|e| {
            error!(error = %e, "query embedding failed");
            e
        })?;

        let results = self.store.search(&query_embedding, top_k).await.map_err(|e| {
            error!(error = %e, "vector store search failed");
            e
        })?;

        let results: Vec<Scored> = match self.similarity_threshold {
            Some(threshold) => results.into_iter().filter(|r| r.score >= threshold).collect(),
            None => results,
        };

        debug!(top_k, result_count = results.len(), "retrieval completed");
        Ok(results)
    }
}
