//! Indexing: embed a batch of entries and append them to the store.

use std::sync::Arc;

use tracing::{error, info};

use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::ingest::QaEntry;
use crate::record::NewRecord;
use crate::store::VectorStore;

/// Writes normalized entries into a vector store, embed first.
pub struct Indexer {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
}

impl Indexer {
    /// Create an indexer over an embedding provider and a vector store.
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }

    /// Embed `entries` in one provider batch and append them to the store.
    ///
    /// Returns the assigned record ids, in input order. Any embedding or
    /// store failure fails the whole batch; there is no partial-success
    /// contract. Re-running against a fresh store path rebuilds an
    /// equivalent index.
    pub async fn index(&self, entries: Vec<QaEntry>) -> Result<Vec<u64>> {
        if entries.is_empty() {
            info!(records = 0, "nothing to index");
            return Ok(Vec::new());
        }

        let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await.map_err(|e| {
            error!(error = %e, "embedding failed during indexing");
            e
        })?;

        let records: Vec<NewRecord> = entries
            .into_iter()
            .zip(embeddings)
            .map(|(entry, embedding)| NewRecord {
                text: entry.text,
                embedding,
                metadata: entry.metadata,
            })
            .collect();

        let ids = self.store.append(records).await.map_err(|e| {
            error!(error = %e, "store append failed during indexing");
            e
        })?;

        info!(records = ids.len(), "indexed batch");
        Ok(ids)
    }
}
