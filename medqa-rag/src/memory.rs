//! In-memory vector store.
//!
//! A zero-persistence [`VectorStore`] backed by a `Vec` behind a
//! `tokio::sync::RwLock`. Suitable for development and tests; nothing
//! survives the process.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::record::{NewRecord, Record, Scored};
use crate::store::{VectorStore, check_dimensions, rank};

/// An in-memory vector store using cosine similarity for search.
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    records: RwLock<Vec<Record>>,
}

impl InMemoryVectorStore {
    /// Create a new empty in-memory vector store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn append(&self, records: Vec<NewRecord>) -> Result<Vec<u64>> {
        let mut stored = self.records.write().await;

        // Validate the whole batch before touching the store, so a failed
        // append leaves no partial state behind.
        let mut dimensions = stored.first().map(|r| r.embedding.len());
        for record in &records {
            check_dimensions(dimensions, record.embedding.len(), "InMemory")?;
            dimensions.get_or_insert(record.embedding.len());
        }

        let next_id = stored.len() as u64;
        let mut ids = Vec::with_capacity(records.len());
        for (offset, record) in records.into_iter().enumerate() {
            let id = next_id + offset as u64;
            stored.push(record.into_record(id));
            ids.push(id);
        }
        Ok(ids)
    }

    async fn search(&self, embedding: &[f32], top_k: usize) -> Result<Vec<Scored>> {
        let stored = self.records.read().await;
        if stored.is_empty() {
            return Ok(Vec::new());
        }
        check_dimensions(stored.first().map(|r| r.embedding.len()), embedding.len(), "InMemory")?;
        Ok(rank(&stored, embedding, top_k))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.records.read().await.len())
    }
}
