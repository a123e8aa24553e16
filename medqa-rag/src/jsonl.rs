//! Persistent vector store backed by a JSON-lines file.
//!
//! One serialized [`Record`] per line at a configured filesystem path. The
//! file is created on first open and reopened read/append by later
//! processes; the full index is rebuilt in memory on open and searches never
//! touch the disk. Fine for the dataset sizes this chatbot targets, and the
//! store stays a plain file you can inspect with standard tools.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::{RagError, Result};
use crate::record::{NewRecord, Record, Scored};
use crate::store::{VectorStore, check_dimensions, rank};

const BACKEND: &str = "Jsonl";

/// A file-backed vector store using cosine similarity for search.
///
/// Appends are flushed per batch; records already on disk are never
/// rewritten. Rebuilding the knowledge base means re-indexing into a fresh
/// path.
#[derive(Debug)]
pub struct JsonlVectorStore {
    path: PathBuf,
    records: RwLock<Vec<Record>>,
}

impl JsonlVectorStore {
    /// Open the store at `path`, creating the file (and parent directories)
    /// if absent, and load any existing records.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Store`] if the file cannot be created or read, or
    /// if a line fails to parse as a record.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| store_error(format!("failed to create '{}': {e}", parent.display())))?;
            }
        }

        // Touch the file so a later process can reopen it even if this one
        // never appends.
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .await
            .map_err(|e| store_error(format!("failed to open '{}': {e}", path.display())))?;

        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| store_error(format!("failed to read '{}': {e}", path.display())))?;

        let mut records = Vec::new();
        for (number, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: Record = serde_json::from_str(line).map_err(|e| {
                store_error(format!("corrupt record at {}:{}: {e}", path.display(), number + 1))
            })?;
            records.push(record);
        }

        info!(path = %path.display(), records = records.len(), "opened vector store");
        Ok(Self { path, records: RwLock::new(records) })
    }

    /// The filesystem path this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn store_error(message: String) -> RagError {
    RagError::Store { backend: BACKEND.to_string(), message }
}

#[async_trait]
impl VectorStore for JsonlVectorStore {
    async fn append(&self, records: Vec<NewRecord>) -> Result<Vec<u64>> {
        let mut stored = self.records.write().await;

        let mut dimensions = stored.first().map(|r| r.embedding.len());
        for record in &records {
            check_dimensions(dimensions, record.embedding.len(), BACKEND)?;
            dimensions.get_or_insert(record.embedding.len());
        }

        // Serialize the whole batch before writing anything, so a failed
        // append leaves both the file and the in-memory index untouched.
        let next_id = stored.len() as u64;
        let mut batch = Vec::with_capacity(records.len());
        let mut lines = String::new();
        for (offset, record) in records.into_iter().enumerate() {
            let record = record.into_record(next_id + offset as u64);
            let line = serde_json::to_string(&record)
                .map_err(|e| store_error(format!("failed to serialize record: {e}")))?;
            lines.push_str(&line);
            lines.push('\n');
            batch.push(record);
        }

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .await
            .map_err(|e| store_error(format!("failed to open '{}': {e}", self.path.display())))?;
        file.write_all(lines.as_bytes())
            .await
            .map_err(|e| store_error(format!("failed to write '{}': {e}", self.path.display())))?;
        file.flush()
            .await
            .map_err(|e| store_error(format!("failed to flush '{}': {e}", self.path.display())))?;

        let ids = batch.iter().map(|r| r.id).collect();
        stored.extend(batch);
        Ok(ids)
    }

    async fn search(&self, embedding: &[f32], top_k: usize) -> Result<Vec<Scored>> {
        let stored = self.records.read().await;
        if stored.is_empty() {
            return Ok(Vec::new());
        }
        check_dimensions(stored.first().map(|r| r.embedding.len()), embedding.len(), BACKEND)?;
        Ok(rank(&stored, embedding, top_k))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.records.read().await.len())
    }
}
