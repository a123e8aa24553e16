//! Data types for indexed records and search results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One indexed unit of knowledge: a normalized question/answer pair plus its
/// embedding.
///
/// Records are immutable once stored; the only way to change one is to
/// rebuild the store from the source dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// Identifier assigned by the store at insertion. Ids are sequential, so
    /// they double as the insertion-order tie-break key for search.
    pub id: u64,
    /// The normalized combined question and answer text.
    pub text: String,
    /// The vector embedding of `text`. Must come from the same embedding
    /// provider (and model) used at query time.
    pub embedding: Vec<f32>,
    /// Key-value metadata, e.g. source file and row number.
    pub metadata: HashMap<String, String>,
}

/// A record ready for insertion, before the store has assigned its id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewRecord {
    /// The normalized combined question and answer text.
    pub text: String,
    /// The vector embedding of `text`.
    pub embedding: Vec<f32>,
    /// Key-value metadata, e.g. source file and row number.
    pub metadata: HashMap<String, String>,
}

impl NewRecord {
    /// Attach the id assigned at insertion.
    pub fn into_record(self, id: u64) -> Record {
        Record { id, text: self.text, embedding: self.embedding, metadata: self.metadata }
    }
}

/// A retrieved [`Record`] paired with a relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scored {
    /// The retrieved record.
    pub record: Record,
    /// The cosine similarity score (higher is more relevant).
    pub score: f32,
}
