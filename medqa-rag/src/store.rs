//! Vector store boundary and shared similarity ranking.

use std::cmp::Ordering;

use async_trait::async_trait;

use crate::error::{RagError, Result};
use crate::record::{NewRecord, Record, Scored};

/// A persistent index of [`Record`]s supporting nearest-neighbor search.
///
/// One store holds one index in one embedding space; the store path (or the
/// instance, for the in-memory backend) plays the role a named collection
/// would in a multi-tenant system.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Append records, assigning sequential ids in input order.
    ///
    /// Returns the assigned ids. Fails with [`RagError::Store`] if a record's
    /// embedding dimension does not match the records already stored.
    async fn append(&self, records: Vec<NewRecord>) -> Result<Vec<u64>>;

    /// Return the `top_k` records most similar to `embedding`.
    ///
    /// Results are ordered by descending cosine similarity; ties are broken
    /// by ascending id, so the earliest-inserted record wins and rankings
    /// are deterministic. An empty store yields an empty vec, not an error.
    async fn search(&self, embedding: &[f32], top_k: usize) -> Result<Vec<Scored>>;

    /// Number of records in the store.
    async fn count(&self) -> Result<usize>;
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
pub(crate) fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Score every record against `embedding` and keep the `top_k` best.
///
/// Sort key is (descending score, ascending id); both backends rank through
/// this helper so ordering stays consistent between them.
pub(crate) fn rank(records: &[Record], embedding: &[f32], top_k: usize) -> Vec<Scored> {
    let mut scored: Vec<Scored> = records
        .iter()
        .map(|record| Scored {
            score: cosine_similarity(&record.embedding, embedding),
            record: record.clone(),
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.record.id.cmp(&b.record.id))
    });
    scored.truncate(top_k);
    scored
}

/// Reject an embedding whose dimension disagrees with what the store holds.
///
/// Mixing embedding spaces does not fail loudly on its own, it just quietly
/// ruins the ranking, so the stores check every append and search.
pub(crate) fn check_dimensions(
    stored: Option<usize>,
    incoming: usize,
    backend: &str,
) -> Result<()> {
    match stored {
        Some(expected) if expected != incoming => Err(RagError::Store {
            backend: backend.to_string(),
            message: format!("embedding dimension mismatch: store has {expected}, got {incoming}"),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn record(id: u64, embedding: Vec<f32>) -> Record {
        Record { id, text: format!("record {id}"), embedding, metadata: HashMap::new() }
    }

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let v = vec![0.6, 0.8];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn rank_breaks_ties_by_insertion_order() {
        // Two records with identical embeddings score identically; the
        // earlier id must come first.
        let records =
            vec![record(7, vec![1.0, 0.0]), record(3, vec![1.0, 0.0]), record(5, vec![0.0, 1.0])];
        let ranked = rank(&records, &[1.0, 0.0], 3);
        let ids: Vec<u64> = ranked.iter().map(|s| s.record.id).collect();
        assert_eq!(ids, vec![3, 7, 5]);
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        assert!(check_dimensions(Some(4), 3, "test").is_err());
        assert!(check_dimensions(Some(4), 4, "test").is_ok());
        assert!(check_dimensions(None, 4, "test").is_ok());
    }
}
