//! Integration tests for indexing, retrieval, and JSONL persistence.

use std::collections::HashMap;
use std::sync::Arc;

use medqa_rag::{
    Indexer, InMemoryVectorStore, JsonlVectorStore, MockEmbeddingProvider, QaEntry, RagError,
    Retriever, VectorStore, normalize,
};

const VOCABULARY: &[&str] = &[
    "exercises",
    "hypothyroidism",
    "weight",
    "cardio",
    "strength",
    "knee",
    "pain",
    "swimming",
    "cycling",
];

fn sample_entries() -> Vec<QaEntry> {
    vec![
        QaEntry {
            text: normalize(
                Some("What exercises help hypothyroidism patients lose weight?"),
                Some("Low-impact cardio and strength training."),
            ),
            metadata: HashMap::from([("row".to_string(), "1".to_string())]),
        },
        QaEntry {
            text: normalize(
                Some("Can these be done with knee pain?"),
                Some("Opt for swimming or cycling instead."),
            ),
            metadata: HashMap::from([("row".to_string(), "2".to_string())]),
        },
    ]
}

#[tokio::test]
async fn retrieval_on_empty_store_returns_empty() {
    let embedder = Arc::new(MockEmbeddingProvider::new(VOCABULARY));
    let store = Arc::new(InMemoryVectorStore::new());
    let retriever = Retriever::new(embedder, store);

    let results = retriever.retrieve("anything at all", 3).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn index_then_retrieve_ranks_by_relevance() {
    let embedder = Arc::new(MockEmbeddingProvider::new(VOCABULARY));
    let store = Arc::new(InMemoryVectorStore::new());

    let indexer = Indexer::new(embedder.clone(), store.clone());
    let ids = indexer.index(sample_entries()).await.unwrap();
    assert_eq!(ids, vec![0, 1]);

    let retriever = Retriever::new(embedder, store);

    let results = retriever.retrieve("exercises for hypothyroidism weight loss", 2).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].record.id, 0, "hypothyroidism record should rank first");
    assert!(results[0].score > results[1].score);

    let results = retriever.retrieve("knee pain alternative", 2).await.unwrap();
    assert_eq!(results[0].record.id, 1, "knee pain record should rank first");
}

#[tokio::test]
async fn default_retrieval_keeps_negatively_correlated_records() {
    // Real embedding spaces produce negative cosines; without an explicit
    // threshold a non-empty store must never come back empty.
    let embedder = Arc::new(MockEmbeddingProvider::new(&["pain"]));
    let store = Arc::new(InMemoryVectorStore::new());
    store
        .append(vec![medqa_rag::record::NewRecord {
            text: "opposite of the query".to_string(),
            embedding: vec![-1.0],
            metadata: HashMap::new(),
        }])
        .await
        .unwrap();

    let retriever = Retriever::new(embedder, store);
    let results = retriever.retrieve("pain", 3).await.unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].score < 0.0);
}

#[tokio::test]
async fn threshold_filters_unrelated_records() {
    let embedder = Arc::new(MockEmbeddingProvider::new(VOCABULARY));
    let store = Arc::new(InMemoryVectorStore::new());
    Indexer::new(embedder.clone(), store.clone()).index(sample_entries()).await.unwrap();

    // The knee-pain record shares no vocabulary with this query and scores
    // 0.0; a positive threshold drops it.
    let retriever = Retriever::new(embedder, store).with_threshold(0.1);
    let results = retriever.retrieve("exercises for hypothyroidism weight loss", 2).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].record.id, 0);
}

#[tokio::test]
async fn embedding_failure_fails_the_whole_batch() {
    let embedder = Arc::new(MockEmbeddingProvider::new(VOCABULARY).failing());
    let store = Arc::new(InMemoryVectorStore::new());
    let indexer = Indexer::new(embedder, store.clone());

    let err = indexer.index(sample_entries()).await.unwrap_err();
    assert!(matches!(err, RagError::Embedding { .. }));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn dimension_mismatch_is_a_store_error() {
    let store = InMemoryVectorStore::new();
    let record = |dim: usize| medqa_rag::record::NewRecord {
        text: "r".to_string(),
        embedding: vec![1.0; dim],
        metadata: HashMap::new(),
    };

    store.append(vec![record(4)]).await.unwrap();
    let err = store.append(vec![record(3)]).await.unwrap_err();
    assert!(matches!(err, RagError::Store { .. }));

    let err = store.search(&[1.0; 5], 1).await.unwrap_err();
    assert!(matches!(err, RagError::Store { .. }));
}

#[tokio::test]
async fn jsonl_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.jsonl");
    let embedder = Arc::new(MockEmbeddingProvider::new(VOCABULARY));

    {
        let store = Arc::new(JsonlVectorStore::open(&path).await.unwrap());
        let indexer = Indexer::new(embedder.clone(), store.clone());
        indexer.index(sample_entries()).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 2);
    }

    // A later process reopens the same path and sees the same index.
    let reopened = Arc::new(JsonlVectorStore::open(&path).await.unwrap());
    assert_eq!(reopened.count().await.unwrap(), 2);

    let retriever = Retriever::new(embedder.clone(), reopened.clone());
    let results = retriever.retrieve("swimming with knee pain", 1).await.unwrap();
    assert_eq!(results[0].record.id, 1);

    // And can keep appending; ids continue from where they left off.
    let indexer = Indexer::new(embedder, reopened);
    let ids = indexer
        .index(vec![QaEntry {
            text: normalize(Some("Is cycling cardio?"), Some("Yes.")),
            metadata: HashMap::new(),
        }])
        .await
        .unwrap();
    assert_eq!(ids, vec![2]);
}

#[tokio::test]
async fn jsonl_open_creates_missing_file_and_parents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/dir/store.jsonl");

    let store = JsonlVectorStore::open(&path).await.unwrap();
    assert_eq!(store.count().await.unwrap(), 0);
    assert!(path.exists());

    // Empty store searches cleanly.
    assert!(store.search(&[1.0, 0.0], 3).await.unwrap().is_empty());
}
