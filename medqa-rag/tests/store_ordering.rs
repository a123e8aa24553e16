//! Property tests for vector store search ordering.

use std::collections::HashMap;

use medqa_rag::memory::InMemoryVectorStore;
use medqa_rag::record::NewRecord;
use medqa_rag::store::VectorStore;
use proptest::prelude::*;

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map(
        "non-zero embedding",
        |mut v| {
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm < 1e-8 {
                return None;
            }
            for val in &mut v {
                *val /= norm;
            }
            Some(v)
        },
    )
}

/// Generate an un-inserted record with a normalized embedding.
fn arb_record(dim: usize) -> impl Strategy<Value = NewRecord> {
    ("[a-z ]{5,30}", arb_normalized_embedding(dim)).prop_map(|(text, embedding)| NewRecord {
        text,
        embedding,
        metadata: HashMap::new(),
    })
}

const DIM: usize = 16;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any set of stored records, search returns at most `top_k`
    /// results ordered by descending cosine similarity, with score ties
    /// broken by ascending id (insertion order).
    #[test]
    fn results_ordered_descending_with_deterministic_ties(
        records in proptest::collection::vec(arb_record(DIM), 1..20),
        query in arb_normalized_embedding(DIM),
        top_k in 1usize..25,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let (results, stored_count) = rt.block_on(async {
            let store = InMemoryVectorStore::new();
            let count = records.len();
            store.append(records).await.unwrap();
            let results = store.search(&query, top_k).await.unwrap();
            (results, count)
        });

        prop_assert!(results.len() <= top_k);
        prop_assert!(results.len() <= stored_count);

        for window in results.windows(2) {
            prop_assert!(
                window[0].score >= window[1].score,
                "results not in descending order: {} < {}",
                window[0].score,
                window[1].score,
            );
            if window[0].score == window[1].score {
                prop_assert!(
                    window[0].record.id < window[1].record.id,
                    "tied scores not in insertion order: id {} before id {}",
                    window[0].record.id,
                    window[1].record.id,
                );
            }
        }
    }

    /// Records with identical embeddings all tie; the full result must come
    /// back in insertion order.
    #[test]
    fn identical_embeddings_return_in_insertion_order(
        embedding in arb_normalized_embedding(DIM),
        count in 2usize..10,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let results = rt.block_on(async {
            let store = InMemoryVectorStore::new();
            let records = (0..count)
                .map(|i| NewRecord {
                    text: format!("record {i}"),
                    embedding: embedding.clone(),
                    metadata: HashMap::new(),
                })
                .collect();
            store.append(records).await.unwrap();
            store.search(&embedding, count).await.unwrap()
        });

        let ids: Vec<u64> = results.iter().map(|s| s.record.id).collect();
        let expected: Vec<u64> = (0..count as u64).collect();
        prop_assert_eq!(ids, expected);
    }
}
