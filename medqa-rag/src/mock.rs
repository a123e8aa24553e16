//! Mock embedding provider for tests and offline development.

use async_trait::async_trait;

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// A deterministic bag-of-words [`EmbeddingProvider`].
///
/// Each dimension counts occurrences of one vocabulary word (lowercased,
/// surrounding punctuation stripped); the vector is L2-normalized. Texts
/// sharing vocabulary words score high cosine similarity, so retrieval
/// tests can assert on rankings without a real model. Out-of-vocabulary
/// text embeds to the zero vector.
pub struct MockEmbeddingProvider {
    vocabulary: Vec<String>,
    fail: bool,
}

impl MockEmbeddingProvider {
    /// Create a provider over the given vocabulary. Dimensionality equals
    /// the vocabulary size.
    pub fn new(vocabulary: &[&str]) -> Self {
        Self { vocabulary: vocabulary.iter().map(|w| w.to_lowercase()).collect(), fail: false }
    }

    /// Make every call fail, to exercise backend-unavailable paths.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if self.fail {
            return Err(RagError::Embedding {
                provider: "Mock".to_string(),
                message: "mock embedding failure".to_string(),
            });
        }

        let mut counts = vec![0.0f32; self.vocabulary.len()];
        for token in text.split_whitespace() {
            let token = token
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if let Some(index) = self.vocabulary.iter().position(|w| *w == token) {
                counts[index] += 1.0;
            }
        }

        let norm: f32 = counts.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            counts.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(counts)
    }

    fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }
}
