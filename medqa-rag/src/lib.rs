//! # medqa-rag
//!
//! Retrieval layer for the medqa chatbot.
//!
//! Turns a CSV of medical question/answer pairs into a searchable knowledge
//! base: each row is normalized into one combined text record, embedded via
//! an [`EmbeddingProvider`], and written to a [`VectorStore`]. At query time
//! a [`Retriever`] embeds the question with the same provider and returns
//! the most similar records.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use medqa_rag::{Indexer, JsonlVectorStore, Retriever, ingest};
//!
//! let store = Arc::new(JsonlVectorStore::open("data/store.jsonl").await?);
//! let indexer = Indexer::new(embedder.clone(), store.clone());
//! let entries = ingest::load_csv("data/medical_qa.csv".as_ref(), None)?;
//! indexer.index(entries).await?;
//!
//! let retriever = Retriever::new(embedder, store);
//! let hits = retriever.retrieve("exercises for hypothyroidism", 3).await?;
//! ```

pub mod config;
pub mod embedding;
pub mod error;
pub mod http;
pub mod indexer;
pub mod ingest;
pub mod jsonl;
pub mod memory;
pub mod mock;
pub mod normalize;
pub mod record;
pub mod retriever;
pub mod store;

pub use config::RagConfig;
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use http::HttpEmbeddingProvider;
pub use indexer::Indexer;
pub use ingest::QaEntry;
pub use jsonl::JsonlVectorStore;
pub use memory::InMemoryVectorStore;
pub use mock::MockEmbeddingProvider;
pub use normalize::{SEPARATOR, normalize};
pub use record::{Record, Scored};
pub use retriever::Retriever;
pub use store::VectorStore;
