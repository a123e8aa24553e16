//! Subcommand implementations: wire providers, stores, and the orchestrator
//! together from CLI arguments.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use medqa_chat::{ChatConfig, OpenAiChatModel, Orchestrator};
use medqa_rag::{
    HttpEmbeddingProvider, Indexer, JsonlVectorStore, RagConfig, Retriever, VectorStore, ingest,
};

use crate::repl;

/// Embedding service settings, shared by both subcommands. Indexing and
/// chatting must point at the same deployment, otherwise queries land in the
/// wrong embedding space.
#[derive(Debug, Args)]
pub struct EmbeddingArgs {
    /// OpenAI-compatible embeddings endpoint.
    #[arg(long, default_value = "http://localhost:8080/v1/embeddings")]
    pub embed_endpoint: String,

    /// Embedding model name.
    #[arg(long, default_value = "all-minilm-l6-v2")]
    pub embed_model: String,

    /// Embedding dimensionality of the served model.
    #[arg(long, default_value_t = 384)]
    pub dimensions: usize,

    /// Bearer token for the embedding endpoint, if it needs one.
    #[arg(long)]
    pub embed_api_key: Option<String>,
}

impl EmbeddingArgs {
    fn provider(&self) -> anyhow::Result<Arc<HttpEmbeddingProvider>> {
        let mut provider = HttpEmbeddingProvider::new(
            &self.embed_endpoint,
            &self.embed_model,
            self.dimensions,
        )?;
        if let Some(key) = &self.embed_api_key {
            provider = provider.with_api_key(key);
        }
        Ok(Arc::new(provider))
    }
}

/// Arguments for `medqa index`.
#[derive(Debug, Args)]
pub struct IndexArgs {
    /// Path of the (question, answer) CSV to index.
    #[arg(long)]
    pub csv: PathBuf,

    /// Path of the vector store to create or append to.
    #[arg(long, default_value = "data/store.jsonl")]
    pub store: PathBuf,

    /// Index only the first N rows, for prototyping.
    #[arg(long)]
    pub sample: Option<usize>,

    #[command(flatten)]
    pub embedding: EmbeddingArgs,
}

/// Arguments for `medqa chat`.
#[derive(Debug, Args)]
pub struct ChatArgs {
    /// Path of the vector store to answer from.
    #[arg(long, default_value = "data/store.jsonl")]
    pub store: PathBuf,

    /// Number of records retrieved as context per question.
    #[arg(long, default_value_t = 3)]
    pub top_k: usize,

    /// Minimum similarity score; retrieved records below it are dropped.
    /// Unset means no filtering.
    #[arg(long)]
    pub similarity_threshold: Option<f32>,

    /// Answer with the fixed fallback phrase, without calling the model,
    /// whenever retrieval comes back empty.
    #[arg(long)]
    pub deterministic_fallback: bool,

    /// OpenAI-compatible chat completions endpoint.
    #[arg(long, default_value = "http://localhost:8081/v1/chat/completions")]
    pub chat_endpoint: String,

    /// Chat model name.
    #[arg(long, default_value = "llama-3.1-8b-instruct")]
    pub chat_model: String,

    /// Bearer token for the chat endpoint, if it needs one.
    #[arg(long)]
    pub chat_api_key: Option<String>,

    #[command(flatten)]
    pub embedding: EmbeddingArgs,
}

/// Load the CSV, embed every row, and append to the store.
pub async fn run_index(args: IndexArgs) -> anyhow::Result<()> {
    let entries = ingest::load_csv(&args.csv, args.sample)
        .with_context(|| format!("failed to load '{}'", args.csv.display()))?;
    let row_count = entries.len();

    let store = Arc::new(JsonlVectorStore::open(&args.store).await?);
    let indexer = Indexer::new(args.embedding.provider()?, store.clone());
    indexer.index(entries).await.context("indexing failed")?;

    let total = store.count().await?;
    println!("Indexed {row_count} records into {} ({total} total).", args.store.display());
    Ok(())
}

/// Open an interactive chat session over an existing store.
pub async fn run_chat(args: ChatArgs) -> anyhow::Result<()> {
    let mut rag_builder = RagConfig::builder().store_path(&args.store).top_k(args.top_k);
    if let Some(threshold) = args.similarity_threshold {
        rag_builder = rag_builder.similarity_threshold(threshold);
    }
    let rag_config = rag_builder.build()?;

    let store = Arc::new(JsonlVectorStore::open(&rag_config.store_path).await?);
    let mut retriever = Retriever::new(args.embedding.provider()?, store);
    if let Some(threshold) = rag_config.similarity_threshold {
        retriever = retriever.with_threshold(threshold);
    }

    let llm = match &args.chat_api_key {
        Some(key) => OpenAiChatModel::new(&args.chat_endpoint, &args.chat_model, key)?,
        None => OpenAiChatModel::compatible(&args.chat_endpoint, &args.chat_model)?,
    };

    let config = ChatConfig::builder()
        .top_k(rag_config.top_k)
        .deterministic_fallback(args.deterministic_fallback)
        .build()?;

    let orchestrator = Orchestrator::builder()
        .retriever(retriever)
        .llm(Arc::new(llm))
        .config(config)
        .build()?;

    repl::run(orchestrator).await
}
