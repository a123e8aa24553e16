//! Conversation orchestrator: retrieve, prompt, complete, record.
//!
//! One orchestrator owns one session. The session is either idle or has one
//! answer in flight; the history mutex is the guard, held from validation
//! through the model call so appends can never interleave. Concurrent
//! submissions are rejected, not queued.

use std::sync::Arc;

use medqa_rag::{Retriever, Scored};
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::config::ChatConfig;
use crate::error::{ChatError, Result};
use crate::history::{History, Turn};
use crate::llm::Llm;
use crate::prompt;

/// The outcome of one answered question.
///
/// Ephemeral: owned by the caller, not retained by the orchestrator.
#[derive(Debug, Clone)]
pub struct QueryResult {
    /// The generated answer.
    pub answer: String,
    /// The records used to ground the answer, most relevant first.
    pub sources: Vec<Scored>,
}

/// Answers questions over a retriever and an LLM backend, with
/// conversational memory.
pub struct Orchestrator {
    retriever: Retriever,
    llm: Arc<dyn Llm>,
    config: ChatConfig,
    history: Mutex<History>,
}

impl Orchestrator {
    /// Create a new [`OrchestratorBuilder`].
    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::default()
    }

    /// Answer `question` from retrieved context and the session history.
    ///
    /// On success, appends the (user, assistant) exchange to history, in
    /// that order. On any failure nothing is appended: a rejected question
    /// never made it into the conversation, and a failed backend call is
    /// retried from the same state.
    ///
    /// # Errors
    ///
    /// - [`ChatError::EmptyQuestion`] for empty or whitespace-only input;
    ///   no external call is made.
    /// - [`ChatError::Busy`] if another answer is in flight for this
    ///   session.
    /// - [`ChatError::Backend`] if retrieval or completion fails.
    pub async fn answer(&self, question: &str) -> Result<QueryResult> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ChatError::EmptyQuestion);
        }

        // Busy guard: held until the exchange is recorded or abandoned.
        let mut history = self.history.try_lock().map_err(|_| ChatError::Busy)?;

        let sources =
            self.retriever.retrieve(question, self.config.top_k).await.map_err(|e| {
                error!(error = %e, "retrieval failed");
                ChatError::Backend { message: e.to_string() }
            })?;

        let answer = if sources.is_empty() && self.config.deterministic_fallback {
            // Nothing retrieved: short-circuit to the fixed fallback instead
            // of trusting the model to comply with the template.
            prompt::FALLBACK_ANSWER.to_string()
        } else {
            let prompt = prompt::build(&history, &sources, question);
            self.llm.complete(&prompt).await?
        };

        history.push(Turn::user(question));
        history.push(Turn::assistant(&answer));

        info!(
            model = self.llm.name(),
            sources = sources.len(),
            history_turns = history.len(),
            "answered question"
        );
        Ok(QueryResult { answer, sources })
    }

    /// Clear the conversation history.
    ///
    /// Unconditional and idempotent. Waits for any in-flight answer rather
    /// than failing, so a reset is never rejected.
    pub async fn reset(&self) {
        self.history.lock().await.clear();
        info!("conversation reset");
    }

    /// A snapshot of the session's turns, for display.
    pub async fn history(&self) -> Vec<Turn> {
        self.history.lock().await.turns().to_vec()
    }
}

/// Builder for constructing an [`Orchestrator`].
#[derive(Default)]
pub struct OrchestratorBuilder {
    retriever: Option<Retriever>,
    llm: Option<Arc<dyn Llm>>,
    config: Option<ChatConfig>,
}

impl OrchestratorBuilder {
    /// Set the retriever.
    pub fn retriever(mut self, retriever: Retriever) -> Self {
        self.retriever = Some(retriever);
        self
    }

    /// Set the language-model backend.
    pub fn llm(mut self, llm: Arc<dyn Llm>) -> Self {
        self.llm = Some(llm);
        self
    }

    /// Set the configuration. Defaults to [`ChatConfig::default`].
    pub fn config(mut self, config: ChatConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the [`Orchestrator`], validating that all required parts are
    /// set.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Config`] if the retriever or llm is missing.
    pub fn build(self) -> Result<Orchestrator> {
        let retriever = self
            .retriever
            .ok_or_else(|| ChatError::Config("retriever is required".to_string()))?;
        let llm = self.llm.ok_or_else(|| ChatError::Config("llm is required".to_string()))?;

        Ok(Orchestrator {
            retriever,
            llm,
            config: self.config.unwrap_or_default(),
            history: Mutex::new(History::new()),
        })
    }
}
