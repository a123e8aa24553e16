//! # medqa-chat
//!
//! Conversation layer for the medqa chatbot.
//!
//! The [`Orchestrator`] wires a [`Retriever`](medqa_rag::Retriever) and an
//! [`Llm`] backend together behind a fixed prompt template and keeps the
//! running [`History`] of the session: validate the question, retrieve
//! context, build the prompt, call the model, record the exchange. A failed
//! exchange is never recorded.
//!
//! ## Example
//!
//! ```rust,ignore
//! use medqa_chat::{ChatConfig, Orchestrator};
//!
//! let orchestrator = Orchestrator::builder()
//!     .retriever(retriever)
//!     .llm(llm)
//!     .config(ChatConfig::default())
//!     .build()?;
//!
//! let result = orchestrator.answer("What helps with hypothyroidism?").await?;
//! println!("{}", result.answer);
//! orchestrator.reset().await;
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod llm;
pub mod mock;
pub mod openai;
pub mod orchestrator;
pub mod prompt;

pub use config::ChatConfig;
pub use error::{ChatError, Result};
pub use history::{History, Role, Turn};
pub use llm::Llm;
pub use mock::MockLlm;
pub use openai::OpenAiChatModel;
pub use orchestrator::{Orchestrator, QueryResult};
pub use prompt::FALLBACK_ANSWER;
