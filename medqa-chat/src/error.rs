//! Error types for the `medqa-chat` crate.
//!
//! The `Display` strings are the user-facing messages the UI prints; backend
//! detail stays in the `message` field and the logs.

use thiserror::Error;

/// Errors that can occur while answering a question.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The question was empty or whitespace-only. Recovered locally; no
    /// state was touched and no external call was made.
    #[error("Please enter a valid question.")]
    EmptyQuestion,

    /// A submission is already in flight for this session.
    #[error("Still working on the previous question. Please wait.")]
    Busy,

    /// The embedding or language-model backend failed. The conversation
    /// history is left unmodified; retrying is always safe.
    #[error("Sorry, something went wrong while generating the answer. Please try again.")]
    Backend {
        /// Backend detail, for logs rather than users.
        message: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A convenience result type for conversation operations.
pub type Result<T> = std::result::Result<T, ChatError>;
