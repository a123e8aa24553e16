//! # medqa-cli
//!
//! Command-line surface for the medqa chatbot.
//!
//! Two subcommands: `medqa index` embeds a question/answer CSV into a
//! persistent vector store, and `medqa chat` opens an interactive session
//! over that store.

pub mod commands;
pub mod repl;
