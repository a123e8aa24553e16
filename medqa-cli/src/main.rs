//! `medqa` binary entry point.

use clap::{Parser, Subcommand};
use medqa_cli::commands::{self, ChatArgs, IndexArgs};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "medqa", version, about = "Retrieval-augmented medical Q&A chatbot")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Embed a (question, answer) CSV into a persistent vector store.
    Index(IndexArgs),
    /// Chat interactively over an indexed store.
    Chat(ChatArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Index(args) => commands::run_index(args).await,
        Command::Chat(args) => commands::run_chat(args).await,
    }
}
