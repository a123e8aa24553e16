//! Interactive chat loop.
//!
//! Free text submits a question; slash commands control the session:
//! `/reset` clears the conversation, `/sources` toggles source display,
//! `/quit` exits. Ctrl-C cancels the current line, Ctrl-D exits.
//!
//! Every answered exchange is retained for the session, so toggling
//! `/sources` on reveals the retrieved snippets for past answers as well as
//! future ones.

use std::fmt::Write;

use medqa_chat::{ChatError, Orchestrator};
use medqa_rag::Scored;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// Maximum characters of a source record shown per answer.
const PREVIEW_CHARS: usize = 500;

/// One answered exchange, kept for the session's display log.
struct Exchange {
    question: String,
    answer: String,
    sources: Vec<Scored>,
}

/// Run the interactive session until the user exits.
pub async fn run(orchestrator: Orchestrator) -> anyhow::Result<()> {
    println!("medqa chat. Ask a medical question, or /reset, /sources, /quit.");

    let mut rl = DefaultEditor::new()?;
    let mut show_sources = false;
    let mut exchanges: Vec<Exchange> = Vec::new();

    loop {
        let line = match rl.readline("you> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        let input = line.trim();
        match input {
            "/quit" | "/exit" => break,
            "/reset" => {
                orchestrator.reset().await;
                exchanges.clear();
                println!("Conversation reset.");
            }
            "/sources" => {
                show_sources = !show_sources;
                println!("Source display {}.", if show_sources { "on" } else { "off" });
                if show_sources {
                    for exchange in &exchanges {
                        print!("{}", format_exchange(exchange));
                    }
                }
            }
            _ => {
                let _ = rl.add_history_entry(input);
                match orchestrator.answer(input).await {
                    Ok(result) => {
                        println!("bot> {}", result.answer);
                        if show_sources {
                            print!("{}", format_sources(&result.sources));
                        }
                        exchanges.push(Exchange {
                            question: input.to_string(),
                            answer: result.answer,
                            sources: result.sources,
                        });
                    }
                    // Every failure here is recoverable by retrying; print
                    // the user-facing message and keep the session alive.
                    Err(e @ (ChatError::EmptyQuestion | ChatError::Busy)) => println!("{e}"),
                    Err(e) => {
                        tracing::warn!(error = ?e, "answer failed");
                        println!("{e}");
                    }
                }
            }
        }
    }

    println!("Bye.");
    Ok(())
}

/// Render one past exchange with its source previews.
fn format_exchange(exchange: &Exchange) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Q: {}", exchange.question);
    let _ = writeln!(out, "A: {}", exchange.answer);
    out.push_str(&format_sources(&exchange.sources));
    out
}

/// Render the source previews for one answer.
fn format_sources(sources: &[Scored]) -> String {
    if sources.is_empty() {
        return "  (no sources)\n".to_string();
    }
    let mut out = String::new();
    for (index, scored) in sources.iter().enumerate() {
        let _ = writeln!(
            out,
            "  [{}] score {:.3}: {}",
            index + 1,
            scored.score,
            truncate_preview(&scored.record.text, PREVIEW_CHARS),
        );
    }
    out
}

/// Truncate `text` to at most `max_chars` characters, appending `...` when
/// something was cut. Operates on characters, not bytes, so multi-byte
/// input never splits mid-character.
fn truncate_preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.char_indices();
    match chars.nth(max_chars) {
        None => text.to_string(),
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use medqa_rag::Record;

    use super::*;

    fn scored(id: u64, text: &str) -> Scored {
        Scored {
            record: Record {
                id,
                text: text.to_string(),
                embedding: vec![1.0],
                metadata: HashMap::new(),
            },
            score: 0.5,
        }
    }

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_preview("hello", 10), "hello");
        assert_eq!(truncate_preview("hello", 5), "hello");
    }

    #[test]
    fn long_text_is_cut_with_ellipsis() {
        assert_eq!(truncate_preview("hello world", 5), "hello...");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "héllo wörld";
        let preview = truncate_preview(text, 6);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 9); // 6 kept + "..."
    }

    #[test]
    fn past_exchange_renders_question_answer_and_sources() {
        let exchange = Exchange {
            question: "knee pain?".to_string(),
            answer: "Try swimming.".to_string(),
            sources: vec![scored(0, "swimming [SEP] works"), scored(1, &"x".repeat(600))],
        };

        let rendered = format_exchange(&exchange);
        assert!(rendered.contains("Q: knee pain?"));
        assert!(rendered.contains("A: Try swimming."));
        assert!(rendered.contains("[1] score 0.500: swimming [SEP] works"));
        // Long source previews are truncated with an ellipsis marker.
        assert!(rendered.contains(&format!("{}...", "x".repeat(PREVIEW_CHARS))));
        assert!(!rendered.contains(&"x".repeat(PREVIEW_CHARS + 1)));
    }

    #[test]
    fn empty_sources_render_a_placeholder() {
        assert_eq!(format_sources(&[]), "  (no sources)\n");
    }
}
