//! The fixed prompt template.
//!
//! Built deterministically from (history, retrieved context, question). The
//! template instructs the model to answer only from the provided context and
//! to emit [`FALLBACK_ANSWER`] verbatim when the context is insufficient;
//! that string is a contract the UI and tests assert on, not a suggestion.

use std::fmt::Write;

use medqa_rag::Scored;

use crate::history::History;

/// The exact phrase the model is instructed to emit when the retrieved
/// context cannot support an answer.
pub const FALLBACK_ANSWER: &str =
    "I'm not sure based on the available information. Please consult a qualified doctor.";

/// Placeholder context section used when retrieval came back empty.
const NO_CONTEXT: &str = "(no relevant context found)";

/// Placeholder history section for the first question of a session.
const NO_HISTORY: &str = "(none)";

/// Assemble the full prompt for one question.
pub fn build(history: &History, context: &[Scored], question: &str) -> String {
    let history_section =
        if history.is_empty() { NO_HISTORY.to_string() } else { history.render() };

    let context_section = if context.is_empty() {
        NO_CONTEXT.to_string()
    } else {
        context
            .iter()
            .map(|scored| format!("- {}", scored.record.text))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let mut prompt = String::new();
    let _ = write!(
        prompt,
        "You are a helpful and accurate medical assistant chatbot.\n\
         Answer the user's medical questions clearly, in English only, and based strictly on the retrieved context.\n\
         \n\
         If you don't know the answer, say exactly:\n\
         \"{FALLBACK_ANSWER}\"\n\
         \n\
         Use the chat history for continuity.\n\
         \n\
         Chat History:\n\
         {history_section}\n\
         \n\
         Context from medical documents:\n\
         {context_section}\n\
         \n\
         User Question:\n\
         {question}\n\
         \n\
         Your Answer (in English):\n"
    );
    prompt
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use medqa_rag::{Record, Scored};

    use super::*;
    use crate::history::Turn;

    fn scored(id: u64, text: &str) -> Scored {
        Scored {
            record: Record {
                id,
                text: text.to_string(),
                embedding: vec![1.0],
                metadata: HashMap::new(),
            },
            score: 0.9,
        }
    }

    #[test]
    fn includes_history_context_and_question() {
        let mut history = History::new();
        history.push(Turn::user("earlier question"));
        history.push(Turn::assistant("earlier answer"));
        let context = vec![scored(0, "some [SEP] fact")];

        let prompt = build(&history, &context, "current question");
        assert!(prompt.contains("User: earlier question"));
        assert!(prompt.contains("- some [SEP] fact"));
        assert!(prompt.contains("current question"));
        assert!(prompt.contains(FALLBACK_ANSWER));
    }

    #[test]
    fn empty_retrieval_gets_explicit_placeholder() {
        let prompt = build(&History::new(), &[], "q");
        assert!(prompt.contains(NO_CONTEXT));
        assert!(prompt.contains(NO_HISTORY));
    }

    #[test]
    fn deterministic_for_same_inputs() {
        let history = History::new();
        let context = vec![scored(0, "a"), scored(1, "b")];
        assert_eq!(build(&history, &context, "q"), build(&history, &context, "q"));
    }
}
