//! Conversation history: an ordered sequence of question/answer turns.

use serde::{Deserialize, Serialize};

/// Who produced a turn. Fixed at the point the turn is created, never
/// inferred from the content later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Display label used when serializing history into a prompt.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

/// One side of a question/answer exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    /// Create an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// The ordered turns of one session.
///
/// Owned exclusively by the session's orchestrator, appended to after every
/// successful exchange, cleared entirely on reset. Never persisted across
/// process restarts.
#[derive(Debug, Clone, Default)]
pub struct History {
    turns: Vec<Turn>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Drop all turns.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// The turns in order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Deterministic serialization for prompts, one `Role: content` line per
    /// turn.
    pub fn render(&self) -> String {
        self.turns
            .iter()
            .map(|turn| format!("{}: {}", turn.role.label(), turn.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_is_ordered_and_labeled() {
        let mut history = History::new();
        history.push(Turn::user("hello"));
        history.push(Turn::assistant("hi there"));
        assert_eq!(history.render(), "User: hello\nAssistant: hi there");
    }

    #[test]
    fn clear_empties_everything() {
        let mut history = History::new();
        history.push(Turn::user("q"));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.render(), "");
    }
}
