//! Text normalization for question/answer pairs.
//!
//! Raw dataset fields arrive with stray newlines, padding, and the odd
//! missing value. [`normalize`] flattens a (question, answer) pair into the
//! single combined text record that gets embedded and indexed.

/// Separator token between the question and answer halves of a combined
/// record, so the embedding model and the LLM can tell them apart.
///
/// Source fields are assumed not to contain this token themselves; a field
/// that does would make the combined record carry it more than once, and
/// nothing downstream splits on it to notice.
pub const SEPARATOR: &str = "[SEP]";

/// Combine a raw question and answer into one indexable text record.
///
/// Total over all inputs: a missing field is treated as an empty string,
/// newlines and runs of whitespace collapse to single spaces, and both ends
/// are trimmed. The result contains [`SEPARATOR`] exactly once, even when
/// both halves are empty, as long as the inputs honor the no-embedded-token
/// assumption documented on [`SEPARATOR`].
pub fn normalize(raw_question: Option<&str>, raw_answer: Option<&str>) -> String {
    let question = clean(raw_question.unwrap_or_default());
    let answer = clean(raw_answer.unwrap_or_default());
    format!("{question} {SEPARATOR} {answer}")
}

/// Collapse all whitespace (including `\n` and `\r\n`) to single spaces and
/// trim the ends.
fn clean(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
