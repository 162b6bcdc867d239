//! Prompt assembly.
//!
//! Builds the text sent to the completion provider from the retrieved
//! chunks and the trailing conversation history:
//!
//! ```text
//! <instruction>
//!
//! Chat history:
//! Question: ...
//! Answer: ...
//!
//! Context:
//! <chunk 1>
//!
//! <chunk 2>
//!
//! Question: <question>
//! Answer:
//! ```

use crate::models::{HistoryEntry, SimilarityResult, Source};

/// Fixed instruction placed at the top of every prompt.
pub const INSTRUCTION: &str = "Answer the question using only the context below. \
If the answer is not contained in the context, say explicitly that the document does not contain it.";

/// Separator between chunk texts in the context block.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// Concatenate chunk texts in result order, separated by a blank line.
pub fn build_context(results: &[SimilarityResult]) -> String {
    results
        .iter()
        .map(|r| r.chunk.text.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}

/// Format the last `turns` history entries as alternating question/answer
/// lines, oldest first. Returns an empty string when there is no history.
pub fn build_history(history: &[HistoryEntry], turns: usize) -> String {
    let start = history.len().saturating_sub(turns);
    history[start..]
        .iter()
        .map(|h| format!("Question: {}\nAnswer: {}", h.question, h.answer))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Compose the full prompt.
///
/// The chat history section is omitted entirely when `history` is empty.
pub fn compose(context: &str, history: &str, question: &str) -> String {
    let mut prompt = String::with_capacity(
        INSTRUCTION.len() + context.len() + history.len() + question.len() + 64,
    );
    prompt.push_str(INSTRUCTION);
    prompt.push_str("\n\n");
    if !history.is_empty() {
        prompt.push_str("Chat history:\n");
        prompt.push_str(history);
        prompt.push_str("\n\n");
    }
    prompt.push_str("Context:\n");
    prompt.push_str(context);
    prompt.push_str("\n\nQuestion: ");
    prompt.push_str(question);
    prompt.push_str("\nAnswer:");
    prompt
}

/// First `max_chars` characters of `text`, with `...` appended when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Convert search results into user-facing sources.
pub fn to_sources(results: &[SimilarityResult], preview_chars: usize) -> Vec<Source> {
    results
        .iter()
        .map(|r| Source {
            preview: preview(&r.chunk.text, preview_chars),
            text: r.chunk.text.clone(),
            score: r.score,
        })
        .collect()
}
