//! Core data models used throughout docqa.
//!
//! These types represent the chunks, similarity hits, conversation turns,
//! and answers that flow through the ingest and ask pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A contiguous word window of the loaded document.
///
/// `id` is the chunk's ordinal position in the document and doubles as the
/// index of its embedding vector inside the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub id: usize,
    pub text: String,
}

/// A chunk paired with its cosine similarity to a query vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityResult {
    pub chunk: Chunk,
    /// Cosine similarity in `[-1.0, 1.0]`.
    pub score: f32,
}

/// One completed question/answer exchange.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub question: String,
    pub answer: String,
    pub asked_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            asked_at: Utc::now(),
        }
    }
}

/// A retrieved chunk as shown to the user alongside an answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Source {
    /// Leading characters of `text`, suffixed with `...` when truncated.
    pub preview: String,
    /// Full chunk text.
    pub text: String,
    pub score: f32,
}

/// The result of a successful `ask`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AskResponse {
    pub answer: String,
    /// Retrieved chunks in relevance order.
    pub sources: Vec<Source>,
    /// The query sent to the vector store. Always the question verbatim;
    /// no rewriting takes place.
    pub generated_query: String,
}

/// The most recent store lookup, kept for inspection after an answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lookup {
    pub query: String,
    pub sources: Vec<Source>,
}

/// Lifecycle of a [`RetrievalSession`](crate::session::RetrievalSession).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No document has been ingested yet.
    Empty,
    /// A document is loaded and questions can be asked.
    Ready,
}
