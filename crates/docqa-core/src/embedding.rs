//! Provider traits and vector utilities.
//!
//! Defines the [`EmbeddingProvider`] and [`CompletionProvider`] traits that
//! the retrieval session calls out to, plus the cosine similarity used by
//! the vector store.
//!
//! Concrete providers (remote APIs, local models) are not part of this
//! crate. Timeouts are applied by the `docqa` app crate, which wraps any
//! provider before handing it to a session.

use anyhow::Result;
use async_trait::async_trait;

/// Maps texts to embedding vectors.
///
/// Implementations must return exactly one vector per input text, in input
/// order, all of the same dimensionality. The session treats any error as
/// [`EmbeddingUnavailable`](crate::ErrorKind::EmbeddingUnavailable) and
/// logs the error text without showing it to the user.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Returns the model identifier (e.g. `"embed-english-v3.0"`).
    fn model_name(&self) -> &str;

    /// Embed a batch of texts.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Maps a prompt to a completion.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the model identifier (e.g. `"command"`).
    fn model_name(&self) -> &str;

    /// Generate a completion for `prompt`.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Embed a single text.
///
/// Convenience wrapper around [`EmbeddingProvider::embed`] for query
/// embedding. Fails if the provider returns no vector.
pub async fn embed_one(provider: &dyn EmbeddingProvider, text: &str) -> Result<Vec<f32>> {
    let results = provider.embed(&[text.to_string()]).await?;
    results
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("Empty embedding response"))
}

/// Cosine of the angle between two embedding vectors, in `[-1.0, 1.0]`.
///
/// Mismatched lengths and zero-magnitude (or empty) vectors score `0.0`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, sq_a, sq_b) = a
        .iter()
        .zip(b)
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, sq_a, sq_b), (x, y)| {
            (dot + x * y, sq_a + x * x, sq_b + y * y)
        });

    let magnitude = sq_a.sqrt() * sq_b.sqrt();
    if magnitude == 0.0 {
        return 0.0;
    }
    dot / magnitude
}
