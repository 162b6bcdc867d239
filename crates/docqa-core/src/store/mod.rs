//! Vector storage abstraction for docqa.
//!
//! The [`VectorStore`] trait defines the two operations the retrieval
//! session needs: replace the whole corpus, and rank it against a query
//! vector. Chunk texts and vectors are kept index-aligned; a chunk's `id`
//! is the index of its vector.
//!
//! Implementations must be `Send + Sync` so a session can be shared across
//! tasks.

pub mod memory;

pub use memory::InMemoryVectorStore;

use crate::error::StoreError;
use crate::models::{Chunk, SimilarityResult};

/// Index-aligned storage of chunk texts and their embedding vectors.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`load`](VectorStore::load) | Replace all chunks and vectors |
/// | [`search`](VectorStore::search) | Cosine top-k search above a threshold |
/// | [`len`](VectorStore::len) | Number of stored chunks |
/// | [`dims`](VectorStore::dims) | Dimensionality of stored vectors |
/// | [`chunks`](VectorStore::chunks) | Copy of the stored chunks |
pub trait VectorStore: Send + Sync {
    /// Replace the stored corpus.
    ///
    /// Fails without touching existing content when the counts differ or
    /// the vectors do not share one dimensionality. Readers observe either
    /// the old corpus or the new one, never a mix.
    fn load(&self, chunks: Vec<String>, vectors: Vec<Vec<f32>>) -> Result<(), StoreError>;

    /// Rank stored chunks by cosine similarity to `query`.
    ///
    /// Returns at most `k` results with `score > min_score`, highest score
    /// first, ties broken by ascending chunk id. An empty store yields an
    /// empty result.
    fn search(
        &self,
        query: &[f32],
        k: usize,
        min_score: f32,
    ) -> Result<Vec<SimilarityResult>, StoreError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimensionality of the stored vectors, `None` when empty.
    fn dims(&self) -> Option<usize>;

    fn chunks(&self) -> Vec<Chunk>;
}
