//! In-memory [`VectorStore`] implementation.
//!
//! Keeps one immutable corpus behind a `parking_lot::RwLock`. Loading builds
//! the replacement corpus before taking the write lock, so a failed or
//! in-progress load is never visible to searches. Search is brute-force
//! cosine similarity, scored in parallel with rayon.

use std::cmp::Ordering;

use parking_lot::RwLock;
use rayon::prelude::*;
use tracing::debug;

use crate::embedding::cosine_similarity;
use crate::error::StoreError;
use crate::models::{Chunk, SimilarityResult};

use super::VectorStore;

#[derive(Default)]
struct Corpus {
    chunks: Vec<Chunk>,
    vectors: Vec<Vec<f32>>,
    dims: Option<usize>,
}

impl Corpus {
    fn build(chunks: Vec<String>, vectors: Vec<Vec<f32>>) -> Result<Self, StoreError> {
        if chunks.len() != vectors.len() {
            return Err(StoreError::CountMismatch {
                chunks: chunks.len(),
                vectors: vectors.len(),
            });
        }

        let dims = vectors.first().map(Vec::len);
        if let Some(expected) = dims {
            if let Some((index, v)) = vectors.iter().enumerate().find(|(_, v)| v.len() != expected) {
                return Err(StoreError::RaggedVectors {
                    index,
                    expected,
                    found: v.len(),
                });
            }
        }

        let chunks = chunks
            .into_iter()
            .enumerate()
            .map(|(id, text)| Chunk { id, text })
            .collect();

        Ok(Self {
            chunks,
            vectors,
            dims,
        })
    }
}

/// In-memory vector store.
pub struct InMemoryVectorStore {
    corpus: RwLock<Corpus>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self {
            corpus: RwLock::new(Corpus::default()),
        }
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorStore for InMemoryVectorStore {
    fn load(&self, chunks: Vec<String>, vectors: Vec<Vec<f32>>) -> Result<(), StoreError> {
        let corpus = Corpus::build(chunks, vectors)?;
        debug!(
            chunks = corpus.chunks.len(),
            dims = ?corpus.dims,
            "Loaded vector store"
        );
        *self.corpus.write() = corpus;
        Ok(())
    }

    fn search(
        &self,
        query: &[f32],
        k: usize,
        min_score: f32,
    ) -> Result<Vec<SimilarityResult>, StoreError> {
        let corpus = self.corpus.read();
        let Some(dims) = corpus.dims else {
            return Ok(Vec::new());
        };
        if query.len() != dims {
            return Err(StoreError::QueryDimension {
                expected: dims,
                found: query.len(),
            });
        }

        let mut scored: Vec<(usize, f32)> = corpus
            .vectors
            .par_iter()
            .enumerate()
            .map(|(index, v)| (index, cosine_similarity(query, v)))
            .filter(|(_, score)| *score > min_score)
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored.truncate(k.min(corpus.chunks.len()));

        debug!(
            candidates = corpus.chunks.len(),
            returned = scored.len(),
            k,
            min_score,
            "Vector search"
        );

        Ok(scored
            .into_iter()
            .map(|(index, score)| SimilarityResult {
                chunk: corpus.chunks[index].clone(),
                score,
            })
            .collect())
    }

    fn len(&self) -> usize {
        self.corpus.read().chunks.len()
    }

    fn dims(&self) -> Option<usize> {
        self.corpus.read().dims
    }

    fn chunks(&self) -> Vec<Chunk> {
        self.corpus.read().chunks.clone()
    }
}
