//! Error types for docqa.
//!
//! Every error maps onto an [`ErrorKind`] so callers can branch on the
//! category without matching individual variants. Provider failures carry
//! no provider text in their `Display` output; the underlying cause is
//! written to the operator log where the failure is caught.

use thiserror::Error;

/// Category of a docqa failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Chunking parameters are unusable. Caller bug.
    InvalidConfiguration,
    /// Chunks and vectors disagree in count or dimensionality.
    DimensionMismatch,
    /// The embedding provider failed or timed out. Retryable.
    EmbeddingUnavailable,
    /// The completion provider failed or timed out. Retryable.
    CompletionUnavailable,
    /// Nothing in the document scored above the relevance threshold.
    NoRelevantContent,
    /// `ask` was called before any document was ingested.
    NoDocumentLoaded,
}

/// Chunking errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChunkError {
    #[error("invalid configuration: overlap ({overlap}) must be smaller than chunk_size ({chunk_size})")]
    InvalidConfiguration { chunk_size: usize, overlap: usize },
}

impl ChunkError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidConfiguration
    }
}

/// Vector store errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("dimension mismatch: {chunks} chunks but {vectors} vectors")]
    CountMismatch { chunks: usize, vectors: usize },

    #[error("dimension mismatch: vector {index} has {found} dimensions, expected {expected}")]
    RaggedVectors {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("dimension mismatch: query has {found} dimensions, store holds {expected}")]
    QueryDimension { expected: usize, found: usize },
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::DimensionMismatch
    }
}

/// Errors returned by `RetrievalSession::ingest`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error(transparent)]
    InvalidConfiguration(#[from] ChunkError),

    #[error(transparent)]
    DimensionMismatch(#[from] StoreError),

    #[error("the embedding service is unavailable, please try again")]
    EmbeddingUnavailable,
}

impl IngestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IngestError::InvalidConfiguration(_) => ErrorKind::InvalidConfiguration,
            IngestError::DimensionMismatch(_) => ErrorKind::DimensionMismatch,
            IngestError::EmbeddingUnavailable => ErrorKind::EmbeddingUnavailable,
        }
    }
}

/// Errors returned by `RetrievalSession::ask`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AskError {
    #[error("no document loaded, upload a document first")]
    NoDocumentLoaded,

    #[error("the embedding service is unavailable, please try again")]
    EmbeddingUnavailable,

    #[error(transparent)]
    DimensionMismatch(#[from] StoreError),

    #[error("no relevant content found in the document for this question")]
    NoRelevantContent,

    #[error("the answer could not be generated, please try again")]
    CompletionUnavailable,
}

impl AskError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AskError::NoDocumentLoaded => ErrorKind::NoDocumentLoaded,
            AskError::EmbeddingUnavailable => ErrorKind::EmbeddingUnavailable,
            AskError::DimensionMismatch(_) => ErrorKind::DimensionMismatch,
            AskError::NoRelevantContent => ErrorKind::NoRelevantContent,
            AskError::CompletionUnavailable => ErrorKind::CompletionUnavailable,
        }
    }

    /// Whether retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AskError::EmbeddingUnavailable | AskError::CompletionUnavailable
        )
    }
}
