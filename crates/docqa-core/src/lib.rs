//! # docqa core
//!
//! Runtime-free retrieval engine for document question answering: data
//! models, word-window chunking, the vector store abstraction, prompt
//! assembly, and the [`RetrievalSession`](session::RetrievalSession) that
//! ties them to an embedding and a completion provider.
//!
//! This crate contains no tokio runtime, network, or filesystem code.
//! Providers are supplied by the caller through the traits in
//! [`embedding`].

pub mod chunk;
pub mod embedding;
pub mod error;
pub mod models;
pub mod prompt;
pub mod session;
pub mod store;

pub use error::{AskError, ChunkError, ErrorKind, IngestError, StoreError};
pub use session::{RetrievalSession, SessionSettings};
