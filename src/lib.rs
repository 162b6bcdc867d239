//! # docqa
//!
//! Ask questions about a single document.
//!
//! A document's text is split into overlapping word windows, each window is
//! embedded, and every question is answered by retrieving the most similar
//! windows and sending them, together with the last few exchanges, to a
//! completion model.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌──────────────┐
//! │ document │──▶│ chunker  │──▶│ vector store │
//! │   text   │   │ (words)  │   │  (cosine)    │
//! └──────────┘   └────┬─────┘   └──────┬───────┘
//!                     │ embed          │ top-k
//!                     ▼                ▼
//!               ┌───────────────────────────┐
//!               │     RetrievalSession      │──▶ completion
//!               │  prompt + history + state │
//!               └───────────────────────────┘
//! ```
//!
//! The engine lives in [`docqa_core`]; this crate adds configuration,
//! logging setup, and provider timeouts. Document parsing, transport to a
//! model API, and any user interface are left to the caller.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use docqa::config::Config;
//! use docqa::provider::DisabledProvider;
//! use docqa::session::build_session;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::default();
//! let session = build_session(&config, Arc::new(DisabledProvider), Arc::new(DisabledProvider))?;
//! session.ingest_document("lecture.pdf", "extracted text ...").await?;
//! let response = session.ask_default("What is this lecture about?").await?;
//! println!("{}", response.answer);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`logging`] | Tracing subscriber setup |
//! | [`provider`] | Timeout wrappers and the disabled provider |
//! | [`session`] | Session construction from config |

pub mod config;
pub mod logging;
pub mod provider;
pub mod session;

pub use docqa_core;
pub use docqa_core::models::{AskResponse, HistoryEntry, Lookup, SessionState, Source};
pub use docqa_core::{AskError, ErrorKind, IngestError, RetrievalSession, SessionSettings};
