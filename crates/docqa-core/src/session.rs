//! Retrieval session: one document, one conversation.
//!
//! A [`RetrievalSession`] owns a vector store, the conversation history,
//! and handles to the embedding and completion providers. It is the only
//! place where provider errors are caught; they are logged with their
//! cause and converted to the variants of [`IngestError`] / [`AskError`].
//!
//! # Lifecycle
//!
//! ```text
//! Empty ──ingest──▶ Ready ──ingest──▶ Ready (new document, history reset)
//!                     │
//!                     └──ask──▶ Ready (history + 1)
//! ```
//!
//! # Concurrency
//!
//! The store is read-locked for the duration of a search and write-locked
//! only for the final swap of a load. Conversation bookkeeping sits behind
//! a short-lived mutex that is never held across an `.await`. Every reset
//! of the conversation bumps a generation counter; an `ask` records its
//! exchange only if the generation it started under is still current, so
//! an answer computed against a replaced document or a cleared history is
//! returned to its caller but not written back. Dropping an `ask` future
//! leaves the session untouched.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::chunk::{chunk_document, ChunkPolicy};
use crate::embedding::{embed_one, CompletionProvider, EmbeddingProvider};
use crate::error::{AskError, ChunkError, IngestError};
use crate::models::{AskResponse, HistoryEntry, Lookup, SessionState};
use crate::prompt;
use crate::store::{InMemoryVectorStore, VectorStore};

/// Default number of chunks retrieved per question.
pub const DEFAULT_TOP_K: usize = 4;

/// Default exclusive relevance threshold.
pub const DEFAULT_MIN_SCORE: f32 = 0.1;

/// Default number of trailing exchanges included in a prompt.
pub const DEFAULT_HISTORY_TURNS: usize = 3;

/// Default source preview length, in characters.
pub const DEFAULT_PREVIEW_CHARS: usize = 300;

/// Retrieval tuning parameters, decoupled from application config.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub chunking: ChunkPolicy,
    /// Chunks retrieved by [`RetrievalSession::ask_default`].
    pub top_k: usize,
    /// Results must score strictly above this to be used.
    pub min_score: f32,
    pub history_turns: usize,
    pub preview_chars: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            chunking: ChunkPolicy::default(),
            top_k: DEFAULT_TOP_K,
            min_score: DEFAULT_MIN_SCORE,
            history_turns: DEFAULT_HISTORY_TURNS,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

#[derive(Default)]
struct Conversation {
    loaded: bool,
    document_name: Option<String>,
    generation: u64,
    history: Vec<HistoryEntry>,
    last_lookup: Option<Lookup>,
}

impl Conversation {
    fn start(&mut self, document_name: Option<&str>) {
        self.loaded = true;
        self.document_name = document_name.map(str::to_string);
        self.generation += 1;
        self.history.clear();
        self.last_lookup = None;
    }
}

/// Ingest-and-ask orchestration over a single document.
pub struct RetrievalSession<S: VectorStore = InMemoryVectorStore> {
    id: Uuid,
    settings: SessionSettings,
    embedder: Arc<dyn EmbeddingProvider>,
    completer: Arc<dyn CompletionProvider>,
    store: S,
    conversation: Mutex<Conversation>,
}

impl RetrievalSession<InMemoryVectorStore> {
    /// Create an empty session backed by an [`InMemoryVectorStore`].
    ///
    /// # Errors
    ///
    /// [`ChunkError::InvalidConfiguration`] when the chunk policy is unusable.
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        completer: Arc<dyn CompletionProvider>,
        settings: SessionSettings,
    ) -> Result<Self, ChunkError> {
        Self::with_store(InMemoryVectorStore::new(), embedder, completer, settings)
    }
}

impl<S: VectorStore> RetrievalSession<S> {
    /// Create an empty session over a caller-supplied store.
    ///
    /// Any content already in `store` is not queryable until the first
    /// ingest; the session starts in [`SessionState::Empty`].
    pub fn with_store(
        store: S,
        embedder: Arc<dyn EmbeddingProvider>,
        completer: Arc<dyn CompletionProvider>,
        settings: SessionSettings,
    ) -> Result<Self, ChunkError> {
        settings.chunking.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            settings,
            embedder,
            completer,
            store,
            conversation: Mutex::new(Conversation::default()),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn state(&self) -> SessionState {
        if self.conversation.lock().loaded {
            SessionState::Ready
        } else {
            SessionState::Empty
        }
    }

    /// Display name given to the loaded document, if any.
    pub fn document_name(&self) -> Option<String> {
        self.conversation.lock().document_name.clone()
    }

    pub fn chunk_count(&self) -> usize {
        self.store.len()
    }

    /// All exchanges since the last ingest or clear, oldest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.conversation.lock().history.clone()
    }

    /// Query and sources of the most recent answered question.
    pub fn last_lookup(&self) -> Option<Lookup> {
        self.conversation.lock().last_lookup.clone()
    }

    /// Forget the conversation so far; the loaded document stays.
    pub fn clear_history(&self) {
        let mut conversation = self.conversation.lock();
        conversation.generation += 1;
        conversation.history.clear();
        debug!(session = %self.id, "History cleared");
    }

    /// Load a document, replacing any previous one.
    pub async fn ingest(&self, text: &str) -> Result<(), IngestError> {
        self.load(None, text).await
    }

    /// Load a document under a display name, replacing any previous one.
    pub async fn ingest_document(&self, name: &str, text: &str) -> Result<(), IngestError> {
        self.load(Some(name), text).await
    }

    #[instrument(skip_all, fields(session = %self.id, bytes = text.len()))]
    async fn load(&self, name: Option<&str>, text: &str) -> Result<(), IngestError> {
        let chunks: Vec<String> = chunk_document(text, &self.settings.chunking)?
            .into_iter()
            .map(|c| c.text)
            .collect();

        let vectors = if chunks.is_empty() {
            Vec::new()
        } else {
            match self.embedder.embed(&chunks).await {
                Ok(vectors) => vectors,
                Err(e) => {
                    error!(
                        model = self.embedder.model_name(),
                        chunks = chunks.len(),
                        "Embedding request failed during ingest: {:#}",
                        e
                    );
                    return Err(IngestError::EmbeddingUnavailable);
                }
            }
        };

        let chunk_count = chunks.len();
        let mut conversation = self.conversation.lock();
        self.store.load(chunks, vectors)?;
        conversation.start(name);

        info!(
            chunks = chunk_count,
            document = name.unwrap_or("<unnamed>"),
            "Document ingested"
        );
        Ok(())
    }

    /// Answer `question` with the `settings.top_k` most relevant chunks.
    pub async fn ask_default(&self, question: &str) -> Result<AskResponse, AskError> {
        self.ask(question, self.settings.top_k).await
    }

    /// Answer `question` from the `k` most relevant chunks and the recent
    /// conversation.
    ///
    /// # Errors
    ///
    /// - [`AskError::NoDocumentLoaded`] before the first successful ingest.
    /// - [`AskError::EmbeddingUnavailable`] if the question cannot be embedded.
    /// - [`AskError::DimensionMismatch`] if the question vector does not match
    ///   the stored vectors.
    /// - [`AskError::NoRelevantContent`] if no chunk scores above `min_score`.
    /// - [`AskError::CompletionUnavailable`] if the completion call fails.
    #[instrument(skip_all, fields(session = %self.id, k = k))]
    pub async fn ask(&self, question: &str, k: usize) -> Result<AskResponse, AskError> {
        let (generation, history) = {
            let conversation = self.conversation.lock();
            if !conversation.loaded {
                return Err(AskError::NoDocumentLoaded);
            }
            (
                conversation.generation,
                prompt::build_history(&conversation.history, self.settings.history_turns),
            )
        };

        let query = match embed_one(self.embedder.as_ref(), question).await {
            Ok(query) => query,
            Err(e) => {
                error!(
                    model = self.embedder.model_name(),
                    "Embedding request failed for question: {:#}",
                    e
                );
                return Err(AskError::EmbeddingUnavailable);
            }
        };

        let results = self.store.search(&query, k, self.settings.min_score)?;
        if results.is_empty() {
            debug!(min_score = self.settings.min_score, "No chunk above threshold");
            return Err(AskError::NoRelevantContent);
        }

        let context = prompt::build_context(&results);
        let full_prompt = prompt::compose(&context, &history, question);

        let answer = match self.completer.complete(&full_prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                error!(
                    model = self.completer.model_name(),
                    prompt_chars = full_prompt.len(),
                    "Completion request failed: {:#}",
                    e
                );
                return Err(AskError::CompletionUnavailable);
            }
        };

        let sources = prompt::to_sources(&results, self.settings.preview_chars);

        {
            let mut conversation = self.conversation.lock();
            if conversation.generation == generation {
                conversation
                    .history
                    .push(HistoryEntry::new(question, answer.as_str()));
                conversation.last_lookup = Some(Lookup {
                    query: question.to_string(),
                    sources: sources.clone(),
                });
            } else {
                warn!("Conversation was reset while answering; exchange not recorded");
            }
        }

        debug!(sources = sources.len(), "Question answered");

        Ok(AskResponse {
            answer,
            sources,
            generated_query: question.to_string(),
        })
    }
}
