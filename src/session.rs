//! Session construction from configuration.

use std::sync::Arc;

use anyhow::Result;
use docqa_core::embedding::{CompletionProvider, EmbeddingProvider};
use docqa_core::RetrievalSession;
use tracing::debug;

use crate::config::Config;
use crate::provider::{TimedCompleter, TimedEmbedder};

/// Build an empty session whose provider calls are bounded by the
/// configured timeouts.
pub fn build_session(
    config: &Config,
    embedder: Arc<dyn EmbeddingProvider>,
    completer: Arc<dyn CompletionProvider>,
) -> Result<RetrievalSession> {
    config.validate()?;
    let settings = config.session_settings()?;

    debug!(
        embed_model = embedder.model_name(),
        completion_model = completer.model_name(),
        embed_timeout_secs = config.providers.embed_timeout_secs,
        complete_timeout_secs = config.providers.complete_timeout_secs,
        "Creating session"
    );

    let embedder = Arc::new(TimedEmbedder::new(
        embedder,
        config.providers.embed_timeout(),
    ));
    let completer = Arc::new(TimedCompleter::new(
        completer,
        config.providers.complete_timeout(),
    ));

    Ok(RetrievalSession::new(embedder, completer, settings)?)
}
