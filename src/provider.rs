//! Provider adapters.
//!
//! The core crate only defines the provider traits. This module supplies
//! the pieces every deployment needs around a concrete provider:
//!
//! - **[`TimedEmbedder`]** / **[`TimedCompleter`]** bound each call with a
//!   timeout. An elapsed call is reported as an error and is not retried.
//! - **[`DisabledProvider`]** fails every call; used as a placeholder when
//!   no provider is configured.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use docqa_core::embedding::{CompletionProvider, EmbeddingProvider};
use tracing::warn;

// ============ Timeouts ============

/// Embedding provider wrapper that fails calls exceeding `timeout`.
pub struct TimedEmbedder {
    inner: Arc<dyn EmbeddingProvider>,
    timeout: Duration,
}

impl TimedEmbedder {
    pub fn new(inner: Arc<dyn EmbeddingProvider>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl EmbeddingProvider for TimedEmbedder {
    fn model_name(&self) -> &str {
        self.inner.model_name()
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        match tokio::time::timeout(self.timeout, self.inner.embed(texts)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    model = self.inner.model_name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    texts = texts.len(),
                    "Embedding request timed out"
                );
                Err(anyhow!(
                    "embedding request timed out after {:?}",
                    self.timeout
                ))
            }
        }
    }
}

/// Completion provider wrapper that fails calls exceeding `timeout`.
pub struct TimedCompleter {
    inner: Arc<dyn CompletionProvider>,
    timeout: Duration,
}

impl TimedCompleter {
    pub fn new(inner: Arc<dyn CompletionProvider>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl CompletionProvider for TimedCompleter {
    fn model_name(&self) -> &str {
        self.inner.model_name()
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        match tokio::time::timeout(self.timeout, self.inner.complete(prompt)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    model = self.inner.model_name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Completion request timed out"
                );
                Err(anyhow!(
                    "completion request timed out after {:?}",
                    self.timeout
                ))
            }
        }
    }
}

// ============ Disabled Provider ============

/// A provider that always returns errors.
///
/// Lets a session be constructed before real providers are wired up; any
/// attempt to embed or complete fails with a descriptive message.
pub struct DisabledProvider;

#[async_trait]
impl EmbeddingProvider for DisabledProvider {
    fn model_name(&self) -> &str {
        "disabled"
    }

    async fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
        bail!("Embedding provider is disabled")
    }
}

#[async_trait]
impl CompletionProvider for DisabledProvider {
    fn model_name(&self) -> &str {
        "disabled"
    }

    async fn complete(&self, _prompt: &str) -> Result<String> {
        bail!("Completion provider is disabled")
    }
}
