//! Integration tests for the ingest → ask pipeline.
//!
//! These tests build sessions the way an application would: from a TOML
//! config file, with providers wrapped in the configured timeouts.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use docqa::config::{load_config, Config};
use docqa::docqa_core::chunk::split_words;
use docqa::docqa_core::embedding::{CompletionProvider, EmbeddingProvider};
use docqa::docqa_core::store::{InMemoryVectorStore, VectorStore};
use docqa::provider::DisabledProvider;
use docqa::session::build_session;
use docqa::{ErrorKind, SessionState};
use std::fs;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

// ─── Test Providers ─────────────────────────────────────────────────

const TOPICS: [&str; 4] = ["gradient", "kernel", "cluster", "policy"];

/// Counts topic words; the same text always maps to the same vector.
struct TopicEmbedder;

#[async_trait]
impl EmbeddingProvider for TopicEmbedder {
    fn model_name(&self) -> &str {
        "topic"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|t| {
                let lower = t.to_lowercase();
                TOPICS
                    .iter()
                    .map(|w| lower.matches(w).count() as f32)
                    .collect()
            })
            .collect())
    }
}

/// Echoes a fixed answer and keeps every prompt it receives.
#[derive(Default)]
struct EchoCompleter {
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl CompletionProvider for EchoCompleter {
    fn model_name(&self) -> &str {
        "echo"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let mut prompts = self.prompts.lock().unwrap();
        prompts.push(prompt.to_string());
        Ok(format!("reply #{}", prompts.len()))
    }
}

/// Never answers within any reasonable timeout.
struct StalledProvider;

#[async_trait]
impl EmbeddingProvider for StalledProvider {
    fn model_name(&self) -> &str {
        "stalled"
    }

    async fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(anyhow!("unreachable"))
    }
}

#[async_trait]
impl CompletionProvider for StalledProvider {
    fn model_name(&self) -> &str {
        "stalled"
    }

    async fn complete(&self, _prompt: &str) -> Result<String> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(anyhow!("unreachable"))
    }
}

// ─── Helpers ────────────────────────────────────────────────────────

fn write_config(tmp: &TempDir, body: &str) -> Config {
    let path = tmp.path().join("docqa.toml");
    fs::write(&path, body).unwrap();
    load_config(&path).unwrap()
}

fn small_config(tmp: &TempDir) -> Config {
    write_config(
        tmp,
        r#"
[chunking]
chunk_size = 6
overlap = 2

[retrieval]
top_k = 2
min_score = 0.1
history_turns = 3
preview_chars = 12

[providers]
embed_timeout_secs = 5
complete_timeout_secs = 5
"#,
    )
}

const LECTURE: &str = "gradient descent updates weights along the gradient \
                       of the loss while kernel methods map inputs into \
                       feature space and cluster analysis groups similar \
                       points without labels entirely";

// ─── Tests ──────────────────────────────────────────────────────────

#[test]
fn test_load_config_missing_file() {
    let tmp = TempDir::new().unwrap();
    let err = load_config(&tmp.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_build_session_rejects_bad_chunking() {
    let config = Config {
        chunking: docqa::config::ChunkingConfig {
            chunk_size: 10,
            overlap: 12,
        },
        ..Config::default()
    };
    let result = build_session(&config, Arc::new(DisabledProvider), Arc::new(DisabledProvider));
    assert!(result.is_err());
}

#[test]
fn test_chunking_scenarios() {
    assert_eq!(
        split_words("alpha beta gamma delta", 2, 0).unwrap(),
        vec!["alpha beta", "gamma delta"]
    );
    assert_eq!(
        split_words("a b c d e", 3, 1).unwrap(),
        vec!["a b c", "c d e"]
    );
}

#[test]
fn test_store_scenario() {
    let store = InMemoryVectorStore::new();
    store
        .load(
            vec!["zero".into(), "one".into(), "two".into()],
            vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]],
        )
        .unwrap();
    let results = store.search(&[1.0, 0.0], 2, 0.0).unwrap();
    let ids: Vec<usize> = results.iter().map(|r| r.chunk.id).collect();
    assert_eq!(ids, vec![0, 2]);
    assert!((results[0].score - 1.0).abs() < 1e-6);
    assert!((results[1].score - 0.707).abs() < 1e-3);
}

#[tokio::test]
async fn test_ask_before_ingest() {
    let tmp = TempDir::new().unwrap();
    let config = small_config(&tmp);
    let session = build_session(
        &config,
        Arc::new(TopicEmbedder),
        Arc::new(EchoCompleter::default()),
    )
    .unwrap();
    let err = session.ask_default("what is a kernel?").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoDocumentLoaded);
}

#[tokio::test]
async fn test_full_conversation() {
    let tmp = TempDir::new().unwrap();
    let config = small_config(&tmp);
    let completer = Arc::new(EchoCompleter::default());
    let session = build_session(&config, Arc::new(TopicEmbedder), completer.clone()).unwrap();

    session
        .ingest_document("MachineLearning-Lecture01.pdf", LECTURE)
        .await
        .unwrap();
    assert_eq!(session.state(), SessionState::Ready);
    assert_eq!(
        session.chunk_count(),
        split_words(LECTURE, 6, 2).unwrap().len()
    );

    let first = session.ask_default("explain the gradient").await.unwrap();
    assert_eq!(first.answer, "reply #1");
    assert_eq!(first.generated_query, "explain the gradient");
    assert!(!first.sources.is_empty() && first.sources.len() <= 2);
    assert!(first.sources[0].text.contains("gradient"));
    assert!(first.sources[0].preview.ends_with("..."));
    assert_eq!(first.sources[0].preview.chars().count(), 15);

    let second = session.ask("and kernel methods?", 1).await.unwrap();
    assert_eq!(second.sources.len(), 1);
    assert!(second.sources[0].text.contains("kernel"));

    let prompts = completer.prompts.lock().unwrap();
    assert!(prompts[1].contains("Question: explain the gradient\nAnswer: reply #1"));
    assert!(prompts[1].contains("only the context"));
    drop(prompts);

    let history = session.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].answer, "reply #2");
    assert_eq!(
        session.last_lookup().unwrap().query,
        "and kernel methods?"
    );
}

#[tokio::test]
async fn test_reingest_starts_new_topic() {
    let tmp = TempDir::new().unwrap();
    let config = small_config(&tmp);
    let completer = Arc::new(EchoCompleter::default());
    let session = build_session(&config, Arc::new(TopicEmbedder), completer.clone()).unwrap();

    session.ingest(LECTURE).await.unwrap();
    session.ask_default("gradient?").await.unwrap();

    session
        .ingest_document("rl.pdf", "policy iteration improves the policy greedily")
        .await
        .unwrap();
    assert!(session.history().is_empty());
    assert_eq!(session.document_name().as_deref(), Some("rl.pdf"));

    session.ask_default("what is a policy?").await.unwrap();
    let prompts = completer.prompts.lock().unwrap();
    assert!(!prompts[1].contains("Chat history:"));
    assert!(!prompts[1].contains("gradient?"));
}

#[tokio::test]
async fn test_irrelevant_question() {
    let tmp = TempDir::new().unwrap();
    let config = small_config(&tmp);
    let session = build_session(
        &config,
        Arc::new(TopicEmbedder),
        Arc::new(EchoCompleter::default()),
    )
    .unwrap();
    session.ingest(LECTURE).await.unwrap();
    let err = session.ask_default("who won the match?").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoRelevantContent);
}

#[tokio::test]
async fn test_disabled_embedder_reports_unavailable() {
    let session = build_session(
        &Config::default(),
        Arc::new(DisabledProvider),
        Arc::new(EchoCompleter::default()),
    )
    .unwrap();
    let err = session.ingest(LECTURE).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmbeddingUnavailable);
    assert!(!err.to_string().contains("disabled"));
    assert_eq!(session.state(), SessionState::Empty);
}

#[tokio::test]
async fn test_embedding_timeout_maps_to_unavailable() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(&tmp, "[providers]\nembed_timeout_secs = 1\n");
    let session = build_session(
        &config,
        Arc::new(StalledProvider),
        Arc::new(EchoCompleter::default()),
    )
    .unwrap();
    let err = session.ingest(LECTURE).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmbeddingUnavailable);
    assert_eq!(session.chunk_count(), 0);
}

#[tokio::test]
async fn test_completion_timeout_maps_to_unavailable() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(
        &tmp,
        "[chunking]\nchunk_size = 6\noverlap = 2\n\n[providers]\ncomplete_timeout_secs = 1\n",
    );
    let session = build_session(&config, Arc::new(TopicEmbedder), Arc::new(StalledProvider)).unwrap();
    session.ingest(LECTURE).await.unwrap();

    let err = session.ask_default("cluster analysis?").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CompletionUnavailable);
    assert!(err.is_retryable());
    assert!(session.history().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_questions() {
    let tmp = TempDir::new().unwrap();
    let config = small_config(&tmp);
    let session = Arc::new(
        build_session(
            &config,
            Arc::new(TopicEmbedder),
            Arc::new(EchoCompleter::default()),
        )
        .unwrap(),
    );
    session.ingest(LECTURE).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..8 {
        let session = session.clone();
        let question = format!("{} question {}", TOPICS[i % 3], i);
        handles.push(tokio::spawn(async move { session.ask_default(&question).await }));
    }
    for handle in handles {
        let response = handle.await.unwrap().unwrap();
        assert!(!response.sources.is_empty());
    }
    assert_eq!(session.history().len(), 8);
}
