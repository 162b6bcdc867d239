use anyhow::{bail, Context, Result};
use docqa_core::chunk::{ChunkPolicy, DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP};
use docqa_core::session::{
    SessionSettings, DEFAULT_HISTORY_TURNS, DEFAULT_MIN_SCORE, DEFAULT_PREVIEW_CHARS,
    DEFAULT_TOP_K,
};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChunkingConfig {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_overlap")]
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}
fn default_overlap() -> usize {
    DEFAULT_OVERLAP
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_min_score")]
    pub min_score: f32,
    #[serde(default = "default_history_turns")]
    pub history_turns: usize,
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            min_score: DEFAULT_MIN_SCORE,
            history_turns: DEFAULT_HISTORY_TURNS,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}
fn default_min_score() -> f32 {
    DEFAULT_MIN_SCORE
}
fn default_history_turns() -> usize {
    DEFAULT_HISTORY_TURNS
}
fn default_preview_chars() -> usize {
    DEFAULT_PREVIEW_CHARS
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProvidersConfig {
    #[serde(default = "default_timeout_secs")]
    pub embed_timeout_secs: u64,
    #[serde(default = "default_timeout_secs")]
    pub complete_timeout_secs: u64,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            embed_timeout_secs: 30,
            complete_timeout_secs: 30,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

impl ProvidersConfig {
    pub fn embed_timeout(&self) -> Duration {
        Duration::from_secs(self.embed_timeout_secs)
    }

    pub fn complete_timeout(&self) -> Duration {
        Duration::from_secs(self.complete_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        // Validate chunking
        if self.chunking.chunk_size == 0 {
            bail!("chunking.chunk_size must be > 0");
        }
        if self.chunking.overlap >= self.chunking.chunk_size {
            bail!(
                "chunking.overlap ({}) must be smaller than chunking.chunk_size ({})",
                self.chunking.overlap,
                self.chunking.chunk_size
            );
        }

        // Validate retrieval
        if self.retrieval.top_k < 1 {
            bail!("retrieval.top_k must be >= 1");
        }
        if !(-1.0..=1.0).contains(&self.retrieval.min_score) {
            bail!("retrieval.min_score must be in [-1.0, 1.0]");
        }

        // Validate providers
        if self.providers.embed_timeout_secs == 0 {
            bail!("providers.embed_timeout_secs must be > 0");
        }
        if self.providers.complete_timeout_secs == 0 {
            bail!("providers.complete_timeout_secs must be > 0");
        }

        Ok(())
    }

    /// Retrieval parameters for a new session.
    pub fn session_settings(&self) -> Result<SessionSettings> {
        let chunking = ChunkPolicy::new(self.chunking.chunk_size, self.chunking.overlap)?;
        Ok(SessionSettings {
            chunking,
            top_k: self.retrieval.top_k,
            min_score: self.retrieval.min_score,
            history_turns: self.retrieval.history_turns,
            preview_chars: self.retrieval.preview_chars,
        })
    }
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
}
