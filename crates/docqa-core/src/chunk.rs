//! Word-window text chunker.
//!
//! Splits document text into overlapping windows of whitespace-delimited
//! words. There is no sentence or paragraph awareness: a window is simply
//! the next `chunk_size` words, and the following window starts
//! `chunk_size - overlap` words later.
//!
//! # Algorithm
//!
//! 1. Reject `overlap >= chunk_size` (the stride would not advance).
//! 2. Split the text on whitespace.
//! 3. Emit `words[start..start + chunk_size]` joined by single spaces,
//!    clamped to the word count.
//! 4. Stop after the window that reaches the last word; otherwise advance
//!    `start` by the stride.
//!
//! # Example
//!
//! ```rust
//! use docqa_core::chunk::split_words;
//!
//! let chunks = split_words("a b c d e", 3, 1).unwrap();
//! assert_eq!(chunks, vec!["a b c", "c d e"]);
//! ```

use crate::error::ChunkError;
use crate::models::Chunk;

/// Default window size, in words.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default number of words shared by consecutive windows.
pub const DEFAULT_OVERLAP: usize = 150;

/// Window size and overlap used when ingesting a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPolicy {
    pub chunk_size: usize,
    pub overlap: usize,
}

impl ChunkPolicy {
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self, ChunkError> {
        let policy = Self {
            chunk_size,
            overlap,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Fails unless `overlap < chunk_size`.
    pub fn validate(&self) -> Result<(), ChunkError> {
        if self.overlap >= self.chunk_size {
            return Err(ChunkError::InvalidConfiguration {
                chunk_size: self.chunk_size,
                overlap: self.overlap,
            });
        }
        Ok(())
    }

    /// Distance in words between the starts of consecutive windows.
    pub fn stride(&self) -> usize {
        self.chunk_size - self.overlap
    }
}

impl Default for ChunkPolicy {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

/// Split `text` into windows of up to `chunk_size` words.
///
/// # Guarantees
///
/// - Empty or whitespace-only input yields no windows.
/// - Every window except possibly the last holds exactly `chunk_size` words.
/// - Consecutive windows share exactly `overlap` words.
/// - No window is emitted whose words are all contained in the previous one.
/// - The output depends only on the arguments.
///
/// # Errors
///
/// [`ChunkError::InvalidConfiguration`] when `overlap >= chunk_size`.
pub fn split_words(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<String>, ChunkError> {
    let policy = ChunkPolicy::new(chunk_size, overlap)?;
    let words: Vec<&str> = text.split_whitespace().collect();
    let stride = policy.stride();

    let mut windows = Vec::with_capacity(words.len().div_ceil(stride));
    let mut start = 0;
    while start < words.len() {
        let end = (start + chunk_size).min(words.len());
        windows.push(words[start..end].join(" "));
        if end == words.len() {
            break;
        }
        start += stride;
    }

    Ok(windows)
}

/// Chunk a document with `policy`, assigning ordinal ids from 0.
pub fn chunk_document(text: &str, policy: &ChunkPolicy) -> Result<Vec<Chunk>, ChunkError> {
    let windows = split_words(text, policy.chunk_size, policy.overlap)?;
    Ok(windows
        .into_iter()
        .enumerate()
        .map(|(id, text)| Chunk { id, text })
        .collect())
}
