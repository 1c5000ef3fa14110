//! Fixed-size overlapping window chunking.
//!
//! Windows are measured in characters, never bytes: the corpus is UTF-8
//! and a byte window could split a code point.

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy)]
pub struct ChunkingConfig {
    chunk_size: usize,
    overlap: usize,
}

impl ChunkingConfig {
    /// Rejects `chunk_size == 0` and `overlap >= chunk_size` up front:
    /// with `overlap >= chunk_size` the window advance `end - overlap`
    /// never moves forward and chunking would not terminate.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::InvalidConfig("chunk_size must be positive".to_string()));
        }
        if overlap >= chunk_size {
            return Err(Error::InvalidConfig(format!(
                "overlap ({overlap}) must be smaller than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self { chunk_size, overlap })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { chunk_size: 500, overlap: 80 }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Chunker {
    config: ChunkingConfig,
}

impl Chunker {
    pub fn new(config: ChunkingConfig) -> Self {
        Self { config }
    }

    /// Split `text` into overlapping windows of `chunk_size` characters.
    ///
    /// Consecutive windows share `overlap` characters; the last window
    /// may be shorter. Together the windows cover the text with no gaps.
    /// Empty text yields no chunks.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        // Byte offset of every char boundary, plus the end of the text.
        let mut bounds: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        bounds.push(text.len());
        let n_chars = bounds.len() - 1;

        let mut chunks = Vec::new();
        let mut start = 0usize;
        loop {
            let end = (start + self.config.chunk_size).min(n_chars);
            chunks.push(text[bounds[start]..bounds[end]].to_string());
            if end == n_chars {
                break;
            }
            // overlap < chunk_size, so this strictly advances.
            start = end - self.config.overlap;
        }
        chunks
    }
}
