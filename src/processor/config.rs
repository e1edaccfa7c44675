//! # Processor Configuration Module
//!
//! Chunking parameters for the in-memory index. Sizes are word counts, not
//! characters.

use crate::processor::error::ProcessError;

/// Configuration for chunking text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkOptions {
    /// Target size of each chunk in words
    pub target_chunk_size: usize,

    /// Number of words shared by consecutive chunks
    pub overlap_size: usize,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            target_chunk_size: 800,
            overlap_size: 120,
        }
    }
}

impl ChunkOptions {
    /// Create chunk options, rejecting sizes that would never advance
    pub fn new(target_chunk_size: usize, overlap_size: usize) -> Result<Self, ProcessError> {
        let options = Self {
            target_chunk_size,
            overlap_size,
        };
        options.validate()?;
        Ok(options)
    }

    /// The window must be non-empty and the overlap strictly smaller than it
    pub fn validate(&self) -> Result<(), ProcessError> {
        if self.target_chunk_size == 0 {
            return Err(ProcessError::InvalidOptions(
                "target_chunk_size must be greater than zero".to_string(),
            ));
        }
        if self.overlap_size >= self.target_chunk_size {
            return Err(ProcessError::InvalidOptions(format!(
                "overlap_size ({}) must be smaller than target_chunk_size ({})",
                self.overlap_size, self.target_chunk_size
            )));
        }
        Ok(())
    }

    /// Words between the starts of consecutive windows
    pub fn stride(&self) -> usize {
        self.target_chunk_size - self.overlap_size
    }
}
