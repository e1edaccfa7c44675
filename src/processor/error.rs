//! Error types for the processor module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for processor operations
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Chunk sizes that cannot produce a terminating window sequence
    #[error("Invalid chunk options: {0}")]
    InvalidOptions(String),
}

impl From<ProcessError> for CrateError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::InvalidOptions(_) => CrateError::Config(err.to_string()),
        }
    }
}
