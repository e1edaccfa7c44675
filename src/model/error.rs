//! Error types for completion calls

use std::time::Duration;

use thiserror::Error;

/// Error type for a single completion call. It only ever fails the
/// question being answered, so there is no conversion into the crate `Error`.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The provider call failed
    #[error("completion failed: {0}")]
    Completion(#[from] rig::completion::CompletionError),

    /// The provider answered without any text
    #[error("completion returned no text")]
    EmptyResponse,

    /// The call did not finish in time
    #[error("completion timed out after {0:?}")]
    Timeout(Duration),

    /// Service-level failure reported by a non-`rig` client
    #[error("completion service error: {0}")]
    Service(String),
}
