use thiserror::Error;

use crate::media::MediaError;

/// Errors that can occur during adapter operations
///
/// All variants are terminal for the call in progress; the adapter does
/// not retry or recover.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Backend request failed at the transport level or returned a
    /// non-success status
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Backend response did not match the expected shape
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// A media identifier could not be resolved
    #[error(transparent)]
    Media(#[from] MediaError),

    /// Unexpected internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
