//! Error type shared by the controller and the report writer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by core operations.
///
/// Store failures are boxed so the controller stays generic over the backing
/// [`TimeStore`](crate::TimeStore).
#[derive(Debug, Error)]
pub enum CoreError {
    /// The backing time store failed to read or write.
    #[error("time store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A report could not be serialized.
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A report could not be written to its destination.
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CoreError {
    /// Wraps a store backend error.
    pub fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store(Box::new(err))
    }
}
