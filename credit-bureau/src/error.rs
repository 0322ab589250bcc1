//! Error types for the credit bureau

use thiserror::Error;

/// Credit bureau error
#[derive(Debug, Error)]
pub enum Error {
    /// Job queue is at capacity
    #[error("Scoring queue full")]
    QueueFull,

    /// Dispatcher or worker went away before answering
    #[error("Credit bureau closed")]
    Closed,
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
