//! Error types for queue operations.

use thiserror::Error;

/// Result type for queue operations.
pub type Result<T> = std::result::Result<T, QueueError>;

/// Reasons a queue operation can fail.
///
/// Every failing operation leaves the queue exactly as it was before the call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// A required argument was absent or unusable, e.g. a zero-capacity output buffer.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Storage for a node or its string could not be obtained.
    #[error("allocation failed")]
    AllocationFailed,

    /// Removal was attempted on an empty queue.
    #[error("queue is empty")]
    Empty,
}
