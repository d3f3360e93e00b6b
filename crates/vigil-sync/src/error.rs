//! Sync error types.

use thiserror::Error;

/// Failure in the underlying transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never reached the backend.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    /// The request timed out.
    #[error("request timed out")]
    Timeout,
    /// No connection is established.
    #[error("not connected")]
    NotConnected,
    /// The backend answered with a non-success HTTP status.
    #[error("unexpected http status {0}")]
    Status(u16),
}

/// Failure of a typed backend call.
///
/// None of these are fatal: the caller surfaces them as a failed
/// operation and the store is never mutated on a failed call.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Transport-level failure.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    /// The response body did not decode.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    /// The backend reported a failure.
    #[error("backend error: {0}")]
    Backend(String),
    /// The backend answered success but carried no data.
    #[error("backend returned no data")]
    Unavailable,
}
