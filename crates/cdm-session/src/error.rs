//! Session error types

use cdm_model::IterationId;
use uuid::Uuid;

/// Errors crossing the session boundary
///
/// Only operations that reach the remote store can fail; missing or absent
/// data (no iteration, no domain, no prior snapshot) is a legitimate empty
/// state and never surfaces as an error.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The targeted iteration is not open in this session
    #[error("iteration not open: {0}")]
    IterationNotOpen(IterationId),

    /// A write was rejected by the store
    #[error("write rejected: {0}")]
    WriteRejected(String),

    /// A targeted thing does not exist
    #[error("thing not found: {0}")]
    ThingNotFound(Uuid),

    /// A transaction without operations was submitted
    #[error("empty transaction")]
    EmptyTransaction,

    /// The remote endpoint is unreachable
    #[error("connection lost")]
    ConnectionLost,

    /// A session refresh failed
    #[error("refresh failed: {0}")]
    RefreshFailed(String),
}
