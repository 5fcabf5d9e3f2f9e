//! Error types for ring lookups.

use thiserror::Error;

/// Result type alias for ring operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when selecting nodes from the ring.
///
/// Membership changes never fail; invalid arguments there are absorbed as
/// no-ops. Only multi-node lookups report a reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The ring has no points to search.
    #[error("ring is empty")]
    EmptyRing,
    /// A replica set of size zero was requested.
    #[error("replica count must be at least 1")]
    InvalidReplicaCount,
    /// More distinct nodes were requested than the ring can provide.
    #[error("requested {requested} distinct nodes but only {available} available")]
    InsufficientNodes { requested: usize, available: usize },
}
