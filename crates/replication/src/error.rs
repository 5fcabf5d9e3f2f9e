//! Errors returned by replication strategies.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplicationError {
    /// The ring could not satisfy the lookup.
    #[error(transparent)]
    Ring(#[from] hashring::Error),
    /// Fewer live nodes exist on the ring than the replication factor.
    #[error("need {required} live replicas but only {live} live nodes on the ring")]
    NotEnoughLiveNodes { required: usize, live: usize },
}
