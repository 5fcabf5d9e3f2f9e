//! Replication strategy abstractions.
//!
//! Replication strategies determine how many replicas to create and where
//! to place them on the ring:
//!
//! - **SimpleStrategy**: N distinct nodes clockwise from the key
//! - **LiveSetStrategy**: the same walk restricted to nodes known to be up

pub mod live_set;
pub mod simple;

pub use live_set::LiveSetStrategy;
pub use simple::SimpleStrategy;

use hashring::HashRing;

use crate::error::ReplicationError;

/// Trait for replication strategies.
///
/// Implementations must be thread-safe (Send + Sync) as they may be shared
/// across threads alongside ring snapshots.
pub trait ReplicationStrategy: Send + Sync + 'static {
    /// Number of replicas placed per key, primary included.
    fn replication_factor(&self) -> usize;

    /// Nodes that should hold `key`, primary first.
    ///
    /// The returned names borrow from `ring`.
    fn replicas_for_key<'r>(
        &self,
        ring: &'r HashRing,
        key: &str,
    ) -> Result<Vec<&'r str>, ReplicationError>;

    /// Strategy name for logging.
    fn name(&self) -> &'static str;
}
