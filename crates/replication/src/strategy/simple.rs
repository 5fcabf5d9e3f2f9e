//! Simple replication strategy.
//!
//! Places N replicas on the first N distinct nodes found walking clockwise
//! from the key's ring point. Works well when every node is equally good and
//! failure domains do not matter.

use hashring::HashRing;

use crate::error::ReplicationError;
use crate::strategy::ReplicationStrategy;

/// Default replication factor: primary plus two replicas.
pub const DEFAULT_REPLICATION_FACTOR: usize = 3;

/// N replicas placed sequentially around the ring.
///
/// # Example
///
/// ```rust
/// use hashring::HashRing;
/// use replication::{ReplicationStrategy, SimpleStrategy};
///
/// let ring = HashRing::new(["a", "b", "c"]);
/// let strategy = SimpleStrategy::new(2);
///
/// let replicas = strategy.replicas_for_key(&ring, "test").unwrap();
/// assert_eq!(replicas, ["a", "b"]);
/// ```
#[derive(Debug, Clone)]
pub struct SimpleStrategy {
    replication_factor: usize,
}

impl SimpleStrategy {
    pub fn new(replication_factor: usize) -> Self {
        Self { replication_factor }
    }
}

impl Default for SimpleStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_REPLICATION_FACTOR)
    }
}

impl ReplicationStrategy for SimpleStrategy {
    fn replication_factor(&self) -> usize {
        self.replication_factor
    }

    fn replicas_for_key<'r>(
        &self,
        ring: &'r HashRing,
        key: &str,
    ) -> Result<Vec<&'r str>, ReplicationError> {
        Ok(ring.get_nodes(key, self.replication_factor)?)
    }

    fn name(&self) -> &'static str {
        "SimpleStrategy"
    }
}
