//! Replication restricted to live nodes.
//!
//! When some nodes are known to be down the ring itself is left alone (a
//! rebuild would move keys between healthy nodes too). Instead the clockwise
//! walk skips unavailable nodes: the primary is the first live node after the
//! key's point, and the remaining replicas are the next distinct live nodes.

use std::collections::HashSet;

use hashring::HashRing;
use tracing::debug;

use crate::error::ReplicationError;
use crate::strategy::ReplicationStrategy;

/// Sequential placement over the subset of nodes marked live.
#[derive(Debug, Clone)]
pub struct LiveSetStrategy {
    replication_factor: usize,
    live: HashSet<String>,
}

impl LiveSetStrategy {
    pub fn new<I, S>(replication_factor: usize, live: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replication_factor,
            live: live.into_iter().map(Into::into).collect(),
        }
    }

    /// Every node on `ring` starts out live.
    pub fn all_live(replication_factor: usize, ring: &HashRing) -> Self {
        Self::new(replication_factor, ring.weights().keys().cloned())
    }

    pub fn mark_down(&mut self, node: &str) -> bool {
        self.live.remove(node)
    }

    pub fn mark_up(&mut self, node: impl Into<String>) -> bool {
        self.live.insert(node.into())
    }

    pub fn is_live(&self, node: &str) -> bool {
        self.live.contains(node)
    }
}

impl ReplicationStrategy for LiveSetStrategy {
    fn replication_factor(&self) -> usize {
        self.replication_factor
    }

    fn replicas_for_key<'r>(
        &self,
        ring: &'r HashRing,
        key: &str,
    ) -> Result<Vec<&'r str>, ReplicationError> {
        if self.replication_factor == 0 {
            return Err(hashring::Error::InvalidReplicaCount.into());
        }
        if ring.is_empty() {
            return Err(hashring::Error::EmptyRing.into());
        }

        let live: Vec<&str> = ring
            .weights()
            .keys()
            .map(String::as_str)
            .filter(|node| self.live.contains(*node))
            .collect();
        if live.len() < self.replication_factor {
            return Err(ReplicationError::NotEnoughLiveNodes {
                required: self.replication_factor,
                live: live.len(),
            });
        }

        let Some(primary) = ring.get_node_from(key, &live) else {
            return Err(ReplicationError::NotEnoughLiveNodes {
                required: self.replication_factor,
                live: 0,
            });
        };
        if ring.get_node(key) != Some(primary) {
            debug!(key, primary, "primary owner down, failing over");
        }

        let mut replicas = Vec::with_capacity(self.replication_factor);
        replicas.push(primary);
        replicas.extend(
            ring.get_nodes(key, ring.size())?
                .into_iter()
                .filter(|node| *node != primary && self.live.contains(*node))
                .take(self.replication_factor - 1),
        );
        Ok(replicas)
    }

    fn name(&self) -> &'static str {
        "LiveSetStrategy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::SimpleStrategy;

    #[test]
    fn test_all_live_matches_simple() {
        let ring = HashRing::new(["a", "b", "c", "d"]);
        let live = LiveSetStrategy::all_live(3, &ring);
        let simple = SimpleStrategy::new(3);
        for i in 0..100 {
            let key = format!("key-{i}");
            assert_eq!(
                live.replicas_for_key(&ring, &key).unwrap(),
                simple.replicas_for_key(&ring, &key).unwrap()
            );
        }
    }

    #[test]
    fn test_skips_down_primary() {
        let ring = HashRing::new(["a", "b", "c"]);
        let mut strategy = LiveSetStrategy::all_live(2, &ring);
        assert!(strategy.mark_down("a"));
        assert!(!strategy.is_live("a"));

        // "test" is owned by a, followed by b then c.
        let replicas = strategy.replicas_for_key(&ring, "test").unwrap();
        assert_eq!(replicas, ["b", "c"]);

        assert!(strategy.mark_up("a"));
        let replicas = strategy.replicas_for_key(&ring, "test").unwrap();
        assert_eq!(replicas, ["a", "b"]);
    }

    #[test]
    fn test_not_enough_live_nodes() {
        let ring = HashRing::new(["a", "b", "c"]);
        let strategy = LiveSetStrategy::new(2, ["a", "not-on-ring"]);
        assert_eq!(
            strategy.replicas_for_key(&ring, "test").unwrap_err(),
            ReplicationError::NotEnoughLiveNodes {
                required: 2,
                live: 1
            }
        );
    }

    #[test]
    fn test_zero_factor_and_empty_ring() {
        let ring = HashRing::new(["a"]);
        assert_eq!(
            LiveSetStrategy::all_live(0, &ring)
                .replicas_for_key(&ring, "k")
                .unwrap_err(),
            ReplicationError::Ring(hashring::Error::InvalidReplicaCount)
        );

        let empty = HashRing::default();
        assert_eq!(
            LiveSetStrategy::new(1, ["a"])
                .replicas_for_key(&empty, "k")
                .unwrap_err(),
            ReplicationError::Ring(hashring::Error::EmptyRing)
        );
    }
}
