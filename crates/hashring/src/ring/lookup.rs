//! Key lookup and replica walks.
//!
//! A key belongs to the owner of the first ring point strictly greater than
//! the key's own point; past the largest point the search wraps to index 0.

use std::collections::{HashMap, HashSet};

use super::HashRing;
use crate::error::{Error, Result};
use crate::token::HashKey;

/// Size of the 32-bit point space.
const RING_SPAN: f64 = (u32::MAX as f64) + 1.0;

impl HashRing {
    /// Ring point of an arbitrary key.
    #[inline]
    pub fn gen_key(&self, key: &str) -> HashKey {
        HashKey::from_key(key)
    }

    /// Index into [`HashRing::points`] of the point that owns `key`.
    ///
    /// Returns `None` for an empty ring.
    pub fn get_node_pos(&self, key: &str) -> Option<usize> {
        if self.ring.is_empty() {
            return None;
        }
        let hash = self.gen_key(key);
        let pos = self.sorted_keys.partition_point(|&point| point <= hash);
        if pos == self.sorted_keys.len() {
            // Past the last point, wrap to the first.
            return Some(0);
        }
        Some(pos)
    }

    /// Node that owns `key`, or `None` for an empty ring.
    pub fn get_node(&self, key: &str) -> Option<&str> {
        let pos = self.get_node_pos(key)?;
        self.owner_of(self.sorted_keys[pos])
    }

    /// Node that owns the ring point `point` exactly.
    pub fn owner_of(&self, point: HashKey) -> Option<&str> {
        self.ring.get(&point).map(String::as_str)
    }

    /// Up to `size` distinct nodes clockwise from `key`, primary owner first.
    ///
    /// Fails if `size` is zero, the ring is empty, or `size` exceeds the
    /// number of distinct nodes.
    pub fn get_nodes(&self, key: &str, size: usize) -> Result<Vec<&str>> {
        if size == 0 {
            return Err(Error::InvalidReplicaCount);
        }
        let pos = self.get_node_pos(key).ok_or(Error::EmptyRing)?;
        let available = self.size();
        if size > available {
            return Err(Error::InsufficientNodes {
                requested: size,
                available,
            });
        }

        let mut seen = HashSet::with_capacity(size);
        let mut nodes = Vec::with_capacity(size);
        for node in self.walk_from(pos) {
            if seen.insert(node) {
                nodes.push(node);
                if nodes.len() == size {
                    return Ok(nodes);
                }
            }
        }

        // Only reachable when point collisions erased a node from the ring.
        Err(Error::InsufficientNodes {
            requested: size,
            available: nodes.len(),
        })
    }

    /// First node clockwise from `key` that is in `allowed`.
    ///
    /// Returns `None` for an empty ring or when no point on the ring belongs
    /// to an allowed node.
    pub fn get_node_from<S: AsRef<str>>(&self, key: &str, allowed: &[S]) -> Option<&str> {
        let allowed: HashSet<&str> = allowed.iter().map(AsRef::as_ref).collect();
        let pos = self.get_node_pos(key)?;
        self.walk_from(pos).find(|node| allowed.contains(*node))
    }

    /// Fraction of the 32-bit keyspace each node owns.
    ///
    /// The arc ending at each point belongs to that point's owner. Fractions
    /// sum to 1.0 for a non-empty ring.
    pub fn ownership(&self) -> HashMap<&str, f64> {
        let mut shares: HashMap<&str, f64> = HashMap::new();
        let (Some(&first), Some(&last)) = (self.sorted_keys.first(), self.sorted_keys.last())
        else {
            return shares;
        };

        let wrap_arc = RING_SPAN - f64::from(first.distance_to(&last));
        let arcs = std::iter::once(wrap_arc).chain(
            self.sorted_keys
                .windows(2)
                .map(|pair| f64::from(pair[0].distance_to(&pair[1]))),
        );

        for (point, arc) in self.sorted_keys.iter().zip(arcs) {
            if let Some(node) = self.owner_of(*point) {
                *shares.entry(node).or_default() += arc / RING_SPAN;
            }
        }
        shares
    }

    /// Owners of every point, starting at `pos` and wrapping once around.
    fn walk_from(&self, pos: usize) -> impl Iterator<Item = &str> + '_ {
        let (before, after) = self.sorted_keys.split_at(pos);
        after
            .iter()
            .chain(before)
            .filter_map(move |point| self.owner_of(*point))
    }
}
