//! Ring construction and copy-on-write membership changes.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::node::{Membership, Weight, DEFAULT_WEIGHT};
use crate::token::HashKey;
use crate::vnode::{vnode_count, VirtualNode, POINTS_PER_VNODE};

/// Consistent hash ring built from a node list and weight table.
///
/// A `HashRing` is fully built on construction and never changes afterwards,
/// with the single exception of [`HashRing::update_with_weights`], which
/// needs `&mut self`. The snapshot-returning mutators (`add_node`,
/// `add_weighted_node`, `update_weighted_node`, `remove_node`) take a shared
/// [`Ring`](crate::Ring) handle and hand back either that same handle (no-op)
/// or a newly built ring.
#[derive(Debug, Clone, Default)]
pub struct HashRing {
    /// Ring point to owning node. On a point collision the node inserted
    /// last owns the point.
    pub(super) ring: HashMap<HashKey, String>,
    /// Every generated point in ascending order, duplicates included.
    pub(super) sorted_keys: Vec<HashKey>,
    pub(super) membership: Membership,
}

impl HashRing {
    /// Build a ring where every distinct node has weight 1.
    pub fn new<I, S>(nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_membership(Membership::from_nodes(nodes))
    }

    /// Build a ring from a weight table. Zero weights are ignored.
    pub fn with_weights<I, S>(weights: I) -> Self
    where
        I: IntoIterator<Item = (S, Weight)>,
        S: Into<String>,
    {
        Self::from_membership(Membership::from_weights(weights))
    }

    /// Build a ring from an existing membership.
    pub fn from_membership(membership: Membership) -> Self {
        let (ring, sorted_keys) = generate_circle(&membership);
        debug!(
            nodes = membership.len(),
            points = sorted_keys.len(),
            "built hash ring"
        );
        Self {
            ring,
            sorted_keys,
            membership,
        }
    }

    /// Number of distinct nodes.
    pub fn size(&self) -> usize {
        self.membership.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Number of entries in the sorted point sequence.
    pub fn point_count(&self) -> usize {
        self.sorted_keys.len()
    }

    /// Sorted ring points.
    pub fn points(&self) -> &[HashKey] {
        &self.sorted_keys
    }

    /// Node list in insertion order.
    pub fn nodes(&self) -> &[String] {
        self.membership.nodes()
    }

    pub fn weights(&self) -> &HashMap<String, Weight> {
        self.membership.weights()
    }

    pub fn weight(&self, node: &str) -> Option<Weight> {
        self.membership.weight(node)
    }

    pub fn contains(&self, node: &str) -> bool {
        self.membership.contains(node)
    }

    pub fn membership(&self) -> &Membership {
        &self.membership
    }

    /// Replace this ring in place with one built from `weights`.
    ///
    /// Does nothing when `weights` (after dropping zero entries) equals the
    /// current weight table. Unlike the other mutators this overwrites the
    /// receiver, so it needs exclusive access: a ring shared behind an `Arc`
    /// must go through `Arc::make_mut` or a lock held by the caller.
    pub fn update_with_weights<I, S>(&mut self, weights: I)
    where
        I: IntoIterator<Item = (S, Weight)>,
        S: Into<String>,
    {
        let next = Membership::from_weights(weights);
        if next.weights() == self.membership.weights() {
            trace!("weights unchanged, keeping ring");
            return;
        }
        debug!(
            from = self.membership.len(),
            to = next.len(),
            "replacing ring with new weights"
        );
        *self = Self::from_membership(next);
    }

    /// Add `node` with the default weight. See [`HashRing::add_weighted_node`].
    pub fn add_node(self: &Arc<Self>, node: &str) -> Arc<Self> {
        self.add_weighted_node(node, DEFAULT_WEIGHT)
    }

    /// Return a ring that also contains `node` at `weight`.
    ///
    /// Returns the receiver unchanged if `weight` is zero or the node is
    /// already present, so repeating an add is harmless.
    pub fn add_weighted_node(self: &Arc<Self>, node: &str, weight: Weight) -> Arc<Self> {
        if weight == 0 {
            trace!(node, "ignoring add with zero weight");
            return Arc::clone(self);
        }
        if self.contains(node) {
            trace!(node, "node already on ring");
            return Arc::clone(self);
        }
        debug!(node, weight, "adding node to ring");
        Arc::new(Self::from_membership(self.membership.with_node(node, weight)))
    }

    /// Return a ring where `node` has `weight`.
    ///
    /// Returns the receiver unchanged if `weight` is zero, the node is
    /// unknown, or the weight is already `weight`.
    pub fn update_weighted_node(self: &Arc<Self>, node: &str, weight: Weight) -> Arc<Self> {
        if weight == 0 {
            trace!(node, "ignoring update with zero weight");
            return Arc::clone(self);
        }
        match self.weight(node) {
            None => {
                trace!(node, "ignoring update of unknown node");
                return Arc::clone(self);
            }
            Some(current) if current == weight => {
                trace!(node, weight, "weight unchanged");
                return Arc::clone(self);
            }
            Some(_) => {}
        }
        debug!(node, weight, "updating node weight");
        Arc::new(Self::from_membership(
            self.membership.with_weight(node, weight),
        ))
    }

    /// Return a ring without `node`. Unknown nodes leave the receiver as is.
    pub fn remove_node(self: &Arc<Self>, node: &str) -> Arc<Self> {
        if !self.contains(node) {
            trace!(node, "ignoring removal of unknown node");
            return Arc::clone(self);
        }
        debug!(node, "removing node from ring");
        Arc::new(Self::from_membership(self.membership.without_node(node)))
    }
}

/// Lay out every virtual node of `membership` on the ring.
///
/// Returns the point-to-node map and the ascending point sequence. Each entry
/// of the node list contributes its own virtual nodes, so a repeated node
/// repeats its points in the sequence.
fn generate_circle(membership: &Membership) -> (HashMap<HashKey, String>, Vec<HashKey>) {
    let node_count = membership.nodes().len();
    let total_weight = membership.total_weight();

    let mut ring = HashMap::new();
    let mut sorted_keys = Vec::new();

    for node in membership.nodes() {
        let weight = membership.weight(node).unwrap_or(DEFAULT_WEIGHT);
        let count = vnode_count(node_count, weight, total_weight);
        sorted_keys.reserve(count * POINTS_PER_VNODE);

        for index in 0..count {
            for point in VirtualNode::new(node, index).points() {
                ring.insert(point, node.clone());
                sorted_keys.push(point);
            }
        }
    }

    sorted_keys.sort_unstable();
    (ring, sorted_keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ring() {
        let ring = HashRing::new(Vec::<String>::new());
        assert!(ring.is_empty());
        assert_eq!(ring.size(), 0);
        assert_eq!(ring.point_count(), 0);
    }

    #[test]
    fn test_point_count_equal_weights() {
        // 40 virtual nodes per node, 3 points each.
        let ring = HashRing::new(["a", "b", "c"]);
        assert_eq!(ring.point_count(), 3 * 40 * 3);
        assert_eq!(ring.size(), 3);
    }

    #[test]
    fn test_point_count_weighted() {
        // n = 3, total = 4: a -> 30, b -> 60, c -> 30 virtual nodes.
        let ring = HashRing::with_weights([("a", 1), ("b", 2), ("c", 1)]);
        assert_eq!(ring.point_count(), (30 + 60 + 30) * 3);
    }

    #[test]
    fn test_low_weight_node_keeps_a_point() {
        // a: ceil(80 / 81) = 1 virtual node, b: ceil(6400 / 81) = 80.
        let ring = HashRing::with_weights([("a", 1), ("b", 80)]);
        assert_eq!(ring.point_count(), (1 + 80) * 3);
        let owned_by_a = ring.ring.values().filter(|n| *n == "a").count();
        assert!(owned_by_a >= 1);
    }

    #[test]
    fn test_points_sorted() {
        let ring = HashRing::new(["a", "b", "c", "d"]);
        assert!(ring.points().windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_duplicate_entries_repeat_points() {
        let ring = HashRing::new(["a", "a", "b"]);
        // n = 3, total = 3: each list entry gets 40 virtual nodes.
        assert_eq!(ring.point_count(), 3 * 40 * 3);
        assert_eq!(ring.size(), 2);
        assert!(ring.ring.len() <= 2 * 40 * 3);
    }

    #[test]
    fn test_construction_is_deterministic() {
        let a = HashRing::with_weights([("x", 3), ("y", 1), ("z", 2)]);
        let b = HashRing::with_weights([("z", 2), ("x", 3), ("y", 1)]);
        assert_eq!(a.points(), b.points());
        assert_eq!(a.nodes(), b.nodes());
        assert_eq!(a.ring, b.ring);
    }

    #[test]
    fn test_zero_weight_ignored_in_weighted_build() {
        let ring = HashRing::with_weights([("a", 1), ("b", 0)]);
        assert_eq!(ring.size(), 1);
        assert!(!ring.contains("b"));
    }

    #[test]
    fn test_update_with_weights_in_place() {
        let mut ring = HashRing::with_weights([("a", 1), ("b", 1)]);
        let before = ring.points().to_vec();

        ring.update_with_weights([("b", 1), ("a", 1)]);
        assert_eq!(ring.points(), before.as_slice());

        ring.update_with_weights([("a", 1), ("b", 2)]);
        assert_eq!(ring.weight("b"), Some(2));
        assert_ne!(ring.points(), before.as_slice());

        ring.update_with_weights([("a", 1)]);
        assert_eq!(ring.size(), 1);
        assert!(!ring.contains("b"));
    }

    #[test]
    fn test_update_with_weights_through_arc() {
        let mut shared = Arc::new(HashRing::new(["a", "b"]));
        let reader = Arc::clone(&shared);

        Arc::make_mut(&mut shared).update_with_weights([("a", 1), ("b", 1), ("c", 1)]);

        assert_eq!(shared.size(), 3);
        // The other handle kept the old ring.
        assert_eq!(reader.size(), 2);
    }
}
