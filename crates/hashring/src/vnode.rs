//! Virtual node placement.
//!
//! Each node occupies many points on the ring so that keys spread evenly and
//! only a fraction of them move when membership changes. A node's share of
//! virtual nodes is proportional to its weight:
//!
//! ```text
//! count = ceil(POINTS_PER_NODE * node_count * weight / total_weight)
//! ```
//!
//! Rounding up guarantees that a node with a tiny weight still gets at least
//! one virtual node; truncating here would drop it from the ring entirely.
//!
//! Virtual node `j` of node `n` hashes the string `"n-j"` with MD5 and places
//! one ring point per 4-byte window for the first three windows. The fourth
//! window is ignored; existing deployments depend on this exact layout.

use crate::node::Weight;
use crate::token::{digest, HashKey};

/// Base virtual node count for a node of average weight.
pub const POINTS_PER_NODE: u64 = 40;

/// Ring points derived from each virtual node digest.
pub const POINTS_PER_VNODE: usize = 3;

/// Number of virtual nodes a node of `weight` gets.
///
/// `node_count` is the length of the node list and `total_weight` the sum of
/// weights over that list. Returns 0 only for a zero weight or empty ring.
pub fn vnode_count(node_count: usize, weight: Weight, total_weight: u64) -> usize {
    if weight == 0 || total_weight == 0 {
        return 0;
    }
    let numerator = POINTS_PER_NODE * node_count as u64 * u64::from(weight);
    numerator.div_ceil(total_weight) as usize
}

/// A single virtual node: one replica index of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualNode<'a> {
    pub node: &'a str,
    pub index: usize,
}

impl<'a> VirtualNode<'a> {
    #[inline]
    pub fn new(node: &'a str, index: usize) -> Self {
        Self { node, index }
    }

    /// Synthetic key hashed for this virtual node: `"<node>-<index>"`.
    pub fn key(&self) -> String {
        format!("{}-{}", self.node, self.index)
    }

    /// The ring points this virtual node occupies.
    pub fn points(&self) -> [HashKey; POINTS_PER_VNODE] {
        let d = digest(&self.key());
        std::array::from_fn(|i| HashKey::from_window(&d, i))
    }
}
