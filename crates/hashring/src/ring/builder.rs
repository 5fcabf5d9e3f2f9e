//! Builder for rings that mix default-weight and weighted nodes.

use std::collections::HashMap;

use super::HashRing;
use crate::node::{Membership, Weight};

/// Builder for constructing a [`HashRing`] node by node.
///
/// Nodes keep the order they were added in. A weight of zero drops the node.
#[derive(Debug, Clone, Default)]
pub struct RingBuilder {
    nodes: Vec<String>,
    weights: HashMap<String, Weight>,
}

impl RingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with the default weight.
    pub fn node(mut self, node: impl Into<String>) -> Self {
        self.nodes.push(node.into());
        self
    }

    /// Add a node with an explicit weight.
    pub fn weighted_node(mut self, node: impl Into<String>, weight: Weight) -> Self {
        if weight == 0 {
            return self;
        }
        let node = node.into();
        self.weights.insert(node.clone(), weight);
        self.nodes.push(node);
        self
    }

    pub fn build(self) -> HashRing {
        HashRing::from_membership(Membership::new(self.nodes, self.weights))
    }
}
