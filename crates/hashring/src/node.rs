//! Ring membership: the node list and the weight table.
//!
//! Nodes are identified by their string value. The node list keeps insertion
//! order and may repeat a node; the weight table holds exactly one entry per
//! distinct node. Every membership change produces a fresh `Membership`, the
//! receiver is never modified.

use std::collections::{BTreeMap, HashMap};

/// Relative share of the ring a node receives. Zero is never a valid weight.
pub type Weight = u32;

/// Weight given to nodes added without an explicit weight.
pub const DEFAULT_WEIGHT: Weight = 1;

/// Node list plus weight table, the only inputs to ring construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Membership {
    nodes: Vec<String>,
    weights: HashMap<String, Weight>,
}

impl Membership {
    /// Combine a node list with a weight table.
    ///
    /// Listed nodes missing from the table get [`DEFAULT_WEIGHT`]. Table
    /// entries that are zero or name an unlisted node are dropped.
    pub fn new(nodes: Vec<String>, mut weights: HashMap<String, Weight>) -> Self {
        weights.retain(|node, weight| *weight > 0 && nodes.contains(node));
        for node in &nodes {
            weights.entry(node.clone()).or_insert(DEFAULT_WEIGHT);
        }
        Self { nodes, weights }
    }

    /// Default-weighted membership from a node list. Duplicates are kept in
    /// the list and share one weight entry.
    pub fn from_nodes<I, S>(nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(nodes.into_iter().map(Into::into).collect(), HashMap::new())
    }

    /// Membership from a weight table alone. The node list is ordered by
    /// node name so the result does not depend on the caller's map ordering.
    pub fn from_weights<I, S>(weights: I) -> Self
    where
        I: IntoIterator<Item = (S, Weight)>,
        S: Into<String>,
    {
        let sorted: BTreeMap<String, Weight> = weights
            .into_iter()
            .map(|(node, weight)| (node.into(), weight))
            .filter(|(_, weight)| *weight > 0)
            .collect();
        let nodes = sorted.keys().cloned().collect();
        Self {
            nodes,
            weights: sorted.into_iter().collect(),
        }
    }

    /// Node list in insertion order, duplicates included.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Weight table, one entry per distinct node.
    pub fn weights(&self) -> &HashMap<String, Weight> {
        &self.weights
    }

    pub fn weight(&self, node: &str) -> Option<Weight> {
        self.weights.get(node).copied()
    }

    pub fn contains(&self, node: &str) -> bool {
        self.weights.contains_key(node)
    }

    /// Number of distinct nodes.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sum of weights over the node list. A repeated node counts once per
    /// occurrence.
    pub fn total_weight(&self) -> u64 {
        self.nodes
            .iter()
            .map(|node| u64::from(self.weight(node).unwrap_or(DEFAULT_WEIGHT)))
            .sum()
    }

    /// Copy with `node` appended at `weight`.
    pub fn with_node(&self, node: &str, weight: Weight) -> Self {
        let mut nodes = Vec::with_capacity(self.nodes.len() + 1);
        nodes.extend_from_slice(&self.nodes);
        nodes.push(node.to_owned());

        let mut weights = self.weights.clone();
        weights.insert(node.to_owned(), weight);
        Self { nodes, weights }
    }

    /// Copy with the weight of `node` replaced.
    pub fn with_weight(&self, node: &str, weight: Weight) -> Self {
        let mut weights = self.weights.clone();
        weights.insert(node.to_owned(), weight);
        Self {
            nodes: self.nodes.clone(),
            weights,
        }
    }

    /// Copy with every occurrence of `node` removed.
    pub fn without_node(&self, node: &str) -> Self {
        let nodes = self.nodes.iter().filter(|n| *n != node).cloned().collect();
        let mut weights = self.weights.clone();
        weights.remove(node);
        Self { nodes, weights }
    }
}
