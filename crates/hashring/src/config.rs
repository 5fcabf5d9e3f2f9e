//! Serializable ring description.
//!
//! Host applications embed a `RingConfig` in their own configuration and turn
//! it into a ring with [`RingConfig::build`]. Nothing here reads files or the
//! environment.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::node::{Membership, Weight};
use crate::ring::HashRing;

/// Node list and weight table describing a ring.
///
/// Listed nodes default to weight 1. Nodes that only appear in `weights` are
/// appended after the list in name order. Zero weights are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    pub nodes: Vec<String>,
    pub weights: BTreeMap<String, Weight>,
}

impl RingConfig {
    pub fn membership(&self) -> Membership {
        let mut nodes = self.nodes.clone();
        for (node, weight) in &self.weights {
            if *weight > 0 && !nodes.contains(node) {
                nodes.push(node.clone());
            }
        }
        let weights: HashMap<String, Weight> = self
            .weights
            .iter()
            .map(|(node, weight)| (node.clone(), *weight))
            .collect();
        Membership::new(nodes, weights)
    }

    pub fn build(&self) -> HashRing {
        HashRing::from_membership(self.membership())
    }
}

impl HashRing {
    /// Describe this ring's membership. Building the result yields the same
    /// ring points.
    pub fn to_config(&self) -> RingConfig {
        RingConfig {
            nodes: self.nodes().to_vec(),
            weights: self
                .weights()
                .iter()
                .map(|(node, weight)| (node.clone(), *weight))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_nodes_only() {
        let config: RingConfig = serde_json::from_str(r#"{"nodes": ["a", "b", "c"]}"#).unwrap();
        let ring = config.build();
        assert_eq!(ring.points(), HashRing::new(["a", "b", "c"]).points());
    }

    #[test]
    fn test_deserialize_weights_only() {
        let config: RingConfig =
            serde_json::from_str(r#"{"weights": {"b": 2, "a": 1, "c": 1}}"#).unwrap();
        let ring = config.build();
        let direct = HashRing::with_weights([("a", 1), ("b", 2), ("c", 1)]);
        assert_eq!(ring.nodes(), direct.nodes());
        assert_eq!(ring.points(), direct.points());
    }

    #[test]
    fn test_mixed_config() {
        let config = RingConfig {
            nodes: vec!["z".into(), "a".into()],
            weights: BTreeMap::from([("a".into(), 3), ("m".into(), 2), ("q".into(), 0)]),
        };
        let ring = config.build();
        assert_eq!(ring.nodes(), ["z", "a", "m"]);
        assert_eq!(ring.weight("z"), Some(1));
        assert_eq!(ring.weight("a"), Some(3));
        assert_eq!(ring.weight("m"), Some(2));
        assert!(!ring.contains("q"));
    }

    #[test]
    fn test_to_config_rebuilds_same_ring() {
        let ring = HashRing::new(["a", "c", "b", "a"]);
        let rebuilt = ring.to_config().build();
        assert_eq!(rebuilt.nodes(), ring.nodes());
        assert_eq!(rebuilt.points(), ring.points());
    }

    #[test]
    fn test_negative_weight_rejected_by_deserializer() {
        let parsed: Result<RingConfig, _> = serde_json::from_str(r#"{"weights": {"a": -1}}"#);
        assert!(parsed.is_err());
    }
}
