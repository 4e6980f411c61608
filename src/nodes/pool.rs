//! Node pool management.
//!
//! # Responsibilities
//! - Hold the current backend node membership
//! - Allow membership to be swapped at runtime
//! - Serve the membership to the health aggregator

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::NodeConfig;
use crate::nodes::{DirectoryError, Node, NodeDirectory};

/// Config-backed node directory.
#[derive(Debug)]
pub struct NodePool {
    nodes: ArcSwap<Vec<Node>>,
}

impl NodePool {
    /// Create a pool from configuration, preserving config order.
    pub fn new(configs: &[NodeConfig]) -> Self {
        let nodes: Vec<Node> = configs.iter().map(Node::from).collect();
        tracing::debug!(count = nodes.len(), "Node pool initialized");
        Self {
            nodes: ArcSwap::from_pointee(nodes),
        }
    }

    /// Replace the whole membership.
    pub fn replace(&self, nodes: Vec<Node>) {
        tracing::info!(count = nodes.len(), "Node membership replaced");
        self.nodes.store(Arc::new(nodes));
    }

    pub fn len(&self) -> usize {
        self.nodes.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NodeDirectory for NodePool {
    fn list_nodes(&self) -> Result<Vec<Node>, DirectoryError> {
        Ok(self.nodes.load().as_ref().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configs() -> Vec<NodeConfig> {
        vec![
            NodeConfig { name: "n1".into(), address: "http://10.0.0.1:5279".into() },
            NodeConfig { name: "n2".into(), address: "http://10.0.0.2:5279".into() },
        ]
    }

    #[test]
    fn test_lists_nodes_in_config_order() {
        let pool = NodePool::new(&configs());
        let nodes = pool.list_nodes().unwrap();
        assert_eq!(
            nodes.iter().map(|n| n.name.as_str()).collect::<Vec<_>>(),
            vec!["n1", "n2"]
        );
        assert_eq!(nodes[1].address, "http://10.0.0.2:5279");
    }

    #[test]
    fn test_replace_membership() {
        let pool = NodePool::new(&configs());
        pool.replace(vec![Node::new("n3", "http://10.0.0.3:5279")]);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.list_nodes().unwrap()[0].name, "n3");

        pool.replace(Vec::new());
        assert!(pool.is_empty());
    }
}
