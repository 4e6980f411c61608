//! Backend node abstraction.

use crate::config::NodeConfig;

/// A single backend node known to the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Unique node identifier.
    pub name: String,
    /// Address reported in the status document.
    pub address: String,
}

impl Node {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

impl From<&NodeConfig> for Node {
    fn from(config: &NodeConfig) -> Self {
        Self::new(config.name.clone(), config.address.clone())
    }
}
