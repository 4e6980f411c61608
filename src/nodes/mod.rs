//! Backend node directory.
//!
//! # Data Flow
//! ```text
//! [[nodes]] config
//!     → pool.rs (NodePool, current membership)
//!     → NodeDirectory::list_nodes()
//!     → health aggregator (read-only)
//! ```
//!
//! # Design Decisions
//! - The aggregator only reads membership; it never mutates it
//! - Membership is replaced wholesale, so a reader sees either the old
//!   list or the new one
//! - Listing may fail; callers decide how to degrade

pub mod node;
pub mod pool;

pub use node::Node;
pub use pool::NodePool;

use thiserror::Error;

/// Errors from reading the node directory.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// The directory backing store could not be reached.
    #[error("node directory unavailable: {0}")]
    Unavailable(String),
}

/// Source of the current backend node membership.
pub trait NodeDirectory: Send + Sync {
    /// Return the nodes currently in rotation, in a stable order.
    fn list_nodes(&self) -> Result<Vec<Node>, DirectoryError>;
}
