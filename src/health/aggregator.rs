//! Health aggregation.
//!
//! # Responsibilities
//! - Read current node membership from the directory
//! - Probe every configured media server
//! - Group observations and stamp the snapshot
//!
//! The aggregator never looks at the cache; every call is a fresh cycle.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures_util::future::join_all;

use crate::health::probe::Prober;
use crate::health::snapshot::{HealthSnapshot, ServerObservation};
use crate::nodes::NodeDirectory;
use crate::observability::metrics;

/// Address reported when the node directory itself cannot be read.
pub const DIRECTORY_ADDRESS: &str = "node-directory";

/// Combines node membership and media server probes into snapshots.
pub struct Aggregator {
    directory: Arc<dyn NodeDirectory>,
    prober: Arc<dyn Prober>,
    media_servers: Vec<String>,
    node_group: String,
    media_group: String,
}

impl Aggregator {
    pub fn new(
        directory: Arc<dyn NodeDirectory>,
        prober: Arc<dyn Prober>,
        media_servers: Vec<String>,
        node_group: impl Into<String>,
        media_group: impl Into<String>,
    ) -> Self {
        Self {
            directory,
            prober,
            media_servers,
            node_group: node_group.into(),
            media_group: media_group.into(),
        }
    }

    /// Run one full probing cycle.
    pub async fn recompute(&self) -> HealthSnapshot {
        let started = Instant::now();

        // Directory membership stands in for node liveness; nodes are not probed.
        let nodes = match self.directory.list_nodes() {
            Ok(nodes) => nodes
                .into_iter()
                .map(|node| ServerObservation::ok(node.address))
                .collect(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read node directory");
                vec![ServerObservation::failing(DIRECTORY_ADDRESS, e.to_string())]
            }
        };

        // join_all keeps input order, so results line up with the config.
        let media = join_all(
            self.media_servers
                .iter()
                .map(|address| self.prober.probe(address)),
        )
        .await;

        let mut groups = BTreeMap::new();
        groups.insert(self.node_group.clone(), nodes);
        groups.insert(self.media_group.clone(), media);

        let snapshot = HealthSnapshot::new(Utc::now(), groups);
        metrics::record_snapshot(&snapshot, started.elapsed());

        tracing::info!(
            general_state = ?snapshot.overall_status(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Health snapshot recomputed"
        );

        snapshot
    }
}
