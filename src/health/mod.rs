//! Health aggregation subsystem.
//!
//! # Data Flow
//! ```text
//! GET /status
//!     → cache.rs (fresh? serve cached snapshot)
//!     → [stale] aggregator.rs
//!         → node directory (membership, reported ok)
//!         → probe.rs × media servers (fanned out)
//!     → snapshot.rs (group, derive overall verdict)
//!     → cache.rs (store, return)
//! ```
//!
//! # Design Decisions
//! - Per-target failures become observations, never endpoint errors
//! - A failed directory read degrades to a `failing` observation
//! - Snapshots are immutable once built and shared via `Arc`

pub mod aggregator;
pub mod cache;
pub mod probe;
pub mod snapshot;

pub use aggregator::Aggregator;
pub use cache::SnapshotCache;
pub use probe::{HttpProbe, Prober};
pub use snapshot::{HealthSnapshot, OverallStatus, ServerObservation, ServerStatus};
