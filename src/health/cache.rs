//! Snapshot cache.
//!
//! # Responsibilities
//! - Hold the latest snapshot and when it was computed
//! - Serve it while younger than the validity window
//! - Recompute lazily on the first request after expiry
//!
//! # Design Decisions
//! - One slot for the whole process; the unit of caching is the snapshot
//! - The slot is swapped atomically, readers never see a partial write
//! - Recomputes are single-flight: waiters re-check and reuse the result
//! - Recomputes run on their own task, so a caller that gives up (client
//!   disconnect, request timeout) never abandons a cycle halfway

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::health::aggregator::Aggregator;
use crate::health::snapshot::HealthSnapshot;

struct CachedSnapshot {
    snapshot: Arc<HealthSnapshot>,
    computed: Instant,
}

struct CacheInner {
    aggregator: Aggregator,
    validity: Duration,
    slot: ArcSwapOption<CachedSnapshot>,
    recompute_lock: Mutex<()>,
    recomputes: AtomicU64,
}

/// Process-wide cache in front of the aggregator.
pub struct SnapshotCache {
    inner: Arc<CacheInner>,
}

impl SnapshotCache {
    pub fn new(aggregator: Aggregator, validity: Duration) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                aggregator,
                validity,
                slot: ArcSwapOption::empty(),
                recompute_lock: Mutex::new(()),
                recomputes: AtomicU64::new(0),
            }),
        }
    }

    /// Return the cached snapshot if fresh, otherwise recompute it.
    ///
    /// Dropping the returned future does not cancel a recompute in progress;
    /// the snapshot is still stored for the next caller.
    pub async fn get_or_recompute(&self) -> Arc<HealthSnapshot> {
        if let Some(snapshot) = self.inner.fresh() {
            return snapshot;
        }

        let inner = self.inner.clone();
        match tokio::spawn(async move { inner.refresh().await }).await {
            Ok(snapshot) => snapshot,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => {
                // Only happens while the runtime is shutting down.
                tracing::warn!(error = %e, "Recompute task cancelled, computing inline");
                self.inner.refresh().await
            }
        }
    }

    /// Number of recomputes performed so far.
    pub fn recomputes(&self) -> u64 {
        self.inner.recomputes.load(Ordering::Relaxed)
    }
}

impl CacheInner {
    async fn refresh(&self) -> Arc<HealthSnapshot> {
        let _guard = self.recompute_lock.lock().await;
        if let Some(snapshot) = self.fresh() {
            tracing::debug!("Reusing snapshot computed while waiting");
            return snapshot;
        }

        let snapshot = Arc::new(self.aggregator.recompute().await);
        self.slot.store(Some(Arc::new(CachedSnapshot {
            snapshot: snapshot.clone(),
            computed: Instant::now(),
        })));
        self.recomputes.fetch_add(1, Ordering::Relaxed);

        snapshot
    }

    fn fresh(&self) -> Option<Arc<HealthSnapshot>> {
        let cached = self.slot.load_full()?;
        // Age since computation, not a comparison against a future instant.
        let age = Instant::now().saturating_duration_since(cached.computed);
        (age < self.validity).then(|| cached.snapshot.clone())
    }
}
