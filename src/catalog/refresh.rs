use crate::catalog::{CatalogSnapshot, CatalogStore};
use crate::model::StorageError;
use crate::storage::CatalogSource;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, sleep};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RefreshSummary {
    pub vehicles: usize,
    pub counted_vehicles: usize,
}

/// Rebuilds and publishes catalog snapshots. The periodic task and the
/// manual admin trigger both go through `refresh`; the guard mutex keeps
/// invocations from overlapping.
pub struct Refresher {
    source: Arc<dyn CatalogSource>,
    store: Arc<CatalogStore>,
    guard: Mutex<()>,
}

impl Refresher {
    pub fn new(source: Arc<dyn CatalogSource>, store: Arc<CatalogStore>) -> Self {
        Self {
            source,
            store,
            guard: Mutex::new(()),
        }
    }

    /// Fetches both catalog feeds and publishes them as one snapshot. A new
    /// snapshot is published only when both fetches succeed; on any failure
    /// the previously published snapshot stays live.
    pub async fn refresh(&self) -> Result<RefreshSummary, StorageError> {
        let _running = self.guard.lock().await;

        info!("Loading catalog snapshot...");
        let vehicles = self.source.fetch_vehicles().await?;
        let counts = self.source.fetch_listing_counts().await?;

        let summary = RefreshSummary {
            vehicles: vehicles.len(),
            counted_vehicles: counts.len(),
        };
        self.store.publish(CatalogSnapshot::new(vehicles, counts)).await;

        info!(
            "Catalog loaded: {} vehicles, counts for {} keys",
            summary.vehicles, summary.counted_vehicles
        );
        Ok(summary)
    }

    /// Spawns the fixed-interval refresh loop. Failures are logged and the
    /// previous snapshot remains authoritative until the next tick.
    pub fn spawn_periodic(refresher: Arc<Refresher>, interval_seconds: u64) {
        tokio::spawn(async move {
            loop {
                sleep(Duration::from_secs(interval_seconds)).await;
                info!("Timer triggered, refreshing catalog...");
                if let Err(e) = refresher.refresh().await {
                    warn!("Catalog refresh failed, keeping previous snapshot: {e}");
                }
            }
        });
    }
}
