use crate::model::Vehicle;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A point-in-time copy of the catalog: the vehicle list and the listing
/// counts of one generation, never mixed with another. Immutable once built;
/// a refresh replaces the whole snapshot.
#[derive(Debug)]
pub struct CatalogSnapshot {
    pub vehicles: Vec<Vehicle>,
    listing_counts: HashMap<String, u32>,
    pub loaded_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    pub fn new(vehicles: Vec<Vehicle>, listing_counts: HashMap<String, u32>) -> Self {
        Self {
            vehicles,
            listing_counts,
            loaded_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), HashMap::new())
    }

    /// Active listings referencing the vehicle; absent means 0.
    pub fn listing_count(&self, vehicle_id: &str) -> u32 {
        self.listing_counts.get(vehicle_id).copied().unwrap_or(0)
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    pub fn counted_vehicles(&self) -> usize {
        self.listing_counts.len()
    }
}

/// Process-wide holder of the current snapshot. Readers clone the `Arc` and
/// work lock-free on the immutable snapshot; `publish` swaps the reference,
/// so an in-flight match keeps observing the generation it started with.
pub struct CatalogStore {
    current: RwLock<Arc<CatalogSnapshot>>,
}

impl CatalogStore {
    /// Starts empty; the initial refresh publishes the first real snapshot.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(CatalogSnapshot::empty())),
        }
    }

    pub async fn current(&self) -> Arc<CatalogSnapshot> {
        self.current.read().await.clone()
    }

    pub async fn publish(&self, snapshot: CatalogSnapshot) {
        *self.current.write().await = Arc::new(snapshot);
    }
}
