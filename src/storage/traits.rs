use crate::model::{StorageError, Vehicle};
use std::collections::HashMap;

/// The refresh task's view of the catalog datastore. A refresh publishes a
/// new snapshot only when both fetches succeed.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, StorageError>;
    async fn fetch_listing_counts(&self) -> Result<HashMap<String, u32>, StorageError>;
}
