// Core structs: Vehicle, ExtractedAttributes, MatchResult
use serde::Serialize;

/// One distinct vehicle configuration in the catalog. `id` is opaque,
/// unique within a snapshot and stable across refreshes.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: String,
    pub make: String,
    pub model: String,
    pub badge: String,
    pub fuel_type: String,
    pub transmission_type: String,
    /// Canonical display form ("Four Wheel Drive"), `None` when unknown.
    pub drive_type: Option<String>,
}

/// Structured attributes recovered from a free-text description. Every
/// field may be absent; all present values are lower-cased except
/// `drive_type`, which carries the canonical display form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedAttributes {
    pub make: Option<String>,
    pub model: Option<String>,
    pub badge: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission_type: Option<String>,
    pub drive_type: Option<String>,
}

/// Outcome of matching: the winning vehicle (unset when the catalog is
/// empty) and the weighted score clamped to 0..=10.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub vehicle_id: Option<String>,
    pub confidence: u8,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("catalog source unavailable: {0}")]
    Unavailable(String),
}
