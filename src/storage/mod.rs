// Storage module: the catalog source seam and its SQLite implementation.

pub mod sqlite;
pub mod traits;

pub use sqlite::SqliteCatalog;
pub use traits::CatalogSource;
