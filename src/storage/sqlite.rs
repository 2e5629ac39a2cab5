use crate::model::{StorageError, Vehicle};
use crate::storage::CatalogSource;
use rusqlite::{Connection, Row};
use std::collections::HashMap;
use tokio::sync::Mutex;

pub struct SqliteCatalog {
    conn: Mutex<Connection>,
}

impl SqliteCatalog {
    /// Opens the catalog database and bootstraps the schema.
    pub fn new(db_path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path)?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS vehicles (
                id TEXT PRIMARY KEY,
                make TEXT NOT NULL,
                model TEXT NOT NULL,
                badge TEXT NOT NULL DEFAULT '',
                fuel_type TEXT NOT NULL DEFAULT '',
                transmission_type TEXT NOT NULL DEFAULT '',
                drive_type TEXT
            );

            CREATE TABLE IF NOT EXISTS listings (
                id TEXT PRIMARY KEY,
                vehicle_id TEXT NOT NULL
            );
            ",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn map_vehicle(row: &Row) -> Result<Vehicle, rusqlite::Error> {
        Ok(Vehicle {
            id: row.get(0)?,
            make: row.get(1)?,
            model: row.get(2)?,
            badge: row.get(3)?,
            fuel_type: row.get(4)?,
            transmission_type: row.get(5)?,
            drive_type: row.get(6)?,
        })
    }
}

#[async_trait::async_trait]
impl CatalogSource for SqliteCatalog {
    /// Ordered by id so catalog order, the final tie-break, is stable
    /// across refreshes.
    async fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, StorageError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, make, model, badge, fuel_type, transmission_type, drive_type
             FROM vehicles ORDER BY id",
        )?;

        let rows = stmt.query_map([], Self::map_vehicle)?;
        let mut vehicles = Vec::new();
        for vehicle in rows {
            vehicles.push(vehicle?);
        }

        Ok(vehicles)
    }

    async fn fetch_listing_counts(&self) -> Result<HashMap<String, u32>, StorageError> {
        let conn = self.conn.lock().await;
        let mut stmt =
            conn.prepare("SELECT vehicle_id, COUNT(*) FROM listings GROUP BY vehicle_id")?;

        let rows = stmt.query_map([], |row| {
            let vehicle_id: String = row.get(0)?;
            let count: u32 = row.get(1)?;
            Ok((vehicle_id, count))
        })?;

        let mut counts = HashMap::new();
        for row in rows {
            let (vehicle_id, count) = row?;
            counts.insert(vehicle_id, count);
        }

        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::params;

    fn seeded_catalog() -> (tempfile::TempDir, SqliteCatalog) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("catalog.db");
        let path = path.to_str().expect("utf-8 path");

        let catalog = SqliteCatalog::new(path).expect("open catalog");

        let conn = Connection::open(path).expect("open seed connection");
        conn.execute(
            "INSERT INTO vehicles VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params!["veh-1", "Volkswagen", "Golf", "GTI", "Petrol", "Manual", None::<String>],
        )
        .expect("seed vehicle");
        conn.execute(
            "INSERT INTO vehicles VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                "veh-2",
                "Toyota",
                "Kluger",
                "Grande",
                "Petrol",
                "Automatic",
                "Four Wheel Drive"
            ],
        )
        .expect("seed vehicle");
        for listing in ["l1", "l2", "l3"] {
            conn.execute(
                "INSERT INTO listings VALUES (?1, ?2)",
                params![listing, "veh-2"],
            )
            .expect("seed listing");
        }

        (dir, catalog)
    }

    #[tokio::test]
    async fn fetches_vehicles_in_id_order() {
        let (_dir, catalog) = seeded_catalog();

        let vehicles = catalog.fetch_vehicles().await.expect("fetch vehicles");
        assert_eq!(vehicles.len(), 2);
        assert_eq!(vehicles[0].id, "veh-1");
        assert_eq!(vehicles[0].drive_type, None);
        assert_eq!(vehicles[1].id, "veh-2");
        assert_eq!(vehicles[1].drive_type.as_deref(), Some("Four Wheel Drive"));
    }

    #[tokio::test]
    async fn groups_listing_counts_by_vehicle() {
        let (_dir, catalog) = seeded_catalog();

        let counts = catalog.fetch_listing_counts().await.expect("fetch counts");
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get("veh-2"), Some(&3));
        assert_eq!(counts.get("veh-1"), None);
    }
}
