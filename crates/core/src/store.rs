//! Persistence of road connections
//!
//! A store only ever sees `(origin, destination, distance)` triples: the
//! session loads all of them once at start-up and appends each connection
//! it accepts afterwards. The graph shape itself is never persisted.

use std::path::Path;

use rusqlite::{params, Connection};

use crate::error::Result;
use crate::graph::Edge;

/// Something that can load and append connection triples
pub trait EdgeStore {
    /// All persisted connections, oldest first
    fn load(&self) -> Result<Vec<Edge>>;

    /// Append one connection
    fn save(&mut self, edge: &Edge) -> Result<()>;
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS road_connections (
    origin TEXT NOT NULL,
    destination TEXT NOT NULL,
    distance INTEGER NOT NULL
)";

/// SQLite-backed [`EdgeStore`]
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create the database at `path`
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "Opened connection store");
        Self::with_connection(conn)
    }

    /// Open a throwaway database that lives as long as the store
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(SCHEMA, [])?;
        Ok(Self { conn })
    }
}

impl EdgeStore for SqliteStore {
    fn load(&self) -> Result<Vec<Edge>> {
        let mut stmt = self
            .conn
            .prepare("SELECT origin, destination, distance FROM road_connections ORDER BY rowid")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;

        let mut edges = Vec::new();
        for row in rows {
            let (origin, destination, distance) = row?;
            match u32::try_from(distance) {
                Ok(distance) => edges.push(Edge::new(origin, destination, distance)),
                Err(_) => tracing::warn!(
                    origin = %origin,
                    destination = %destination,
                    distance,
                    "Skipping stored connection with out-of-range distance"
                ),
            }
        }
        Ok(edges)
    }

    fn save(&mut self, edge: &Edge) -> Result<()> {
        self.conn.execute(
            "INSERT INTO road_connections (origin, destination, distance) VALUES (?1, ?2, ?3)",
            params![edge.origin, edge.destination, i64::from(edge.distance)],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load_preserves_order() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.save(&Edge::new("B", "C", 2)).unwrap();
        store.save(&Edge::new("A", "B", 1)).unwrap();

        assert_eq!(
            store.load().unwrap(),
            vec![Edge::new("B", "C", 2), Edge::new("A", "B", 1)]
        );
    }

    #[test]
    fn test_reopen_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("roads.db");

        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.save(&Edge::new("Mixco", "Villa Nueva", 21)).unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.load().unwrap(), vec![Edge::new("Mixco", "Villa Nueva", 21)]);
    }

    #[test]
    fn test_negative_distances_are_skipped() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO road_connections (origin, destination, distance) \
                 VALUES ('A', 'B', -4)",
                [],
            )
            .unwrap();
        store.save(&Edge::new("A", "C", 4)).unwrap();

        assert_eq!(store.load().unwrap(), vec![Edge::new("A", "C", 4)]);
    }
}
