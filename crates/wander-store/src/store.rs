//! SQLite store backing the cached lookups.

use anyhow::Result;
use rusqlite::{params, Connection};
use std::path::Path;

use crate::records::{EventRecord, LocationRecord, WeatherRecord};

/// SQLite store holding previously fetched lookups.
///
/// Rows are append-only. Nothing enforces uniqueness, so repeated misses
/// for the same key may leave duplicate rows behind.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS location (
                search_query TEXT NOT NULL,
                formatted_query TEXT NOT NULL,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL
            );

            CREATE TABLE IF NOT EXISTS weather (
                forecast TEXT NOT NULL,
                time TEXT NOT NULL,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL
            );

            CREATE TABLE IF NOT EXISTS events (
                link TEXT NOT NULL,
                name TEXT NOT NULL,
                event_date TEXT NOT NULL,
                summary TEXT,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_location_query ON location(search_query);
            CREATE INDEX IF NOT EXISTS idx_weather_coords ON weather(latitude, longitude);
            CREATE INDEX IF NOT EXISTS idx_events_coords ON events(latitude, longitude);
            "#,
        )?;
        Ok(())
    }

    /// Fetch the first stored location matching the search text.
    pub fn find_location(&self, search_query: &str) -> Result<Option<LocationRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT search_query, formatted_query, latitude, longitude FROM location WHERE search_query = ?1",
        )?;

        let mut rows = stmt.query(params![search_query])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Self::row_to_location(row)?))
        } else {
            Ok(None)
        }
    }

    /// Store a location lookup.
    pub fn insert_location(&self, record: &LocationRecord) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO location (search_query, formatted_query, latitude, longitude)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                record.search_query,
                record.formatted_query,
                record.latitude,
                record.longitude,
            ],
        )?;
        Ok(())
    }

    /// List every stored forecast entry for the coordinate pair.
    pub fn find_weather(&self, latitude: f64, longitude: f64) -> Result<Vec<WeatherRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT forecast, time, latitude, longitude FROM weather WHERE latitude = ?1 AND longitude = ?2",
        )?;

        let rows = stmt.query_map(params![latitude, longitude], Self::row_to_weather)?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Failed to read weather rows: {}", e))
    }

    /// Store one forecast entry.
    pub fn insert_weather(&self, record: &WeatherRecord) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO weather (forecast, time, latitude, longitude)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![record.forecast, record.time, record.latitude, record.longitude],
        )?;
        Ok(())
    }

    /// List every stored event for the coordinate pair.
    pub fn find_events(&self, latitude: f64, longitude: f64) -> Result<Vec<EventRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT link, name, event_date, summary, latitude, longitude FROM events WHERE latitude = ?1 AND longitude = ?2",
        )?;

        let rows = stmt.query_map(params![latitude, longitude], Self::row_to_event)?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Failed to read event rows: {}", e))
    }

    /// Store one event.
    pub fn insert_event(&self, record: &EventRecord) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO events (link, name, event_date, summary, latitude, longitude)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                record.link,
                record.name,
                record.event_date,
                record.summary,
                record.latitude,
                record.longitude,
            ],
        )?;
        Ok(())
    }

    fn row_to_location(row: &rusqlite::Row) -> rusqlite::Result<LocationRecord> {
        Ok(LocationRecord {
            search_query: row.get(0)?,
            formatted_query: row.get(1)?,
            latitude: row.get(2)?,
            longitude: row.get(3)?,
        })
    }

    fn row_to_weather(row: &rusqlite::Row) -> rusqlite::Result<WeatherRecord> {
        Ok(WeatherRecord {
            forecast: row.get(0)?,
            time: row.get(1)?,
            latitude: row.get(2)?,
            longitude: row.get(3)?,
        })
    }

    fn row_to_event(row: &rusqlite::Row) -> rusqlite::Result<EventRecord> {
        Ok(EventRecord {
            link: row.get(0)?,
            name: row.get(1)?,
            event_date: row.get(2)?,
            summary: row.get(3)?,
            latitude: row.get(4)?,
            longitude: row.get(5)?,
        })
    }
}
