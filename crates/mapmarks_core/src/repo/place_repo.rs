//! Place store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide durable CRUD over the `places` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `timestamp` is assigned here at insert time, never by callers.
//! - List and search results are ordered `timestamp DESC, id DESC` so
//!   the most recent place is always first and ties are deterministic.
//! - No name or coordinate validation happens at this layer; that is
//!   the form boundary's job.

use crate::db::DbError;
use crate::model::place::{now_millis, Place, PlaceId};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PLACE_SELECT_SQL: &str = "SELECT
    id,
    name,
    latitude,
    longitude,
    timestamp
FROM places";

/// Absolute per-axis tolerance, in degrees, used by coordinate deletion.
pub const COORDINATE_TOLERANCE: f64 = 1e-7;

// Coordinate matching snaps both sides to a grid of COORDINATE_TOLERANCE
// cells and accepts neighbors, so a pair exactly one tolerance apart in
// decimal still matches despite binary-float rounding.
const COORDINATE_GRID: f64 = 1e7;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for place persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Store interface for place CRUD operations.
///
/// Only `delete_by_id` is reachable from the interactive delete flow;
/// the coordinate and name deletions are retained as direct API for
/// compatibility and bulk cleanup.
pub trait PlaceStore {
    fn insert_place(&self, name: &str, latitude: f64, longitude: f64) -> RepoResult<PlaceId>;
    fn list_places(&self) -> RepoResult<Vec<Place>>;
    fn most_recent_place(&self) -> RepoResult<Option<Place>>;
    fn search_places(&self, query: &str) -> RepoResult<Vec<Place>>;
    fn delete_by_id(&self, id: PlaceId) -> RepoResult<usize>;
    fn delete_by_coordinates(&self, latitude: f64, longitude: f64) -> RepoResult<usize>;
    fn delete_by_name(&self, name: &str) -> RepoResult<usize>;
}

/// SQLite-backed place store.
pub struct SqlitePlaceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePlaceRepository<'conn> {
    /// Wraps a connection bootstrapped by [`crate::db::open_db`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PlaceStore for SqlitePlaceRepository<'_> {
    fn insert_place(&self, name: &str, latitude: f64, longitude: f64) -> RepoResult<PlaceId> {
        self.conn.execute(
            "INSERT INTO places (name, latitude, longitude, timestamp)
             VALUES (?1, ?2, ?3, ?4);",
            params![name, latitude, longitude, now_millis()],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list_places(&self) -> RepoResult<Vec<Place>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PLACE_SELECT_SQL} ORDER BY timestamp DESC, id DESC;"))?;

        let mut rows = stmt.query([])?;
        let mut places = Vec::new();
        while let Some(row) = rows.next()? {
            places.push(parse_place_row(row)?);
        }

        Ok(places)
    }

    fn most_recent_place(&self) -> RepoResult<Option<Place>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PLACE_SELECT_SQL} ORDER BY timestamp DESC, id DESC LIMIT 1;"
        ))?;

        let mut rows = stmt.query([])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_place_row(row)?));
        }

        Ok(None)
    }

    /// Substring match on `name`; the empty query matches every row.
    ///
    /// Case policy: ASCII case-insensitive (SQLite `LIKE` default).
    fn search_places(&self, query: &str) -> RepoResult<Vec<Place>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PLACE_SELECT_SQL}
             WHERE name LIKE ?1 ESCAPE '\\'
             ORDER BY timestamp DESC, id DESC;"
        ))?;

        let pattern = format!("%{}%", escape_like_term(query));
        let mut rows = stmt.query(params![pattern])?;
        let mut places = Vec::new();
        while let Some(row) = rows.next()? {
            places.push(parse_place_row(row)?);
        }

        Ok(places)
    }

    fn delete_by_id(&self, id: PlaceId) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM places WHERE id = ?1;", params![id])?;
        Ok(removed)
    }

    fn delete_by_coordinates(&self, latitude: f64, longitude: f64) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM places
             WHERE ABS(ROUND(latitude * ?3) - ROUND(?1 * ?3)) <= 1
               AND ABS(ROUND(longitude * ?3) - ROUND(?2 * ?3)) <= 1;",
            params![latitude, longitude, COORDINATE_GRID],
        )?;
        Ok(removed)
    }

    fn delete_by_name(&self, name: &str) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM places WHERE name = ?1;", params![name])?;
        Ok(removed)
    }
}

fn parse_place_row(row: &Row<'_>) -> RepoResult<Place> {
    Ok(Place {
        id: row.get("id")?,
        name: row.get("name")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        timestamp: row.get("timestamp")?,
    })
}

/// Escapes `LIKE` wildcards so user input matches literally.
fn escape_like_term(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
