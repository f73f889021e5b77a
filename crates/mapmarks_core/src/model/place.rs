//! Place domain model.
//!
//! # Responsibility
//! - Define the persisted record for a named geographic point.
//! - Provide ordering and display helpers shared by UI boundaries.
//!
//! # Invariants
//! - `id` is store-assigned and never reused; `0` means "not yet persisted".
//! - `timestamp` is epoch milliseconds, assigned by the store at insert time.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::time::{SystemTime, UNIX_EPOCH};

/// Stable identifier for a persisted place.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// Ids come from the SQLite `AUTOINCREMENT` primary key and are strictly
/// increasing in insertion order.
pub type PlaceId = i64;

/// Sentinel id carried by a place that has not been persisted yet.
pub const UNSAVED_PLACE_ID: PlaceId = 0;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees, callers keep this within [-90, 90].
    pub latitude: f64,
    /// Longitude in degrees, callers keep this within [-180, 180].
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A saved named geographic point.
///
/// Coordinate ranges and name non-emptiness are the caller's contract;
/// the storage layer persists whatever it is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Store-assigned row id; [`UNSAVED_PLACE_ID`] before insertion.
    pub id: PlaceId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Creation time in epoch milliseconds. Provisional on unsaved
    /// instances; the store assigns the authoritative value at insert.
    pub timestamp: i64,
}

impl Place {
    /// Creates an unsaved place with a provisional timestamp.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: UNSAVED_PLACE_ID,
            name: name.into(),
            latitude,
            longitude,
            timestamp: now_millis(),
        }
    }

    pub fn position(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Returns whether this place has been persisted.
    pub fn is_saved(&self) -> bool {
        self.id != UNSAVED_PLACE_ID
    }

    /// One-line display form: `Name (lat, lng)` with six decimals.
    pub fn summary(&self) -> String {
        format!("{} ({:.6}, {:.6})", self.name, self.latitude, self.longitude)
    }

    /// Case-insensitive name ordering.
    ///
    /// Uses Unicode lowercasing; full locale-aware collation is out of
    /// scope for the core.
    pub fn compare_by_name(&self, other: &Place) -> Ordering {
        self.name.to_lowercase().cmp(&other.name.to_lowercase())
    }
}

/// Milliseconds since the Unix epoch, `0` if the clock reads before it.
pub(crate) fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
