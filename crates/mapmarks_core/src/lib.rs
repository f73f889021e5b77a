//! Core domain logic for mapmarks: place persistence and marker
//! synchronization for a map UI.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod sync;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::place::{Coordinates, Place, PlaceId, UNSAVED_PLACE_ID};
pub use repo::place_repo::{
    PlaceStore, RepoError, RepoResult, SqlitePlaceRepository, COORDINATE_TOLERANCE,
};
pub use sync::controller::{DEFAULT_POSITION, DEFAULT_ZOOM, FOCUS_ZOOM};
pub use sync::{
    CoordinatePickListener, DeleteOutcome, MapSurface, MarkerHandle, MarkerIndex, PlaceSink,
    SearchOutcome, SubmitError, SyncController, UiEvent, UiNotifier,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
