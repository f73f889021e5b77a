//! Store ↔ map synchronization layer.
//!
//! # Responsibility
//! - Keep the rendered marker set consistent with the place store.
//! - Mediate between external UI collaborators and the store; all
//!   writes triggered by the UI pass through [`SyncController`].
//!
//! # Invariants
//! - The store is the sole source of truth; the marker index is a
//!   derived cache rebuildable by replaying the store's contents.

pub mod controller;
pub mod marker_index;
pub mod surface;

pub use controller::{DeleteOutcome, SearchOutcome, SubmitError, SyncController};
pub use marker_index::{MarkerHandle, MarkerIndex};
pub use surface::{CoordinatePickListener, MapSurface, PlaceSink, UiEvent, UiNotifier};
