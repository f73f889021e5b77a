//! Capability contracts for the external UI collaborators.
//!
//! # Responsibility
//! - Define what the core calls on the rendering surface and what it
//!   reports back to the embedding UI.
//!
//! The widgets behind these traits (map view, toasts, form fields) live
//! outside the core; they are wired in by explicit composition at
//! startup.

use crate::model::place::{Coordinates, Place};
use crate::sync::marker_index::MarkerHandle;

/// Rendering surface capability consumed by the sync controller.
///
/// The surface owns marker lifetimes and assigns handles; the core
/// only ever refers to markers through the returned handles.
pub trait MapSurface {
    fn add_marker(&mut self, position: Coordinates, label: &str) -> MarkerHandle;
    fn remove_marker(&mut self, handle: MarkerHandle);
    fn clear_markers(&mut self);
    fn focus(&mut self, position: Coordinates, zoom: f32);
    fn show_callout(&mut self, handle: MarkerHandle);
}

/// Transient user-visible outcome of a controller transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Save rejected: the name field was empty.
    NameRequired,
    /// Save rejected: no coordinates have been picked yet.
    CoordinatesRequired,
    /// Save rejected: coordinate text did not parse as a number.
    InvalidCoordinate,
    PlaceSaved { name: String },
    SaveFailed,
    SearchFinished { query: String, matches: usize },
    NoResults { query: String },
    PlaceRemoved,
    RemoveFailed,
}

/// Notification sink for transient user-visible messages.
pub trait UiNotifier {
    fn notify(&mut self, event: UiEvent);
}

/// Receives the coordinates of a map tap, typically a form filling its
/// latitude/longitude fields.
pub trait CoordinatePickListener {
    fn coordinates_picked(&mut self, position: Coordinates);
}

/// Receives the persisted place after a successful save, typically a
/// form clearing its name field.
pub trait PlaceSink {
    fn place_saved(&mut self, place: &Place);
}
