//! Store ↔ surface orchestration.
//!
//! # Responsibility
//! - Drive the load, insert, search and delete transitions that touch
//!   both the place store and the rendered marker set.
//! - Own the form submission boundary and its validation.
//!
//! # Invariants
//! - Every UI-triggered write goes through this controller; the surface
//!   never mutates the store directly.
//! - Search is single-flight per controller instance; a re-entrant call
//!   is dropped, not queued, and the flag is released on every exit.
//! - Load replaces the marker set wholesale; insert and search never
//!   clear and re-render it.

use crate::model::place::{Coordinates, Place, PlaceId};
use crate::repo::place_repo::{PlaceStore, RepoError, RepoResult};
use crate::sync::marker_index::{MarkerHandle, MarkerIndex};
use crate::sync::surface::{CoordinatePickListener, MapSurface, PlaceSink, UiEvent, UiNotifier};
use log::{debug, info};
use std::cell::Cell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Camera position shown before any place is loaded.
pub const DEFAULT_POSITION: Coordinates = Coordinates {
    latitude: 60.9827,
    longitude: 25.6612,
};
/// Zoom level for the initial camera position.
pub const DEFAULT_ZOOM: f32 = 12.0;
/// Zoom level when focusing a single place.
pub const FOCUS_ZOOM: f32 = 15.0;

/// Form submission failure.
///
/// Validation variants never reach the store; `Storage` wraps a failed
/// insert with the store untouched from the caller's perspective.
#[derive(Debug)]
pub enum SubmitError {
    EmptyName,
    MissingCoordinates,
    /// Coordinate text did not parse. The producing UI fills these
    /// fields programmatically, so this is defense-in-depth rather than
    /// an expected runtime condition.
    InvalidCoordinate,
    Storage(RepoError),
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "place name must not be empty"),
            Self::MissingCoordinates => write!(f, "no coordinates have been picked"),
            Self::InvalidCoordinate => write!(f, "coordinate text is not a valid number"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SubmitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for SubmitError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

/// Result of a search transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results were focused and highlighted.
    Applied { matches: usize },
    /// Nothing matched; the rendered set was left untouched.
    NoResults,
    /// A search was already in flight; this call was a no-op.
    Dropped,
    /// No surface is attached yet.
    Skipped,
}

/// Result of an interactive delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    /// The store had no row for the bound id; the rendered set was left
    /// unchanged.
    NotFound,
    /// The handle has no binding; nothing happened.
    UnknownMarker,
}

/// Releases the single-flight flag when the search scope exits,
/// including early `?` returns.
struct SearchGuard {
    flag: Rc<Cell<bool>>,
}

impl SearchGuard {
    fn acquire(flag: &Rc<Cell<bool>>) -> Option<Self> {
        if flag.get() {
            return None;
        }
        flag.set(true);
        Some(Self {
            flag: Rc::clone(flag),
        })
    }
}

impl Drop for SearchGuard {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// Orchestrates consistency between the place store, the marker index
/// and the rendering surface.
///
/// Single-threaded by design: storage calls block and no transition
/// yields mid-mutation, so the index and store are never observed
/// partially synchronized.
pub struct SyncController<R: PlaceStore, S: MapSurface, N: UiNotifier> {
    store: R,
    index: MarkerIndex,
    surface: Option<S>,
    notifier: N,
    pick_listener: Option<Box<dyn CoordinatePickListener>>,
    place_sink: Option<Box<dyn PlaceSink>>,
    searching: Rc<Cell<bool>>,
}

impl<R: PlaceStore, S: MapSurface, N: UiNotifier> SyncController<R, S, N> {
    pub fn new(store: R, notifier: N) -> Self {
        Self {
            store,
            index: MarkerIndex::new(),
            surface: None,
            notifier,
            pick_listener: None,
            place_sink: None,
            searching: Rc::new(Cell::new(false)),
        }
    }

    /// Wires the map-tap → form coordinate flow.
    pub fn set_coordinate_pick_listener(&mut self, listener: Box<dyn CoordinatePickListener>) {
        self.pick_listener = Some(listener);
    }

    /// Wires the save → form notification flow.
    pub fn set_place_sink(&mut self, sink: Box<dyn PlaceSink>) {
        self.place_sink = Some(sink);
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Number of currently bound markers.
    pub fn bound_markers(&self) -> usize {
        self.index.len()
    }

    /// Takes ownership of the ready surface, points the camera at the
    /// default position and loads the stored places.
    pub fn attach_surface(&mut self, mut surface: S) -> RepoResult<()> {
        surface.focus(DEFAULT_POSITION, DEFAULT_ZOOM);
        self.surface = Some(surface);
        self.refresh()
    }

    /// Load transition: replaces the rendered set with the store's
    /// current contents.
    ///
    /// Clears the index and the surface, renders every stored place in
    /// most-recent-first order and focuses the first one. An empty
    /// store still clears but skips the focus call. No-op until a
    /// surface is attached.
    pub fn refresh(&mut self) -> RepoResult<()> {
        let Some(surface) = self.surface.as_mut() else {
            debug!("event=refresh module=sync status=skipped reason=no_surface");
            return Ok(());
        };

        self.index.clear();
        surface.clear_markers();

        let places = self.store.list_places()?;
        for place in &places {
            let handle = surface.add_marker(place.position(), &place.name);
            self.index.bind(handle, place.id);
        }

        if let Some(most_recent) = places.first() {
            surface.focus(most_recent.position(), FOCUS_ZOOM);
        }

        info!("event=refresh module=sync status=ok markers={}", places.len());
        Ok(())
    }

    /// Insert transition: the form submission boundary.
    ///
    /// Validates, persists, then incrementally renders one marker and
    /// focuses it — never reloads the whole set. Rendering is silently
    /// skipped when no surface is attached; the insert still persists.
    pub fn submit_place(
        &mut self,
        name: &str,
        latitude_text: &str,
        longitude_text: &str,
    ) -> Result<Place, SubmitError> {
        let name = name.trim();
        if name.is_empty() {
            self.notifier.notify(UiEvent::NameRequired);
            return Err(SubmitError::EmptyName);
        }

        if latitude_text.trim().is_empty() || longitude_text.trim().is_empty() {
            self.notifier.notify(UiEvent::CoordinatesRequired);
            return Err(SubmitError::MissingCoordinates);
        }

        let (latitude, longitude) = match (
            latitude_text.trim().parse::<f64>(),
            longitude_text.trim().parse::<f64>(),
        ) {
            (Ok(latitude), Ok(longitude)) => (latitude, longitude),
            _ => {
                self.notifier.notify(UiEvent::InvalidCoordinate);
                return Err(SubmitError::InvalidCoordinate);
            }
        };

        let id = match self.store.insert_place(name, latitude, longitude) {
            Ok(id) => id,
            Err(err) => {
                self.notifier.notify(UiEvent::SaveFailed);
                return Err(SubmitError::Storage(err));
            }
        };

        let mut place = Place::new(name, latitude, longitude);
        place.id = id;

        self.place_saved(&place);
        Ok(place)
    }

    /// Renders and focuses one freshly persisted place.
    fn place_saved(&mut self, place: &Place) {
        if let Some(surface) = self.surface.as_mut() {
            let handle = surface.add_marker(place.position(), &place.name);
            self.index.bind(handle, place.id);
            surface.focus(place.position(), FOCUS_ZOOM);
        } else {
            debug!(
                "event=place_saved module=sync status=deferred reason=no_surface id={}",
                place.id
            );
        }

        if let Some(sink) = self.place_sink.as_mut() {
            sink.place_saved(place);
        }
        self.notifier.notify(UiEvent::PlaceSaved {
            name: place.name.clone(),
        });
        info!("event=place_saved module=sync status=ok id={}", place.id);
    }

    /// Search transition: focuses the first match and re-surfaces the
    /// callout of every already-rendered match.
    ///
    /// Single-flight: a call arriving while one is in progress returns
    /// [`SearchOutcome::Dropped`] without touching anything. The flag
    /// is released on every exit path, including storage errors.
    pub fn search(&mut self, query: &str) -> RepoResult<SearchOutcome> {
        if self.surface.is_none() {
            return Ok(SearchOutcome::Skipped);
        }

        let Some(_guard) = SearchGuard::acquire(&self.searching) else {
            debug!("event=search module=sync status=dropped reason=in_flight");
            return Ok(SearchOutcome::Dropped);
        };

        let places = self.store.search_places(query)?;
        if places.is_empty() {
            self.notifier.notify(UiEvent::NoResults {
                query: query.to_string(),
            });
            return Ok(SearchOutcome::NoResults);
        }

        if let Some(surface) = self.surface.as_mut() {
            surface.focus(places[0].position(), FOCUS_ZOOM);
            for place in &places {
                // Matches that are not currently rendered have no
                // callout to surface; skip them.
                if let Some(handle) = self.index.handle_for(place.id) {
                    surface.show_callout(handle);
                }
            }
        }

        let matches = places.len();
        self.notifier.notify(UiEvent::SearchFinished {
            query: query.to_string(),
            matches,
        });
        info!("event=search module=sync status=ok matches={matches}");
        Ok(SearchOutcome::Applied { matches })
    }

    /// Forwards a raw map tap to the coordinate pick listener.
    pub fn surface_tapped(&mut self, position: Coordinates) {
        if let Some(listener) = self.pick_listener.as_mut() {
            listener.coordinates_picked(position);
        }
    }

    /// A marker was tapped: surface its callout.
    pub fn marker_tapped(&mut self, handle: MarkerHandle) {
        if let Some(surface) = self.surface.as_mut() {
            surface.show_callout(handle);
        }
    }

    /// A callout was tapped. Returns the bound place id when there is
    /// one, so the embedding UI can run its confirmation dialog and
    /// then call [`Self::delete_confirmed`].
    pub fn callout_tapped(&self, handle: MarkerHandle) -> Option<PlaceId> {
        self.index.id_for(handle)
    }

    /// Delete transition, entered after the UI confirmed the deletion.
    ///
    /// The only deletion path wired to user interaction; the
    /// coordinate- and name-based store deletions are not reachable
    /// from here.
    pub fn delete_confirmed(&mut self, handle: MarkerHandle) -> RepoResult<DeleteOutcome> {
        let Some(id) = self.index.id_for(handle) else {
            debug!("event=delete module=sync status=skipped reason=unknown_marker");
            return Ok(DeleteOutcome::UnknownMarker);
        };

        let removed = self.store.delete_by_id(id)?;
        if removed == 0 {
            self.notifier.notify(UiEvent::RemoveFailed);
            return Ok(DeleteOutcome::NotFound);
        }

        if let Some(surface) = self.surface.as_mut() {
            surface.remove_marker(handle);
        }
        self.index.unbind(handle);
        self.notifier.notify(UiEvent::PlaceRemoved);
        info!("event=delete module=sync status=ok id={id}");
        Ok(DeleteOutcome::Removed)
    }
}
