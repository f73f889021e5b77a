//! Bidirectional marker ↔ place index.
//!
//! # Responsibility
//! - Map rendered marker handles to place ids and back, scoped to the
//!   currently-displayed set.
//!
//! # Invariants
//! - At most one entry per handle and at most one per place id; `bind`
//!   evicts any stale binding for either key.
//! - The index is replaced wholesale (`clear`) when the visible set is
//!   replaced, never patched during a reload.

use crate::model::place::PlaceId;
use std::collections::HashMap;

/// Opaque reference to a marker rendered by the map surface.
///
/// The surface assigns the raw value; the core never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(u64);

impl MarkerHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// In-memory handle ↔ id mapping for the rendered marker set.
#[derive(Debug, Default)]
pub struct MarkerIndex {
    bindings: HashMap<MarkerHandle, PlaceId>,
}

impl MarkerIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the pair, overwriting any prior binding for the same
    /// handle and evicting any prior binding for the same id.
    pub fn bind(&mut self, handle: MarkerHandle, id: PlaceId) {
        self.bindings.retain(|_, bound| *bound != id);
        self.bindings.insert(handle, id);
    }

    pub fn id_for(&self, handle: MarkerHandle) -> Option<PlaceId> {
        self.bindings.get(&handle).copied()
    }

    /// Reverse lookup by linear scan; the rendered set stays small
    /// (tens to low hundreds of markers).
    pub fn handle_for(&self, id: PlaceId) -> Option<MarkerHandle> {
        self.bindings
            .iter()
            .find(|(_, bound)| **bound == id)
            .map(|(handle, _)| *handle)
    }

    /// Removes a single binding, returning the id it pointed at.
    pub fn unbind(&mut self, handle: MarkerHandle) -> Option<PlaceId> {
        self.bindings.remove(&handle)
    }

    /// Drops all bindings ahead of a full rebuild of the visible set.
    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
