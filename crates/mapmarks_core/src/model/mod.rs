//! Domain model for saved map places.
//!
//! # Responsibility
//! - Define the canonical record shape shared by storage and sync layers.
//!
//! # Invariants
//! - Every persisted place is identified by a stable numeric `PlaceId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod place;
