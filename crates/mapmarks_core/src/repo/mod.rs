//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the place store contract consumed by the sync layer.
//! - Isolate SQLite query details from orchestration code.
//!
//! # Invariants
//! - Reads that find nothing return empty results, never errors.
//! - Mutations report storage failures as error values; a delete that
//!   matches nothing is a zero-count success.

pub mod place_repo;
