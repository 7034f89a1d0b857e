//! Profile domain model.
//!
//! # Responsibility
//! - Define the canonical shapes exchanged with the profile store.
//! - Own the per-kind field tables used for projection and validation.
//!
//! # Invariants
//! - Every entry is identified by an `EntryId` unique within its section.
//! - Section order is display order and is never re-sorted by a key.
//! - An entry only carries fields that belong to its section kind.

pub mod entry;
pub mod profile;
pub mod section;
