//! # The Repository Trait
//!
//! Snapshot semantics: `load` returns an owned copy of one errand, the
//! caller mutates it through the state machine, and `save` writes the whole
//! record back. Serializing concurrent read-modify-write cycles is the
//! implementation's job; the domain types stay oblivious.

use errand_core::ErrandId;
use errand_state::Errand;

use crate::error::StoreError;

/// Load/save access to stored errands.
pub trait ErrandRepository: Send + Sync {
    /// Load a snapshot of one errand, if it exists.
    fn load(&self, id: ErrandId) -> Result<Option<Errand>, StoreError>;

    /// Persist an errand, inserting or replacing by id.
    fn save(&self, errand: &Errand) -> Result<(), StoreError>;

    /// Snapshots of all stored errands, most recently updated first.
    fn list(&self) -> Result<Vec<Errand>, StoreError>;
}
