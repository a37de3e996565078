//! # In-Memory Store
//!
//! A `RwLock<HashMap>` repository. Snapshots are clones, so callers never
//! observe another writer's partial mutation.

use std::collections::HashMap;

use errand_core::ErrandId;
use errand_state::Errand;
use parking_lot::RwLock;

use crate::error::StoreError;
use crate::repository::ErrandRepository;

/// An in-memory errand repository.
#[derive(Debug, Default)]
pub struct MemoryStore {
    errands: RwLock<HashMap<ErrandId, Errand>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored errands.
    pub fn len(&self) -> usize {
        self.errands.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.errands.read().is_empty()
    }
}

impl ErrandRepository for MemoryStore {
    fn load(&self, id: ErrandId) -> Result<Option<Errand>, StoreError> {
        Ok(self.errands.read().get(&id).cloned())
    }

    fn save(&self, errand: &Errand) -> Result<(), StoreError> {
        self.errands.write().insert(errand.id, errand.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<Errand>, StoreError> {
        let mut all: Vec<Errand> = self.errands.read().values().cloned().collect();
        all.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(all)
    }
}
