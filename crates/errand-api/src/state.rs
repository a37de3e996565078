//! # Application State
//!
//! Shared state for the Axum application: the injected errand repository
//! and the in-memory verification-code store.

use std::sync::Arc;

use dashmap::DashMap;
use errand_state::VerificationCode;
use errand_store::{ErrandRepository, MemoryStore};

/// Shared application state passed to all route handlers.
///
/// Cheap to clone; both fields are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The errand repository. Handlers load a snapshot, run the state
    /// machine, and save the result.
    pub store: Arc<dyn ErrandRepository>,
    /// Issued verification codes, keyed by contact address. Codes are
    /// short-lived; this store is intentionally process-local.
    pub codes: Arc<DashMap<String, VerificationCode>>,
}

impl AppState {
    /// Build state around an injected repository.
    pub fn new(store: Arc<dyn ErrandRepository>) -> Self {
        Self {
            store,
            codes: Arc::new(DashMap::new()),
        }
    }

    /// Build state over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }
}
