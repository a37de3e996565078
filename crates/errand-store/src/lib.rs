//! # errand-store — Persistence Seam
//!
//! The rule and lifecycle crates never touch storage; they operate on a
//! consistent snapshot of one errand handed to them per invocation. This
//! crate owns the seam: a small repository trait plus two implementations.
//!
//! - **Memory** ([`memory`]): a `RwLock<HashMap>` store for tests and the
//!   API's default state.
//!
//! - **File** ([`file`]): a single JSON snapshot file, read and rewritten
//!   wholesale under a mutex. One process, one writer; the mutex serializes
//!   read-modify-write cycles and writes go through a temp file + rename so
//!   a crash never leaves a half-written snapshot.
//!
//! Swapping in real transactional storage later only means implementing
//! [`ErrandRepository`] again; nothing above this crate changes.

pub mod error;
pub mod file;
pub mod memory;
pub mod repository;

// Re-export primary types for ergonomic imports.
pub use error::StoreError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use repository::ErrandRepository;
