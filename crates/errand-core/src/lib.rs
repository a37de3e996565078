//! # errand-core — Foundational Types for the Errand Stack
//!
//! The bedrock crate of the Errand Stack. Defines the type-system primitives
//! every other crate builds on; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `ErrandId`, `UserId`,
//!    `DisputeId` — uuid-backed newtypes with typed constructors. No bare
//!    strings for identifiers.
//!
//! 2. **Integer money.** `Krw` wraps a whole number of won. Monetary values
//!    are never floats; every fee, penalty, and payout is exact integer
//!    arithmetic.
//!
//! 3. **UTC-only timestamps.** `Timestamp` enforces UTC with Z suffix at
//!    millisecond precision. Verification-code TTLs are measured in
//!    milliseconds, so the epoch-millis accessors are first class.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `errand-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod error;
pub mod identity;
pub mod money;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::CoreError;
pub use identity::{DisputeId, ErrandId, UserId};
pub use money::Krw;
pub use temporal::Timestamp;
