//! # Error Types — Shared Error Hierarchy
//!
//! Errors raised by the foundational types. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.
//!
//! State-machine and repository errors live in their own crates
//! (`errand-state`, `errand-store`); this crate only reports failures in
//! constructing or parsing the primitives it defines.

use thiserror::Error;

/// Errors from the foundational types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A timestamp string could not be parsed or violated the UTC-only rule.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A monetary amount string could not be parsed as whole won.
    #[error("invalid won amount: {0}")]
    InvalidAmount(String),

    /// An identifier string was not a valid UUID.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}
