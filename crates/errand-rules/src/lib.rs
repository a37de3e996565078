//! # errand-rules — Marketplace Business Rules
//!
//! The single authoritative home for the errand marketplace's rule logic:
//!
//! - **Status** ([`status`]): the errand lifecycle enum and its fixed
//!   transition table.
//!
//! - **Settlement** ([`settlement`]): the platform-fee/helper-payout split
//!   computed when an errand completes.
//!
//! - **Penalty** ([`penalty`]): cancellation penalties and helper
//!   compensation, parameterized by the state the errand was cancelled from.
//!
//! - **Permission** ([`permission`]): the closed role × action matrix.
//!
//! - **Verification** ([`verification`]): one-time code TTL validity.
//!
//! ## Crate Policy
//!
//! Every function here is total, deterministic, and side-effect-free: no
//! clocks, no I/O, no shared state. Callers hand in a consistent snapshot
//! and get a definite value back; there is nothing to lock and nothing to
//! await. Surfacing rejected transitions or denied permissions as user-facing
//! errors is the caller's job.

pub mod penalty;
pub mod permission;
pub mod settlement;
pub mod status;
pub mod verification;

// Re-export primary types for ergonomic imports.
pub use penalty::{cancellation_penalty, CancellationOrigin, CancellationPenalty, PenaltyLevel};
pub use permission::{role_may, Action, Role};
pub use settlement::{split_reward, SettlementSplit, PLATFORM_FEE_PERCENT};
pub use status::{can_transition, ErrandStatus};
pub use verification::{is_code_valid, is_code_valid_at, DEFAULT_CODE_TTL_MS};
