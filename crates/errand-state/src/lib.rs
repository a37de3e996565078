//! # errand-state — The Errand Record and Its Lifecycle
//!
//! Implements the errand lifecycle as a validated-enum state machine:
//!
//! - **Errand** ([`errand`]): the record itself — posting, matching,
//!   progress, completion with settlement, cancellation with penalty, and an
//!   append-only transition log.
//!
//! - **Dispute** ([`dispute`]): the optional side-record opened against an
//!   errand and resolved by an admin into a final done/cancelled outcome.
//!
//! - **Review** ([`review`]): ratings left by the parties once an errand is
//!   terminal, at most one per (reviewer, target role) pair.
//!
//! - **Verification** ([`verification`]): issued one-time codes with a
//!   consumed flag; validity delegates to the pure TTL rule.
//!
//! ## Design
//!
//! Transitions are methods that check the fixed transition table and return
//! `Result` — invalid transitions are rejected with structured errors naming
//! the current status and the attempted target. All money arithmetic lives in
//! `errand-rules`; this crate only decides *when* to apply each rule and
//! records the outcome.

pub mod dispute;
pub mod errand;
pub mod error;
pub mod review;
pub mod verification;

// Re-export primary types for ergonomic imports.
pub use dispute::{Dispute, DisputeOutcome, DisputeResolution, DisputeStatus};
pub use errand::{
    CancellationRecord, Errand, ErrandCategory, Party, SettlementRecord, TransitionRecord,
};
pub use error::ErrandError;
pub use review::{Review, ReviewTarget};
pub use verification::VerificationCode;
