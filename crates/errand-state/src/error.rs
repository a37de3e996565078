//! # Errand State Errors
//!
//! Structured errors for rejected lifecycle operations. Every variant names
//! enough context for the caller to build a user-facing message without
//! re-reading the record.

use errand_rules::ErrandStatus;
use thiserror::Error;

/// Errors raised by errand lifecycle operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrandError {
    /// The requested transition is not in the transition table.
    #[error("invalid errand transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status.
        from: ErrandStatus,
        /// Attempted target status.
        to: ErrandStatus,
    },

    /// The errand is done or cancelled and accepts no further transitions.
    #[error("errand {errand_id} is {status} and cannot transition")]
    Terminal {
        /// The errand identifier.
        errand_id: String,
        /// The terminal status.
        status: ErrandStatus,
    },

    /// Settlement was already marked paid.
    #[error("settlement for errand {errand_id} is already paid")]
    AlreadyPaid {
        /// The errand identifier.
        errand_id: String,
    },

    /// A dispute is already recorded for this errand.
    #[error("errand {errand_id} already has a dispute")]
    DisputeExists {
        /// The errand identifier.
        errand_id: String,
    },

    /// No dispute exists, or the dispute is already resolved.
    #[error("errand {errand_id} has no open dispute")]
    NoOpenDispute {
        /// The errand identifier.
        errand_id: String,
    },

    /// Disputes need a counterparty; an open errand has none.
    #[error("cannot open a dispute on errand {errand_id} while it is {status}")]
    DisputeNotAvailable {
        /// The errand identifier.
        errand_id: String,
        /// The status that disallows disputes.
        status: ErrandStatus,
    },

    /// Reviews are only accepted once the errand is terminal.
    #[error("cannot review errand {errand_id} while it is {status}")]
    ReviewNotAvailable {
        /// The errand identifier.
        errand_id: String,
        /// The non-terminal status.
        status: ErrandStatus,
    },

    /// Each (reviewer, target role) pair may review at most once.
    #[error("reviewer {reviewer} already reviewed the {target} on errand {errand_id}")]
    DuplicateReview {
        /// The errand identifier.
        errand_id: String,
        /// The reviewer's name.
        reviewer: String,
        /// The reviewed role.
        target: String,
    },

    /// Ratings are integers from 1 to 5.
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    /// The verification code was already consumed.
    #[error("verification code already used")]
    CodeAlreadyUsed,
}
