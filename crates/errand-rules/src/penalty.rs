//! # Cancellation Penalty
//!
//! When a requester cancels an errand (or a no-show is recorded), the
//! penalty depends on how far the errand had progressed:
//!
//! - from **Open** — no penalty; nobody was committed yet.
//! - from **Matched** — 20% of the reward, capped at 2 000 won.
//! - from **InProgress** — 30% of the reward, capped at 3 000 won.
//!
//! The percentage product rounds half-up before capping. The caps protect
//! requesters of high-value errands from disproportionate penalties. When a
//! helper is assigned, the helper's compensation mirrors the requester's
//! penalty exactly; with no helper there is nobody to compensate.
//!
//! This module is the only place the penalty formula exists.

use errand_core::Krw;
use serde::{Deserialize, Serialize};

use crate::status::ErrandStatus;

/// Penalty cap for cancellation after matching.
pub const MATCHED_PENALTY_CAP: Krw = Krw(2_000);
/// Penalty cap for cancellation during progress.
pub const IN_PROGRESS_PENALTY_CAP: Krw = Krw(3_000);

/// The non-terminal status an errand was in immediately before cancellation.
///
/// A closed domain: cancellation from `Done` or `Cancelled` is not
/// representable, matching the transition table's terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancellationOrigin {
    /// Cancelled while still waiting for a helper.
    Open,
    /// Cancelled after a helper accepted.
    Matched,
    /// Cancelled (or no-show) while the errand was underway.
    InProgress,
}

impl CancellationOrigin {
    /// Derive the origin from a status, if that status permits cancellation.
    ///
    /// Returns `None` for terminal statuses.
    pub fn from_status(status: ErrandStatus) -> Option<CancellationOrigin> {
        match status {
            ErrandStatus::Open => Some(Self::Open),
            ErrandStatus::Matched => Some(Self::Matched),
            ErrandStatus::InProgress => Some(Self::InProgress),
            ErrandStatus::Done | ErrandStatus::Cancelled => None,
        }
    }
}

/// Severity of a cancellation penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyLevel {
    /// No penalty (cancelled before match).
    None,
    /// Capped percentage penalty (cancelled after match or during progress).
    Medium,
}

impl PenaltyLevel {
    /// The canonical string name of this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Medium => "medium",
        }
    }
}

/// The outcome of the penalty rule for one cancellation.
///
/// A computation result, not a stored record; persistence layers copy the
/// fields into their own serialized shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancellationPenalty {
    /// Severity of the penalty.
    pub level: PenaltyLevel,
    /// Amount charged to the requester.
    pub requester_penalty: Krw,
    /// Amount paid to the helper. Mirrors the penalty when a helper is
    /// assigned, zero otherwise.
    pub helper_compensation: Krw,
    /// Human-readable reason code.
    pub reason: &'static str,
}

/// Compute the cancellation penalty.
///
/// `origin` is the status the errand was in immediately before cancellation,
/// `reward` the errand's reward, `helper_assigned` whether a helper was
/// matched at cancellation time.
pub fn cancellation_penalty(
    origin: CancellationOrigin,
    reward: Krw,
    helper_assigned: bool,
) -> CancellationPenalty {
    let (level, penalty, reason) = match origin {
        CancellationOrigin::Open => (PenaltyLevel::None, Krw::ZERO, "cancelled before match"),
        CancellationOrigin::Matched => (
            PenaltyLevel::Medium,
            percent_round_half_up(reward, 20).min(MATCHED_PENALTY_CAP),
            "cancelled after match (medium penalty)",
        ),
        CancellationOrigin::InProgress => (
            PenaltyLevel::Medium,
            percent_round_half_up(reward, 30).min(IN_PROGRESS_PENALTY_CAP),
            "cancelled/no-show during progress (medium penalty)",
        ),
    };

    CancellationPenalty {
        level,
        requester_penalty: penalty,
        helper_compensation: if helper_assigned { penalty } else { Krw::ZERO },
        reason,
    }
}

/// `round_half_up(amount × percent / 100)` in exact integer arithmetic.
fn percent_round_half_up(amount: Krw, percent: u64) -> Krw {
    let product = amount.won() as u128 * percent as u128;
    Krw(((product + 50) / 100) as u64)
}
