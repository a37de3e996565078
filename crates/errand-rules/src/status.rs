//! # Errand Status — Lifecycle States and Transition Table
//!
//! The errand lifecycle moves forward only:
//!
//! ```text
//! Open ──▶ Matched ──▶ InProgress ──▶ Done (terminal)
//!   │         │             │
//!   └─────────┴─────────────┴──▶ Cancelled (terminal)
//! ```
//!
//! No transition re-enters a prior state. `Done` and `Cancelled` have no
//! outgoing edges — in particular, cancellation from `Done` is
//! unrepresentable by construction.

use serde::{Deserialize, Serialize};

/// The lifecycle state of an errand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrandStatus {
    /// Posted and waiting for a helper.
    Open,
    /// A helper has accepted the errand.
    Matched,
    /// The helper is carrying out the errand.
    InProgress,
    /// Completed and approved; settlement computed. Terminal state.
    Done,
    /// Cancelled; penalty computed from the state exited. Terminal state.
    Cancelled,
}

impl ErrandStatus {
    /// The canonical string name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Matched => "matched",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse a canonical status name.
    pub fn from_str_opt(s: &str) -> Option<ErrandStatus> {
        match s {
            "open" => Some(Self::Open),
            "matched" => Some(Self::Matched),
            "in_progress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Whether this status is terminal (no further transitions allowed).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Cancelled)
    }

    /// Valid target statuses from this status.
    pub fn valid_transitions(&self) -> &'static [ErrandStatus] {
        match self {
            Self::Open => &[Self::Matched, Self::Cancelled],
            Self::Matched => &[Self::InProgress, Self::Cancelled],
            Self::InProgress => &[Self::Done, Self::Cancelled],
            Self::Done | Self::Cancelled => &[],
        }
    }

    /// All statuses, in lifecycle order.
    pub fn all() -> &'static [ErrandStatus] {
        &[
            Self::Open,
            Self::Matched,
            Self::InProgress,
            Self::Done,
            Self::Cancelled,
        ]
    }
}

impl std::fmt::Display for ErrandStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the transition `from → to` is permitted.
///
/// Identity transitions are always permitted (an idempotent no-op for
/// retried requests). Otherwise `to` must appear in the fixed successor
/// set of `from`.
pub fn can_transition(from: ErrandStatus, to: ErrandStatus) -> bool {
    from == to || from.valid_transitions().contains(&to)
}
