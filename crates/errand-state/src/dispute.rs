//! # Dispute Side-Record
//!
//! A reported disagreement about an errand's outcome. A dispute is opened
//! by one of the parties and resolved by an admin into a final
//! done/cancelled decision; the decision is applied to the errand by
//! [`Errand::resolve_dispute`](crate::errand::Errand::resolve_dispute),
//! which reuses the ordinary settlement/cancellation paths.

use errand_core::{DisputeId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::errand::Party;

/// The state of a dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisputeStatus {
    /// Reported and awaiting an admin decision.
    Open,
    /// Decided by an admin. Terminal.
    Resolved,
}

impl DisputeStatus {
    /// The canonical string name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Resolved => "resolved",
        }
    }
}

/// The final outcome an admin resolves a dispute into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisputeOutcome {
    /// The errand counts as completed; the helper is paid.
    Done,
    /// The errand counts as cancelled; the penalty rule applies.
    Cancelled,
}

impl DisputeOutcome {
    /// The canonical string name of this outcome.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for DisputeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The admin decision closing a dispute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputeResolution {
    /// The decided outcome.
    pub outcome: DisputeOutcome,
    /// Who decided.
    pub resolver: Party,
    /// When the decision was made.
    pub resolved_at: Timestamp,
}

/// A dispute raised against an errand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dispute {
    /// Unique dispute identifier.
    pub id: DisputeId,
    /// Open or resolved.
    pub status: DisputeStatus,
    /// Who reported the dispute.
    pub reporter: Party,
    /// What the disagreement is about.
    pub reason: String,
    /// When the dispute was reported.
    pub opened_at: Timestamp,
    /// The decision, present once resolved.
    pub resolution: Option<DisputeResolution>,
}

impl Dispute {
    /// Open a new dispute.
    pub fn open(reporter: Party, reason: impl Into<String>) -> Self {
        Self {
            id: DisputeId::new(),
            status: DisputeStatus::Open,
            reporter,
            reason: reason.into(),
            opened_at: Timestamp::now(),
            resolution: None,
        }
    }

    /// Record the admin decision and mark the dispute resolved.
    ///
    /// Idempotence and open/resolved checking belong to the owning errand;
    /// this only writes the decision.
    pub(crate) fn resolve(&mut self, resolver: Party, outcome: DisputeOutcome) {
        self.status = DisputeStatus::Resolved;
        self.resolution = Some(DisputeResolution {
            outcome,
            resolver,
            resolved_at: Timestamp::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_dispute_has_no_resolution() {
        let d = Dispute::open(Party::guest("jiyoung"), "helper no-show");
        assert_eq!(d.status, DisputeStatus::Open);
        assert!(d.resolution.is_none());
        assert_eq!(d.reason, "helper no-show");
    }

    #[test]
    fn test_resolve_records_decision() {
        let mut d = Dispute::open(Party::guest("jiyoung"), "helper no-show");
        d.resolve(Party::guest("ops-admin"), DisputeOutcome::Cancelled);
        assert_eq!(d.status, DisputeStatus::Resolved);
        let r = d.resolution.unwrap();
        assert_eq!(r.outcome, DisputeOutcome::Cancelled);
        assert_eq!(r.resolver.name, "ops-admin");
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut d = Dispute::open(Party::guest("minsu"), "payment contested");
        d.resolve(Party::guest("ops-admin"), DisputeOutcome::Done);
        let json = serde_json::to_string(&d).unwrap();
        let parsed: Dispute = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, d);
    }
}
