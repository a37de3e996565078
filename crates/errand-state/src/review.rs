//! # Reviews
//!
//! Ratings the parties leave for each other once an errand reaches a
//! terminal status. The uniqueness rule — one review per (reviewer, target
//! role) — is enforced by the owning errand, which holds the collection.

use errand_core::Timestamp;
use serde::{Deserialize, Serialize};

use crate::errand::Party;

/// Which side of the errand a review is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewTarget {
    /// Reviewing the requester.
    Requester,
    /// Reviewing the helper.
    Helper,
}

impl ReviewTarget {
    /// The canonical string name of this target role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requester => "requester",
            Self::Helper => "helper",
        }
    }
}

impl std::fmt::Display for ReviewTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One review: a 1–5 rating with an optional comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Who wrote the review.
    pub reviewer: Party,
    /// Which role the review is about.
    pub target: ReviewTarget,
    /// Rating from 1 (worst) to 5 (best).
    pub rating: u8,
    /// Optional free-text comment.
    pub comment: Option<String>,
    /// When the review was submitted.
    pub submitted_at: Timestamp,
}
