//! # Errand Lifecycle State Machine
//!
//! Models a posted errand from creation through matching, progress, and
//! either completion (settlement) or cancellation (penalty).
//!
//! ## States
//!
//! ```text
//! Open ──assign_helper()──▶ Matched ──start()──▶ InProgress ──complete()──▶ Done
//!   │                          │                     │
//!   └────────cancel()──────────┴──────cancel()───────┘──▶ Cancelled
//! ```
//!
//! ## Design Decision
//!
//! A validated enum with `Result`-returning transition methods, not
//! typestate. Errands are persisted and transmitted as JSON where the status
//! is not known at compile time, and `cancel()` must be callable from every
//! non-terminal state; a validated enum serializes directly via serde and
//! keeps cancellation as one method. Each transition appends to an
//! append-only log, and terminal states reject everything.
//!
//! Retried requests are tolerated: asking for the status the errand is
//! already in is an idempotent no-op, matching the transition table's
//! identity rule.

use errand_core::{ErrandId, Krw, Timestamp, UserId};
use errand_rules::{
    can_transition, cancellation_penalty, split_reward, CancellationOrigin, ErrandStatus,
    PenaltyLevel,
};
use serde::{Deserialize, Serialize};

use crate::dispute::{Dispute, DisputeOutcome, DisputeStatus};
use crate::error::ErrandError;
use crate::review::{Review, ReviewTarget};

// ─── Category ────────────────────────────────────────────────────────

/// What kind of task the errand is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrandCategory {
    /// Convenience-store runs.
    Convenience,
    /// Package or food delivery.
    Delivery,
    /// Bank errands.
    Bank,
    /// Civil/government office paperwork.
    CivicOffice,
    /// Anything else.
    Other,
}

impl ErrandCategory {
    /// The canonical string name of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Convenience => "convenience",
            Self::Delivery => "delivery",
            Self::Bank => "bank",
            Self::CivicOffice => "civic_office",
            Self::Other => "other",
        }
    }

    /// Parse a canonical category name.
    pub fn from_str_opt(s: &str) -> Option<ErrandCategory> {
        match s {
            "convenience" => Some(Self::Convenience),
            "delivery" => Some(Self::Delivery),
            "bank" => Some(Self::Bank),
            "civic_office" => Some(Self::CivicOffice),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for ErrandCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Parties ─────────────────────────────────────────────────────────

/// A participant on an errand: display name plus an optional account id
/// (guests post without one).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Display name.
    pub name: String,
    /// Registered account, if any.
    pub user_id: Option<UserId>,
}

impl Party {
    /// A party with a registered account.
    pub fn registered(name: impl Into<String>, user_id: UserId) -> Self {
        Self {
            name: name.into(),
            user_id: Some(user_id),
        }
    }

    /// A party identified by name only.
    pub fn guest(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            user_id: None,
        }
    }
}

// ─── Records ─────────────────────────────────────────────────────────

/// The fee/payout split recorded when an errand completes.
///
/// Present if and only if the errand is `Done`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRecord {
    /// The platform's cut.
    pub platform_fee: Krw,
    /// The helper's payout.
    pub helper_payout: Krw,
    /// Whether the payout has been disbursed.
    pub paid: bool,
    /// When the settlement was computed.
    pub settled_at: Timestamp,
}

/// The penalty decision recorded when an errand is cancelled.
///
/// Present if and only if the errand is `Cancelled`. Amounts are zero when
/// the cancellation happened from `Open`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationRecord {
    /// Severity of the penalty.
    pub level: PenaltyLevel,
    /// Amount charged to the requester.
    pub requester_penalty: Krw,
    /// Amount paid to the helper; mirrors the penalty when a helper was
    /// assigned.
    pub helper_compensation: Krw,
    /// Human-readable reason code.
    pub reason: String,
    /// When the cancellation was decided.
    pub decided_at: Timestamp,
}

/// Record of a single status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Status before the transition.
    pub from_status: ErrandStatus,
    /// Status after the transition.
    pub to_status: ErrandStatus,
    /// When the transition occurred.
    pub timestamp: Timestamp,
    /// Why the transition happened.
    pub reason: String,
}

// ─── The Errand ──────────────────────────────────────────────────────

/// A requested task with its full lifecycle history.
///
/// Created via [`Errand::post`], then advanced by transition methods that
/// enforce the transition table. Every transition is appended to
/// [`transitions`](Errand::transitions); the record is immutable once
/// terminal except for dispute resolution and reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Errand {
    /// Unique errand identifier.
    pub id: ErrandId,
    /// Short title shown in listings.
    pub title: String,
    /// Full task description.
    pub detail: String,
    /// Task category.
    pub category: ErrandCategory,
    /// Fixed reward in won.
    pub reward: Krw,
    /// The party who posted the errand.
    pub requester: Party,
    /// The helper, present once matched.
    pub helper: Option<Party>,
    /// Current lifecycle status.
    pub status: ErrandStatus,
    /// Settlement, present iff `Done`.
    pub settlement: Option<SettlementRecord>,
    /// Cancellation decision, present iff `Cancelled`.
    pub cancellation: Option<CancellationRecord>,
    /// Optional dispute side-record.
    pub dispute: Option<Dispute>,
    /// Reviews left by the parties, in submission order.
    pub reviews: Vec<Review>,
    /// When the errand was posted.
    pub created_at: Timestamp,
    /// When the record last changed.
    pub updated_at: Timestamp,
    /// Ordered log of all status transitions.
    pub transitions: Vec<TransitionRecord>,
}

impl Errand {
    /// Post a new errand in the `Open` status.
    pub fn post(
        title: impl Into<String>,
        detail: impl Into<String>,
        category: ErrandCategory,
        reward: Krw,
        requester: Party,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: ErrandId::new(),
            title: title.into(),
            detail: detail.into(),
            category,
            reward,
            requester,
            helper: None,
            status: ErrandStatus::Open,
            settlement: None,
            cancellation: None,
            dispute: None,
            reviews: Vec::new(),
            created_at: now,
            updated_at: now,
            transitions: Vec::new(),
        }
    }

    /// Match a helper to the errand (`Open` → `Matched`).
    pub fn assign_helper(&mut self, helper: Party) -> Result<(), ErrandError> {
        if self.require_transition(ErrandStatus::Matched)? {
            return Ok(());
        }
        self.helper = Some(helper);
        self.do_transition(ErrandStatus::Matched, "helper accepted the errand");
        Ok(())
    }

    /// Begin work (`Matched` → `InProgress`).
    pub fn start(&mut self) -> Result<(), ErrandError> {
        if self.require_transition(ErrandStatus::InProgress)? {
            return Ok(());
        }
        self.do_transition(ErrandStatus::InProgress, "helper started the errand");
        Ok(())
    }

    /// Complete the errand (`InProgress` → `Done`) and compute the
    /// settlement.
    ///
    /// The reward splits into a 10% platform fee (floored) and the helper
    /// payout; the split always sums exactly to the reward. The settlement
    /// starts unpaid.
    pub fn complete(&mut self) -> Result<(), ErrandError> {
        if self.require_transition(ErrandStatus::Done)? {
            return Ok(());
        }
        let split = split_reward(self.reward);
        let now = Timestamp::now();
        self.settlement = Some(SettlementRecord {
            platform_fee: split.platform_fee,
            helper_payout: split.helper_payout,
            paid: false,
            settled_at: now,
        });
        self.do_transition(ErrandStatus::Done, "completion approved by requester");
        Ok(())
    }

    /// Cancel the errand from any non-terminal status and compute the
    /// penalty decision.
    ///
    /// The penalty is parameterized by the status being exited: free from
    /// `Open`, 20% capped at 2 000 won from `Matched`, 30% capped at
    /// 3 000 won from `InProgress`. Helper compensation mirrors the penalty
    /// when a helper is assigned.
    pub fn cancel(&mut self) -> Result<(), ErrandError> {
        if self.require_transition(ErrandStatus::Cancelled)? {
            return Ok(());
        }
        // require_transition already rejected terminal statuses, so the
        // origin is always derivable here.
        let origin = CancellationOrigin::from_status(self.status)
            .ok_or(ErrandError::InvalidTransition {
                from: self.status,
                to: ErrandStatus::Cancelled,
            })?;
        let penalty = cancellation_penalty(origin, self.reward, self.helper.is_some());
        self.cancellation = Some(CancellationRecord {
            level: penalty.level,
            requester_penalty: penalty.requester_penalty,
            helper_compensation: penalty.helper_compensation,
            reason: penalty.reason.to_string(),
            decided_at: Timestamp::now(),
        });
        let reason = penalty.reason;
        self.do_transition(ErrandStatus::Cancelled, reason);
        Ok(())
    }

    /// Mark the settlement payout as disbursed.
    ///
    /// # Errors
    ///
    /// Fails unless the errand is `Done` with a pending settlement.
    pub fn mark_settlement_paid(&mut self) -> Result<(), ErrandError> {
        let id = self.id.to_string();
        match self.settlement.as_mut() {
            Some(settlement) if settlement.paid => Err(ErrandError::AlreadyPaid { errand_id: id }),
            Some(settlement) => {
                settlement.paid = true;
                self.updated_at = Timestamp::now();
                Ok(())
            }
            None => Err(ErrandError::InvalidTransition {
                from: self.status,
                to: ErrandStatus::Done,
            }),
        }
    }

    // ── Disputes ─────────────────────────────────────────────────────

    /// Open a dispute against the errand.
    ///
    /// Disputes need work to disagree about: they open from `InProgress`
    /// (e.g., a no-show) or `Done` (e.g., contested completion). At most one
    /// dispute per errand.
    pub fn open_dispute(
        &mut self,
        reporter: Party,
        reason: impl Into<String>,
    ) -> Result<&Dispute, ErrandError> {
        if self.dispute.is_some() {
            return Err(ErrandError::DisputeExists {
                errand_id: self.id.to_string(),
            });
        }
        if !matches!(self.status, ErrandStatus::InProgress | ErrandStatus::Done) {
            return Err(ErrandError::DisputeNotAvailable {
                errand_id: self.id.to_string(),
                status: self.status,
            });
        }
        self.updated_at = Timestamp::now();
        Ok(&*self.dispute.insert(Dispute::open(reporter, reason)))
    }

    /// Resolve the open dispute into a final done/cancelled outcome.
    ///
    /// When the errand is still `InProgress`, the resolution drives it to
    /// the decided terminal status through the ordinary completion or
    /// cancellation path, so settlements and penalties come from the same
    /// computations as undisputed errands. When the errand is already
    /// terminal, the recorded status decision stands and only the dispute
    /// is marked resolved.
    pub fn resolve_dispute(
        &mut self,
        resolver: Party,
        outcome: DisputeOutcome,
    ) -> Result<(), ErrandError> {
        match &self.dispute {
            Some(d) if d.status == DisputeStatus::Open => {}
            _ => {
                return Err(ErrandError::NoOpenDispute {
                    errand_id: self.id.to_string(),
                });
            }
        }

        if !self.status.is_terminal() {
            match outcome {
                DisputeOutcome::Done => self.complete()?,
                DisputeOutcome::Cancelled => self.cancel()?,
            }
        }

        if let Some(dispute) = self.dispute.as_mut() {
            dispute.resolve(resolver, outcome);
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    // ── Reviews ──────────────────────────────────────────────────────

    /// Add a review, once the errand is terminal.
    ///
    /// Ratings are 1–5; each (reviewer, target role) pair may review at
    /// most once.
    pub fn add_review(
        &mut self,
        reviewer: Party,
        target: ReviewTarget,
        rating: u8,
        comment: Option<String>,
    ) -> Result<(), ErrandError> {
        if !self.status.is_terminal() {
            return Err(ErrandError::ReviewNotAvailable {
                errand_id: self.id.to_string(),
                status: self.status,
            });
        }
        if !(1..=5).contains(&rating) {
            return Err(ErrandError::InvalidRating(rating));
        }
        if self
            .reviews
            .iter()
            .any(|r| r.reviewer.name == reviewer.name && r.target == target)
        {
            return Err(ErrandError::DuplicateReview {
                errand_id: self.id.to_string(),
                reviewer: reviewer.name,
                target: target.as_str().to_string(),
            });
        }
        self.reviews.push(Review {
            reviewer,
            target,
            rating,
            comment,
            submitted_at: Timestamp::now(),
        });
        self.updated_at = Timestamp::now();
        Ok(())
    }

    // ── Helpers ──────────────────────────────────────────────────────

    /// Whether the errand accepts no further status transitions.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Validate a requested transition against the transition table.
    ///
    /// Returns `Ok(true)` when the errand is already in the target status
    /// (idempotent retry, nothing to do), `Ok(false)` when the transition
    /// should proceed.
    fn require_transition(&self, to: ErrandStatus) -> Result<bool, ErrandError> {
        if self.status == to {
            return Ok(true);
        }
        if self.status.is_terminal() {
            return Err(ErrandError::Terminal {
                errand_id: self.id.to_string(),
                status: self.status,
            });
        }
        if !can_transition(self.status, to) {
            return Err(ErrandError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        Ok(false)
    }

    /// Record a status transition.
    fn do_transition(&mut self, to: ErrandStatus, reason: &str) {
        let now = Timestamp::now();
        self.transitions.push(TransitionRecord {
            from_status: self.status,
            to_status: to,
            timestamp: now,
            reason: reason.to_string(),
        });
        self.status = to;
        self.updated_at = now;
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
