//! # Money — Whole Won Amounts
//!
//! `Krw` wraps a non-negative whole number of Korean won. Rewards,
//! platform fees, penalties, and payouts are all integer won; there is no
//! sub-unit and no floating point anywhere in the money path.
//!
//! ## Security Invariant
//!
//! Monetary values must never be represented as floating-point numbers.
//! Percentage rules (fee, penalty) are computed with integer arithmetic in
//! the rules crate so that splits are exact and reproducible.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A non-negative amount in whole Korean won.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Krw(pub u64);

impl Krw {
    /// Zero won.
    pub const ZERO: Krw = Krw(0);

    /// Construct from a whole number of won.
    pub const fn from_won(won: u64) -> Self {
        Self(won)
    }

    /// The amount as a plain integer.
    pub const fn won(&self) -> u64 {
        self.0
    }

    /// Whether the amount is zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition.
    pub fn checked_add(self, other: Krw) -> Option<Krw> {
        self.0.checked_add(other.0).map(Krw)
    }

    /// Saturating subtraction. Won amounts never go negative.
    pub fn saturating_sub(self, other: Krw) -> Krw {
        Krw(self.0.saturating_sub(other.0))
    }

    /// The smaller of two amounts.
    pub fn min(self, other: Krw) -> Krw {
        Krw(self.0.min(other.0))
    }

    /// Parse from a decimal string of whole won (e.g., `"10000"`).
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        s.trim()
            .parse::<u64>()
            .map(Krw)
            .map_err(|e| CoreError::InvalidAmount(format!("{s:?}: {e}")))
    }
}

impl From<u64> for Krw {
    fn from(won: u64) -> Self {
        Krw(won)
    }
}

impl std::ops::Add for Krw {
    type Output = Krw;

    fn add(self, rhs: Krw) -> Krw {
        Krw(self.0 + rhs.0)
    }
}

impl std::fmt::Display for Krw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} KRW", self.0)
    }
}
