//! # API Route Modules
//!
//! Route modules for the errand marketplace API surface:
//!
//! - `errands` — Errand lifecycle: posting, matching, start/complete/cancel,
//!   settlement payout.
//! - `disputes` — Dispute side-records and admin resolution.
//! - `reviews` — Post-completion ratings between the parties.
//! - `verification` — One-time contact verification codes.

pub mod disputes;
pub mod errands;
pub mod reviews;
pub mod verification;
