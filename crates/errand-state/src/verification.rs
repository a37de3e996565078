//! # Verification Code Records
//!
//! An issued one-time code with its consumed flag. Expiry delegates to the
//! pure TTL rule in `errand-rules`; this record only tracks issuance time
//! and single use.

use errand_core::Timestamp;
use errand_rules::is_code_valid_at;
use serde::{Deserialize, Serialize};

use crate::error::ErrandError;

/// A one-time verification code issued to a contact address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// The code digits as issued.
    pub code: String,
    /// When the code was issued.
    pub issued_at: Timestamp,
    /// Whether the code has been consumed.
    pub used: bool,
}

impl VerificationCode {
    /// Issue a new code now.
    pub fn issue(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            issued_at: Timestamp::now(),
            used: false,
        }
    }

    /// Whether the code is still within its TTL at `checked_at`.
    ///
    /// `ttl_ms` defaults to the 3-minute rule when `None`. A consumed code
    /// is never valid.
    pub fn is_valid_at(&self, checked_at: Timestamp, ttl_ms: Option<i64>) -> bool {
        !self.used && is_code_valid_at(self.issued_at, checked_at, ttl_ms)
    }

    /// Consume the code.
    ///
    /// # Errors
    ///
    /// Returns [`ErrandError::CodeAlreadyUsed`] on a second consumption.
    pub fn consume(&mut self) -> Result<(), ErrandError> {
        if self.used {
            return Err(ErrandError::CodeAlreadyUsed);
        }
        self.used = true;
        Ok(())
    }
}
