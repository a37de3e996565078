//! # Settlement Split
//!
//! When an errand is marked done, the reward splits into a platform fee and
//! a helper payout. The fee is 10% of the reward, floored to whole won; the
//! payout is whatever remains, so the two parts always sum exactly to the
//! original reward with no rounding leakage.

use errand_core::Krw;
use serde::{Deserialize, Serialize};

/// Platform fee, as a whole percentage of the reward.
pub const PLATFORM_FEE_PERCENT: u64 = 10;

/// The fee/payout split of a completed errand's reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementSplit {
    /// The platform's cut: `floor(reward × 10%)`.
    pub platform_fee: Krw,
    /// The helper's payout: `reward − platform_fee`.
    pub helper_payout: Krw,
}

impl SettlementSplit {
    /// The reward the split was computed from.
    pub fn total(&self) -> Krw {
        self.platform_fee + self.helper_payout
    }
}

/// Split a reward into platform fee and helper payout.
///
/// `platform_fee = floor(reward × 10%)`, `helper_payout = reward − fee`.
/// The parts always sum exactly to `reward`.
pub fn split_reward(reward: Krw) -> SettlementSplit {
    // u128 intermediate so the percentage product cannot overflow.
    let platform_fee = Krw((reward.won() as u128 * PLATFORM_FEE_PERCENT as u128 / 100) as u64);
    SettlementSplit {
        platform_fee,
        helper_payout: reward.saturating_sub(platform_fee),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_round_reward() {
        let split = split_reward(Krw(10_000));
        assert_eq!(split.platform_fee, Krw(1_000));
        assert_eq!(split.helper_payout, Krw(9_000));
    }

    #[test]
    fn test_fee_floors_fractional_won() {
        // 10% of 9999 is 999.9; the fee floors to 999.
        let split = split_reward(Krw(9_999));
        assert_eq!(split.platform_fee, Krw(999));
        assert_eq!(split.helper_payout, Krw(9_000));
    }

    #[test]
    fn test_zero_reward() {
        let split = split_reward(Krw::ZERO);
        assert_eq!(split.platform_fee, Krw::ZERO);
        assert_eq!(split.helper_payout, Krw::ZERO);
    }

    #[test]
    fn test_tiny_rewards_take_no_fee() {
        // Below 10 won the floored fee is zero and the helper keeps it all.
        for won in 1..10 {
            let split = split_reward(Krw(won));
            assert_eq!(split.platform_fee, Krw::ZERO);
            assert_eq!(split.helper_payout, Krw(won));
        }
    }

    proptest! {
        #[test]
        fn prop_split_sums_to_reward(won in 0u64..=1_000_000_000) {
            let split = split_reward(Krw(won));
            prop_assert_eq!(split.platform_fee.won() + split.helper_payout.won(), won);
        }

        #[test]
        fn prop_fee_is_floored_ten_percent(won in 0u64..=1_000_000_000) {
            let split = split_reward(Krw(won));
            prop_assert_eq!(split.platform_fee.won(), won / 10);
        }
    }
}
