#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for reward accounting.
//!
//! Invariants tested:
//! - The pool never pays out more than it was funded with
//! - With stake present for the whole window, only rounding dust is left
//! - Equal stakes held over equal time earn equal rewards
//! - A staker's projected reward never decreases while time passes

use proptest::prelude::*;

use crate::support::{setup, END, START};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Staggered deposits starting at `START` distribute the whole pot, less
    /// at most one base unit per staker plus one for the accumulator.
    #[test]
    fn prop_payouts_bounded_by_funding(
        reward in 1i128..1_000_000_000_000i128,
        first in 1i128..1_000_000_000i128,
        later in proptest::collection::vec((1u64..100u64, 1i128..1_000_000_000i128), 0..5),
    ) {
        let pool = setup(reward);

        let mut deposits = vec![(0u64, first)];
        deposits.extend(later);
        deposits.sort_by_key(|(offset, _)| *offset);

        let mut stakers = Vec::new();
        for (offset, amount) in &deposits {
            let staker = pool.staker(*amount);
            pool.at(START + offset);
            pool.client.deposit_token(&staker, amount);
            stakers.push(staker);
        }

        pool.at(END + 1);
        let mut paid = 0i128;
        for staker in &stakers {
            paid += pool.client.claim_all_rewards(staker);
        }

        prop_assert!(paid <= reward, "paid {} out of {}", paid, reward);
        prop_assert!(
            reward - paid <= stakers.len() as i128 + 1,
            "dust {} exceeds bound for {} stakers",
            reward - paid,
            stakers.len()
        );
        prop_assert_eq!(pool.reward_balance(&pool.client.address), reward - paid);
    }

    /// Stakers depositing the same amount at the same time end up with the
    /// same reward, whenever they claim.
    #[test]
    fn prop_equal_stakes_equal_rewards(
        reward in 1i128..1_000_000_000_000i128,
        amount in 1i128..1_000_000_000i128,
        n_stakers in 2usize..=5usize,
        offset in 0u64..100u64,
    ) {
        let pool = setup(reward);
        let stakers: Vec<_> = (0..n_stakers).map(|_| pool.staker(amount)).collect();

        pool.at(START + offset);
        for staker in &stakers {
            pool.client.deposit_token(staker, &amount);
        }

        pool.at(END);
        let first = pool.client.claim_all_rewards(&stakers[0]);
        for staker in &stakers[1..] {
            prop_assert_eq!(pool.client.projected_pending_rewards(staker), first);
        }
    }

    /// The live projection only grows until the window closes, then freezes.
    #[test]
    fn prop_projection_is_monotonic(
        reward in 1i128..1_000_000_000_000i128,
        amount in 1i128..1_000_000_000i128,
        steps in proptest::collection::vec(1u64..20u64, 1..12),
    ) {
        let pool = setup(reward);
        let staker = pool.staker(amount);
        pool.at(START);
        pool.client.deposit_token(&staker, &amount);

        let mut last = 0i128;
        for step in steps {
            pool.at(pool.now() + step);
            let projected = pool.client.projected_pending_rewards(&staker);
            prop_assert!(projected >= last);
            prop_assert!(projected <= reward);
            last = projected;
        }

        pool.at(END + 1_000);
        let settled = pool.client.projected_pending_rewards(&staker);
        pool.at(END + 2_000);
        prop_assert_eq!(pool.client.projected_pending_rewards(&staker), settled);
    }
}
