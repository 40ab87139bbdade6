#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based state machine tests for the reward pool.
//!
//! Random sequences of deposits, withdrawals, claims and clock jumps are
//! replayed against a token pool. Rejected calls are expected (closed window,
//! over-withdrawal) and must leave no trace.
//!
//! Invariants checked after every step:
//! - Σ `weighted_stake_of` over all stakers equals `total_weighted_stake`
//! - The pool's stake-token balance equals `total_token_staked`
//! - Reward held by the pool plus everything claimed equals the funding
//! - Claimed plus stored pending reward never exceeds the funding
//! - `last_issued_ts` never moves backwards and never passes `end_ts`

use proptest::prelude::*;
use proptest_derive::Arbitrary;

use crate::support::{setup, Harness, END, START};

const STAKERS: usize = 4;
const FUNDING: i128 = 1_000_000_000;

#[derive(Arbitrary, Clone, Debug)]
enum Action {
    Deposit {
        #[proptest(strategy = "0usize..STAKERS")]
        who: usize,
        #[proptest(strategy = "1i128..1_000_000i128")]
        amount: i128,
    },
    Withdraw {
        #[proptest(strategy = "0usize..STAKERS")]
        who: usize,
        #[proptest(strategy = "1i128..1_000_000i128")]
        amount: i128,
    },
    Claim {
        #[proptest(strategy = "0usize..STAKERS")]
        who: usize,
    },
    Wait {
        #[proptest(strategy = "1u64..30u64")]
        seconds: u64,
    },
    Sync,
}

fn check_invariants(pool: &Harness, stakers: &[soroban_sdk::Address], last_issued: u64) -> u64 {
    let state = pool.client.get_pool_state();

    let weighted: i128 = stakers
        .iter()
        .map(|s| pool.client.weighted_stake_of(s))
        .sum();
    assert_eq!(weighted, state.total_weighted_stake);
    assert_eq!(pool.stake_balance(&pool.client.address), state.total_token_staked);

    let mut claimed = 0i128;
    let mut pending = 0i128;
    for staker in stakers {
        claimed += pool.client.get_position(staker).claimed;
        pending += pool.client.pending_rewards(staker);
    }
    assert_eq!(pool.reward_balance(&pool.client.address) + claimed, FUNDING);
    assert!(claimed + pending <= FUNDING);

    assert!(state.last_issued_ts >= last_issued);
    assert!(state.last_issued_ts <= END);
    state.last_issued_ts
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_random_operations_keep_books_balanced(
        actions in proptest::collection::vec(any::<Action>(), 1..40),
    ) {
        let pool = setup(FUNDING);
        let stakers: Vec<_> = (0..STAKERS).map(|_| pool.staker(1_000_000_000)).collect();

        pool.at(START);
        let mut last_issued = check_invariants(&pool, &stakers, START);

        for action in actions {
            match action {
                Action::Deposit { who, amount } => {
                    let _ = pool.client.try_deposit_token(&stakers[who], &amount);
                }
                Action::Withdraw { who, amount } => {
                    let _ = pool.client.try_withdraw_token(&stakers[who], &amount);
                }
                Action::Claim { who } => {
                    let before = pool.reward_balance(&stakers[who]);
                    let paid = pool.client.claim_all_rewards(&stakers[who]);
                    prop_assert!(paid >= 0);
                    prop_assert_eq!(pool.reward_balance(&stakers[who]), before + paid);
                }
                Action::Wait { seconds } => pool.at(pool.now() + seconds),
                Action::Sync => {
                    pool.client.sync();
                }
            }
            last_issued = check_invariants(&pool, &stakers, last_issued);
        }
    }

    /// Once the window has closed and everyone has claimed, every staker can
    /// exit in full and the pool holds no stake.
    #[test]
    fn prop_everyone_can_exit_after_close(
        actions in proptest::collection::vec(any::<Action>(), 1..30),
    ) {
        let pool = setup(FUNDING);
        let stakers: Vec<_> = (0..STAKERS).map(|_| pool.staker(1_000_000_000)).collect();

        pool.at(START);
        for action in actions {
            match action {
                Action::Deposit { who, amount } => {
                    let _ = pool.client.try_deposit_token(&stakers[who], &amount);
                }
                Action::Withdraw { who, amount } => {
                    let _ = pool.client.try_withdraw_token(&stakers[who], &amount);
                }
                Action::Wait { seconds } => pool.at(pool.now() + seconds),
                Action::Claim { .. } | Action::Sync => {}
            }
        }

        pool.at(END + 1);
        for staker in &stakers {
            pool.client.claim_all_rewards(staker);
            let staked = pool.client.get_position(staker).token_amount;
            if staked > 0 {
                pool.client.withdraw_token(staker, &staked);
            }
            prop_assert_eq!(pool.stake_balance(staker), 1_000_000_000);
        }
        prop_assert_eq!(pool.client.total_weighted_stake(), 0);
        prop_assert_eq!(pool.stake_balance(&pool.client.address), 0);
    }
}
