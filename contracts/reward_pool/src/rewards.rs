//! Shared reward accumulator.
//!
//! The pool distributes `total_reward_added` linearly over its window. For
//! every second with stake in the pool, each unit of weighted stake earns
//! `reward_rate / total_weighted_stake`; that running sum, scaled by
//! [`PRECISION`], is `acc_reward_per_unit`.
//!
//! ```text
//! Δacc = elapsed × total_reward_added × PRECISION / (duration × total_weighted_stake)
//! pending(position) = weight × (acc − snapshot) / PRECISION
//! ```
//!
//! All multiplications happen before the single division and every division
//! floors, so rounding only ever keeps dust in the pool.

use soroban_sdk::{contracttype, log, Env, U256};

use crate::config::TimeWindow;
use crate::errors::ContractError;

/// Fixed-point scale of `acc_reward_per_unit`.
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Global accounting state. One instance per pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    /// Σ over positions of `token_amount + units × share_per_unit`.
    pub total_weighted_stake: i128,
    /// Reward earned per unit of weighted stake since `start_ts`, scaled by
    /// [`PRECISION`]. Never decreases.
    pub acc_reward_per_unit: U256,
    /// Last second the accumulator was brought up to. Never decreases and
    /// never leaves `[start_ts, end_ts]`.
    pub last_issued_ts: u64,
    /// Cumulative reward funded into the pot.
    pub total_reward_added: i128,
    pub total_token_staked: i128,
    /// NFT units staked across both non-fungible kinds.
    pub total_units_staked: i128,
}

impl PoolState {
    pub fn new(env: &Env, window: &TimeWindow) -> Self {
        PoolState {
            total_weighted_stake: 0,
            acc_reward_per_unit: U256::from_u32(env, 0),
            last_issued_ts: window.start_ts,
            total_reward_added: 0,
            total_token_staked: 0,
            total_units_staked: 0,
        }
    }

    /// Brings the accumulator forward to `now`, clamped to the window.
    ///
    /// Seconds with no stake in the pool move `last_issued_ts` without
    /// growing the accumulator; their share of the reward is forfeited.
    /// Returns `true` if `last_issued_ts` moved.
    pub fn settle(&mut self, env: &Env, window: &TimeWindow, now: u64) -> bool {
        let effective_now = window.clamp(now);
        if effective_now <= self.last_issued_ts {
            return false;
        }

        let elapsed = effective_now - self.last_issued_ts;
        if self.total_weighted_stake > 0 && self.total_reward_added > 0 {
            let delta = accrual(
                env,
                elapsed,
                window.duration(),
                self.total_reward_added,
                self.total_weighted_stake,
            );
            self.acc_reward_per_unit = self.acc_reward_per_unit.add(&delta);
        }
        log!(env, "settle", self.last_issued_ts, effective_now, self.total_weighted_stake);
        self.last_issued_ts = effective_now;
        true
    }

    /// Adds `weight` to the weighted total, or subtracts it when negative.
    pub fn shift_weight(&mut self, weight: i128) -> Result<(), ContractError> {
        self.total_weighted_stake = checked_balance(self.total_weighted_stake, weight)?;
        Ok(())
    }

    pub fn shift_tokens(&mut self, amount: i128) -> Result<(), ContractError> {
        self.total_token_staked = checked_balance(self.total_token_staked, amount)?;
        Ok(())
    }

    pub fn shift_units(&mut self, units: i128) -> Result<(), ContractError> {
        self.total_units_staked = checked_balance(self.total_units_staked, units)?;
        Ok(())
    }

    pub fn add_reward(&mut self, amount: i128) -> Result<(), ContractError> {
        self.total_reward_added = self
            .total_reward_added
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        Ok(())
    }
}

/// `current + delta`, rejecting overflow and negative results.
fn checked_balance(current: i128, delta: i128) -> Result<i128, ContractError> {
    let next = current
        .checked_add(delta)
        .ok_or(ContractError::ArithmeticOverflow)?;
    if next < 0 {
        return Err(ContractError::ArithmeticOverflow);
    }
    Ok(next)
}

/// Accumulator growth for `elapsed` seconds at the current funding level.
///
/// Both amounts are non-negative by construction; the numerator is bounded
/// by `i128::MAX × u64::MAX × PRECISION`, well inside `U256`.
pub fn accrual(
    env: &Env,
    elapsed: u64,
    duration: u64,
    total_reward: i128,
    total_weighted_stake: i128,
) -> U256 {
    if duration == 0 || total_weighted_stake <= 0 || total_reward <= 0 {
        return U256::from_u32(env, 0);
    }
    let numerator = U256::from_u128(env, elapsed as u128)
        .mul(&to_u256(env, total_reward))
        .mul(&U256::from_u128(env, PRECISION));
    let denominator =
        U256::from_u128(env, duration as u128).mul(&to_u256(env, total_weighted_stake));
    numerator.div(&denominator)
}

/// Reward earned by `weight` units between `snapshot` and `acc`.
pub fn earned(
    env: &Env,
    weight: i128,
    acc: &U256,
    snapshot: &U256,
) -> Result<i128, ContractError> {
    if weight <= 0 || acc <= snapshot {
        return Ok(0);
    }
    let reward = to_u256(env, weight)
        .mul(&acc.sub(snapshot))
        .div(&U256::from_u128(env, PRECISION));
    reward
        .to_u128()
        .and_then(|value| i128::try_from(value).ok())
        .ok_or(ContractError::ArithmeticOverflow)
}

fn to_u256(env: &Env, value: i128) -> U256 {
    U256::from_u128(env, u128::try_from(value).unwrap_or(0))
}
