//! Write-once pool configuration.
//!
//! Everything here is validated by [`validate`] inside `initialize` and never
//! modified afterwards.

use soroban_sdk::{contracttype, Address, String, Vec};

use crate::errors::ContractError;
use crate::position::Position;
use crate::rewards::PoolState;

// ── Types ────────────────────────────────────────────────────────────────────

/// The pool's lifetime, in ledger seconds.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TimeWindow {
    /// First second deposits are accepted and rewards start to accrue.
    pub start_ts: u64,
    /// First second after the pool; deposits close and accrual stops here.
    pub end_ts: u64,
    /// First second withdrawals are accepted. Equal to `end_ts` for a fully
    /// locked pool.
    pub withdraw_enable_ts: u64,
}

impl TimeWindow {
    pub fn duration(&self) -> u64 {
        self.end_ts.saturating_sub(self.start_ts)
    }

    /// `now ∈ [start_ts, end_ts)`.
    pub fn is_open(&self, now: u64) -> bool {
        now >= self.start_ts && now < self.end_ts
    }

    pub fn has_ended(&self, now: u64) -> bool {
        now >= self.end_ts
    }

    pub fn is_withdraw_enabled(&self, now: u64) -> bool {
        now >= self.withdraw_enable_ts
    }

    /// Clamps `now` into `[start_ts, end_ts]`.
    pub fn clamp(&self, now: u64) -> u64 {
        now.clamp(self.start_ts, self.end_ts)
    }
}

/// A single token id of a semi-fungible collection.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Nft1155Asset {
    pub contract: Address,
    pub token_id: u64,
}

/// An asset class the pool accepts as stake.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StakingAsset {
    /// A Soroban token contract; stake is counted by amount.
    Token(Address),
    /// A per-id collection; every staked id is one unit.
    Nft721(Address),
    /// One fixed id of a semi-fungible collection; stake is counted by amount.
    Nft1155(Nft1155Asset),
}

impl StakingAsset {
    fn kind(&self) -> u32 {
        match self {
            StakingAsset::Token(_) => 0,
            StakingAsset::Nft721(_) => 1,
            StakingAsset::Nft1155(_) => 2,
        }
    }

    fn is_non_fungible(&self) -> bool {
        !matches!(self, StakingAsset::Token(_))
    }
}

/// Caps checked after every stake mutation. Zero disables a cap.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolLimits {
    /// Upper bound on the pool's total weighted stake.
    pub max_total_stake: i128,
    /// Upper bound on NFT units staked across the pool.
    pub max_total_units: i128,
    /// Lower bound on a participant's non-zero token stake.
    pub min_user_stake: i128,
    /// Lower bound on a participant's non-zero NFT unit count.
    pub min_user_units: i128,
}

impl PoolLimits {
    pub fn unlimited() -> Self {
        PoolLimits {
            max_total_stake: 0,
            max_total_units: 0,
            min_user_stake: 0,
            min_user_units: 0,
        }
    }

    fn is_valid(&self) -> bool {
        self.max_total_stake >= 0
            && self.max_total_units >= 0
            && self.min_user_stake >= 0
            && self.min_user_units >= 0
    }

    /// Checks the post-mutation `state` and the caller's post-mutation
    /// `position` against every configured cap.
    ///
    /// User minimums only bind a non-zero balance so a full exit is always
    /// possible.
    pub fn check(&self, state: &PoolState, position: &Position) -> Result<(), ContractError> {
        if self.max_total_stake > 0 && state.total_weighted_stake > self.max_total_stake {
            return Err(ContractError::PoolLimitExceeded);
        }
        if self.max_total_units > 0 && state.total_units_staked > self.max_total_units {
            return Err(ContractError::PoolUnitLimitExceeded);
        }
        let token_amount = position.token_amount;
        if self.min_user_stake > 0 && token_amount > 0 && token_amount < self.min_user_stake {
            return Err(ContractError::UserMinimumNotMet);
        }
        let units = position.units();
        if self.min_user_units > 0 && units > 0 && units < self.min_user_units {
            return Err(ContractError::UserUnitMinimumNotMet);
        }
        Ok(())
    }
}

/// Stored configuration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    pub name: String,
    pub window: TimeWindow,
    pub staking_assets: Vec<StakingAsset>,
    pub reward_token: Address,
    /// Weight of one NFT unit, in the same fixed-point unit as token stake.
    pub share_per_unit: i128,
    pub limits: PoolLimits,
    /// `10^decimals` of the reward token.
    pub reward_token_unit: i128,
}

impl PoolConfig {
    pub fn token(&self) -> Option<Address> {
        self.staking_assets.iter().find_map(|asset| match asset {
            StakingAsset::Token(address) => Some(address),
            _ => None,
        })
    }

    pub fn nft721(&self) -> Option<Address> {
        self.staking_assets.iter().find_map(|asset| match asset {
            StakingAsset::Nft721(address) => Some(address),
            _ => None,
        })
    }

    pub fn nft1155(&self) -> Option<Nft1155Asset> {
        self.staking_assets.iter().find_map(|asset| match asset {
            StakingAsset::Nft1155(sft) => Some(sft),
            _ => None,
        })
    }
}

// ── Validation ───────────────────────────────────────────────────────────────

/// Rejects any construction parameter the pool cannot operate with.
pub fn validate(
    window: &TimeWindow,
    staking_assets: &Vec<StakingAsset>,
    share_per_unit: i128,
    limits: &PoolLimits,
) -> Result<(), ContractError> {
    if window.start_ts >= window.end_ts || window.withdraw_enable_ts > window.end_ts {
        return Err(ContractError::InvalidTimeWindow);
    }
    if staking_assets.is_empty() {
        return Err(ContractError::NoStakingAsset);
    }

    let mut seen = [false; 3];
    let mut non_fungible = false;
    for asset in staking_assets.iter() {
        let kind = asset.kind() as usize;
        if seen[kind] {
            return Err(ContractError::InvalidConfig);
        }
        seen[kind] = true;
        non_fungible |= asset.is_non_fungible();
    }

    if share_per_unit < 0 || (non_fungible && share_per_unit == 0) {
        return Err(ContractError::InvalidConfig);
    }
    if !limits.is_valid() {
        return Err(ContractError::InvalidConfig);
    }
    Ok(())
}
