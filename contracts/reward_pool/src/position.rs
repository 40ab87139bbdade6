//! Per-participant position ledger.

use soroban_sdk::{contracttype, Env, Vec, U256};

use crate::errors::ContractError;
use crate::rewards;

/// A participant's stake and reward bookkeeping.
///
/// Created lazily on first deposit and never removed; a fully withdrawn
/// position keeps its `claimed` history with every balance at zero.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub token_amount: i128,
    /// Ids staked from the per-id collection.
    pub nft721_ids: Vec<u64>,
    /// Units staked from the semi-fungible id.
    pub nft1155_amount: i128,
    /// Accumulator value at the last settlement.
    pub acc_snapshot: U256,
    /// Reward credited at earlier settlements and not yet paid out.
    pub accrued: i128,
    /// Reward paid out so far.
    pub claimed: i128,
}

impl Position {
    pub fn new(env: &Env) -> Self {
        Position {
            token_amount: 0,
            nft721_ids: Vec::new(env),
            nft1155_amount: 0,
            acc_snapshot: U256::from_u32(env, 0),
            accrued: 0,
            claimed: 0,
        }
    }

    /// NFT units held across both non-fungible kinds.
    pub fn units(&self) -> i128 {
        (self.nft721_ids.len() as i128).saturating_add(self.nft1155_amount)
    }

    pub fn weighted_stake(&self, share_per_unit: i128) -> Result<i128, ContractError> {
        self.units()
            .checked_mul(share_per_unit)
            .and_then(|nft_weight| nft_weight.checked_add(self.token_amount))
            .ok_or(ContractError::ArithmeticOverflow)
    }

    /// Credited plus newly earned reward against `acc`.
    pub fn pending(
        &self,
        env: &Env,
        share_per_unit: i128,
        acc: &U256,
    ) -> Result<i128, ContractError> {
        let fresh = rewards::earned(
            env,
            self.weighted_stake(share_per_unit)?,
            acc,
            &self.acc_snapshot,
        )?;
        self.accrued
            .checked_add(fresh)
            .ok_or(ContractError::ArithmeticOverflow)
    }

    /// Credits everything earned at the current weight and re-snapshots.
    ///
    /// Must run before any change to the position's weight.
    pub fn checkpoint(
        &mut self,
        env: &Env,
        share_per_unit: i128,
        acc: &U256,
    ) -> Result<(), ContractError> {
        self.accrued = self.pending(env, share_per_unit, acc)?;
        self.acc_snapshot = acc.clone();
        Ok(())
    }

    /// Moves the credited reward into `claimed` and returns it.
    pub fn take_accrued(&mut self) -> Result<i128, ContractError> {
        let amount = self.accrued;
        self.claimed = self
            .claimed
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        self.accrued = 0;
        Ok(amount)
    }

    pub fn holds_nft721(&self, token_id: u64) -> bool {
        self.nft721_ids.contains(token_id)
    }

    /// Removes `token_id`, returning `false` if it was not held.
    pub fn remove_nft721(&mut self, token_id: u64) -> bool {
        match self.nft721_ids.first_index_of(token_id) {
            Some(index) => {
                self.nft721_ids.remove(index);
                true
            }
            None => false,
        }
    }
}
