#![no_std]

pub mod config;
pub mod errors;
pub mod events;
pub mod nft;
pub mod position;
pub mod rewards;
mod storage;

use common::whitelist;
use soroban_sdk::{contract, contractimpl, token, vec, Address, Env, String, Vec, U256};

pub use config::{Nft1155Asset, PoolConfig, PoolLimits, StakingAsset, TimeWindow};
pub use errors::ContractError;
pub use position::Position;
pub use rewards::{PoolState, PRECISION};

use nft::{Nft1155Client, Nft721Client};

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct RewardPoolContract;

#[contractimpl]
impl RewardPoolContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Configure the pool. Every parameter is fixed for the pool's lifetime.
    ///
    /// * `window`          – start, end and withdraw-unlock timestamps.
    /// * `staking_assets`  – accepted stake, at most one asset per kind.
    /// * `reward_token`    – token paid out; may equal the staking token.
    /// * `share_per_unit`  – weight of one NFT unit in token-stake units.
    /// * `limits`          – pool and per-user caps, zero meaning unlimited.
    /// * `whitelist`       – depositors allowed in; empty admits everyone.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        name: String,
        window: TimeWindow,
        staking_assets: Vec<StakingAsset>,
        reward_token: Address,
        share_per_unit: i128,
        limits: PoolLimits,
        whitelist: Vec<Address>,
    ) -> Result<(), ContractError> {
        if storage::has_config(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        config::validate(&window, &staking_assets, share_per_unit, &limits)?;

        let decimals = token::Client::new(&env, &reward_token).decimals();
        let reward_token_unit = 10i128
            .checked_pow(decimals)
            .ok_or(ContractError::InvalidConfig)?;

        let config = PoolConfig {
            name: name.clone(),
            window: window.clone(),
            staking_assets,
            reward_token: reward_token.clone(),
            share_per_unit,
            limits,
            reward_token_unit,
        };
        storage::save_config(&env, &config);
        storage::save_state(&env, &PoolState::new(&env, &window));
        whitelist::init(&env, &whitelist);

        events::publish_initialized(
            &env,
            name,
            window.start_ts,
            window.end_ts,
            window.withdraw_enable_ts,
            reward_token,
        );

        Ok(())
    }

    // ── Reward pot ──────────────────────────────────────────────────────────

    /// Pull `amount` reward tokens from `funder` into the pot.
    ///
    /// The accumulator is settled at the old funding level first, so extra
    /// funding raises the reward rate from now on and never retroactively.
    pub fn add_rewards(env: Env, funder: Address, amount: i128) -> Result<(), ContractError> {
        funder.require_auth();
        let config = storage::load_config(&env)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let now = env.ledger().timestamp();
        if config.window.has_ended(now) {
            return Err(ContractError::PoolEnded);
        }

        let mut state = storage::load_state(&env)?;
        state.settle(&env, &config.window, now);
        state.add_reward(amount)?;
        storage::save_state(&env, &state);

        token::Client::new(&env, &config.reward_token).transfer(
            &funder,
            &env.current_contract_address(),
            &amount,
        );

        events::publish_rewards_added(&env, funder, amount, state.total_reward_added);

        Ok(())
    }

    /// Settle the accumulator up to the current ledger time.
    ///
    /// Views read the stored accumulator; call this first for values that
    /// reflect "now". Returns the new `last_issued_ts`.
    pub fn sync(env: Env) -> Result<u64, ContractError> {
        let config = storage::load_config(&env)?;
        let mut state = storage::load_state(&env)?;
        if state.settle(&env, &config.window, env.ledger().timestamp()) {
            storage::save_state(&env, &state);
        }
        Ok(state.last_issued_ts)
    }

    // ── Fungible stake ──────────────────────────────────────────────────────

    /// Deposit `amount` of the staking token.
    pub fn deposit_token(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        staker.require_auth();
        let (config, mut state, mut position) = Self::settle_for(&env, &staker)?;

        let token = config.token().ok_or(ContractError::UnsupportedAsset)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        Self::require_deposit_open(&env, &config, &staker)?;

        position.token_amount = position
            .token_amount
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        state.shift_tokens(amount)?;
        state.shift_weight(amount)?;
        Self::commit(&env, &config, &state, &staker, &position)?;

        token::Client::new(&env, &token).transfer(
            &staker,
            &env.current_contract_address(),
            &amount,
        );

        events::publish_token_deposited(&env, staker, amount, state.total_weighted_stake);

        Ok(())
    }

    /// Withdraw `amount` of the staking token.
    ///
    /// Reward earned so far stays credited to the position until claimed.
    pub fn withdraw_token(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        staker.require_auth();
        let (config, mut state, mut position) = Self::settle_for(&env, &staker)?;

        let token = config.token().ok_or(ContractError::UnsupportedAsset)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        Self::require_withdraw_enabled(&env, &config)?;
        if amount > position.token_amount {
            return Err(ContractError::WithdrawExceedsStake);
        }

        position.token_amount -= amount;
        state.shift_tokens(-amount)?;
        state.shift_weight(-amount)?;
        Self::commit(&env, &config, &state, &staker, &position)?;

        token::Client::new(&env, &token).transfer(
            &env.current_contract_address(),
            &staker,
            &amount,
        );

        events::publish_token_withdrawn(&env, staker, amount, state.total_weighted_stake);

        Ok(())
    }

    // ── Per-id NFT stake ────────────────────────────────────────────────────

    /// Deposit one NFT of the configured per-id collection.
    pub fn deposit_nft721(env: Env, staker: Address, token_id: u64) -> Result<(), ContractError> {
        Self::deposit_nft721_batch(env.clone(), staker, vec![&env, token_id])
    }

    /// Deposit several NFTs of the configured per-id collection at once.
    ///
    /// Limits are checked against the state after the whole batch, so a
    /// per-user unit minimum above one can be met in a single call.
    pub fn deposit_nft721_batch(
        env: Env,
        staker: Address,
        token_ids: Vec<u64>,
    ) -> Result<(), ContractError> {
        staker.require_auth();
        let (config, mut state, mut position) = Self::settle_for(&env, &staker)?;

        let collection = config.nft721().ok_or(ContractError::UnsupportedAsset)?;
        if token_ids.is_empty() {
            return Err(ContractError::InvalidAmount);
        }
        Self::require_deposit_open(&env, &config, &staker)?;

        let nft = Nft721Client::new(&env, &collection);
        for token_id in token_ids.iter() {
            if position.holds_nft721(token_id) || storage::staked_by(&env, token_id).is_some() {
                return Err(ContractError::AlreadyStaked);
            }
            if nft.owner_of(&token_id) != staker {
                return Err(ContractError::NotOwner);
            }
            position.nft721_ids.push_back(token_id);
        }

        let units = token_ids.len() as i128;
        state.shift_units(units)?;
        state.shift_weight(Self::unit_weight(&config, units)?)?;
        Self::commit(&env, &config, &state, &staker, &position)?;

        let pool = env.current_contract_address();
        for token_id in token_ids.iter() {
            storage::set_staked_by(&env, token_id, &staker);
            nft.transfer(&staker, &pool, &token_id);
        }

        events::publish_nft721_deposited(&env, staker, token_ids, state.total_weighted_stake);

        Ok(())
    }

    /// Withdraw one staked NFT of the per-id collection.
    pub fn withdraw_nft721(env: Env, staker: Address, token_id: u64) -> Result<(), ContractError> {
        Self::withdraw_nft721_batch(env.clone(), staker, vec![&env, token_id])
    }

    /// Withdraw several staked NFTs of the per-id collection at once.
    pub fn withdraw_nft721_batch(
        env: Env,
        staker: Address,
        token_ids: Vec<u64>,
    ) -> Result<(), ContractError> {
        staker.require_auth();
        let (config, mut state, mut position) = Self::settle_for(&env, &staker)?;

        let collection = config.nft721().ok_or(ContractError::UnsupportedAsset)?;
        if token_ids.is_empty() {
            return Err(ContractError::InvalidAmount);
        }
        Self::require_withdraw_enabled(&env, &config)?;

        for token_id in token_ids.iter() {
            if storage::staked_by(&env, token_id) != Some(staker.clone())
                || !position.remove_nft721(token_id)
            {
                return Err(ContractError::NotStaked);
            }
        }

        let units = token_ids.len() as i128;
        state.shift_units(-units)?;
        state.shift_weight(-Self::unit_weight(&config, units)?)?;
        Self::commit(&env, &config, &state, &staker, &position)?;

        let nft = Nft721Client::new(&env, &collection);
        let pool = env.current_contract_address();
        for token_id in token_ids.iter() {
            storage::clear_staked_by(&env, token_id);
            nft.transfer(&pool, &staker, &token_id);
        }

        events::publish_nft721_withdrawn(&env, staker, token_ids, state.total_weighted_stake);

        Ok(())
    }

    // ── Semi-fungible NFT stake ─────────────────────────────────────────────

    /// Deposit `amount` units of the configured semi-fungible token id.
    pub fn deposit_nft1155(
        env: Env,
        staker: Address,
        token_id: u64,
        amount: i128,
    ) -> Result<(), ContractError> {
        staker.require_auth();
        let (config, mut state, mut position) = Self::settle_for(&env, &staker)?;

        let asset = Self::require_nft1155(&config, token_id)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        Self::require_deposit_open(&env, &config, &staker)?;

        let sft = Nft1155Client::new(&env, &asset.contract);
        if sft.balance_of(&staker, &token_id) < amount {
            return Err(ContractError::NotOwner);
        }

        position.nft1155_amount = position
            .nft1155_amount
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        state.shift_units(amount)?;
        state.shift_weight(Self::unit_weight(&config, amount)?)?;
        Self::commit(&env, &config, &state, &staker, &position)?;

        sft.transfer(&staker, &env.current_contract_address(), &token_id, &amount);

        events::publish_nft1155_deposited(
            &env,
            staker,
            token_id,
            amount,
            state.total_weighted_stake,
        );

        Ok(())
    }

    /// Withdraw `amount` staked units of the semi-fungible token id.
    pub fn withdraw_nft1155(
        env: Env,
        staker: Address,
        token_id: u64,
        amount: i128,
    ) -> Result<(), ContractError> {
        staker.require_auth();
        let (config, mut state, mut position) = Self::settle_for(&env, &staker)?;

        let asset = Self::require_nft1155(&config, token_id)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        Self::require_withdraw_enabled(&env, &config)?;
        if amount > position.nft1155_amount {
            return Err(ContractError::WithdrawExceedsStake);
        }

        position.nft1155_amount -= amount;
        state.shift_units(-amount)?;
        state.shift_weight(-Self::unit_weight(&config, amount)?)?;
        Self::commit(&env, &config, &state, &staker, &position)?;

        Nft1155Client::new(&env, &asset.contract).transfer(
            &env.current_contract_address(),
            &staker,
            &token_id,
            &amount,
        );

        events::publish_nft1155_withdrawn(
            &env,
            staker,
            token_id,
            amount,
            state.total_weighted_stake,
        );

        Ok(())
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay out everything `staker` has earned up to now.
    ///
    /// Claiming nothing is not an error: the call settles and returns 0.
    pub fn claim_all_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        staker.require_auth();
        let (config, state, mut position) = Self::settle_for(&env, &staker)?;

        let amount = position.take_accrued()?;
        storage::save_state(&env, &state);
        storage::save_position(&env, &staker, &position);

        if amount <= 0 {
            return Ok(0);
        }

        token::Client::new(&env, &config.reward_token).transfer(
            &env.current_contract_address(),
            &staker,
            &amount,
        );

        events::publish_reward_claimed(&env, staker, amount, position.claimed);

        Ok(amount)
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_config(env: Env) -> Result<PoolConfig, ContractError> {
        storage::load_config(&env)
    }

    pub fn get_pool_state(env: Env) -> Result<PoolState, ContractError> {
        storage::load_state(&env)
    }

    /// Stored accumulator, scaled by [`PRECISION`].
    pub fn acc_reward_per_unit(env: Env) -> Result<U256, ContractError> {
        Ok(storage::load_state(&env)?.acc_reward_per_unit)
    }

    pub fn last_issued_ts(env: Env) -> Result<u64, ContractError> {
        Ok(storage::load_state(&env)?.last_issued_ts)
    }

    pub fn total_weighted_stake(env: Env) -> Result<i128, ContractError> {
        Ok(storage::load_state(&env)?.total_weighted_stake)
    }

    pub fn total_reward_added(env: Env) -> Result<i128, ContractError> {
        Ok(storage::load_state(&env)?.total_reward_added)
    }

    /// `10^decimals` of the reward token, for formatting amounts.
    pub fn reward_token_unit(env: Env) -> Result<i128, ContractError> {
        Ok(storage::load_config(&env)?.reward_token_unit)
    }

    /// Return the stored position; an empty one for unknown addresses.
    pub fn get_position(env: Env, staker: Address) -> Position {
        storage::load_position(&env, &staker)
    }

    pub fn weighted_stake_of(env: Env, staker: Address) -> Result<i128, ContractError> {
        let config = storage::load_config(&env)?;
        storage::load_position(&env, &staker).weighted_stake(config.share_per_unit)
    }

    /// Pending reward as of the last settlement, without settling.
    pub fn pending_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        let config = storage::load_config(&env)?;
        let state = storage::load_state(&env)?;
        storage::load_position(&env, &staker).pending(
            &env,
            config.share_per_unit,
            &state.acc_reward_per_unit,
        )
    }

    /// Pending reward as if the pool were settled at the current ledger time.
    /// Nothing is written.
    pub fn projected_pending_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        let config = storage::load_config(&env)?;
        let mut state = storage::load_state(&env)?;
        state.settle(&env, &config.window, env.ledger().timestamp());
        storage::load_position(&env, &staker).pending(
            &env,
            config.share_per_unit,
            &state.acc_reward_per_unit,
        )
    }

    /// Current holder of a staked per-id NFT.
    pub fn staked_by(env: Env, token_id: u64) -> Option<Address> {
        storage::staked_by(&env, token_id)
    }

    /// Whether `who` passes the deposit whitelist.
    pub fn is_whitelisted(env: Env, who: Address) -> bool {
        whitelist::is_allowed(&env, &who)
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::has_config(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Steps one and three of every stake mutation: settle the accumulator to
    /// now, then credit the caller's reward at their current weight.
    ///
    /// Nothing is written; the caller persists through [`Self::commit`].
    fn settle_for(
        env: &Env,
        staker: &Address,
    ) -> Result<(PoolConfig, PoolState, Position), ContractError> {
        let config = storage::load_config(env)?;
        let mut state = storage::load_state(env)?;
        state.settle(env, &config.window, env.ledger().timestamp());

        let mut position = storage::load_position(env, staker);
        position.checkpoint(env, config.share_per_unit, &state.acc_reward_per_unit)?;

        Ok((config, state, position))
    }

    /// Check limits on the post-mutation state, then persist it.
    fn commit(
        env: &Env,
        config: &PoolConfig,
        state: &PoolState,
        staker: &Address,
        position: &Position,
    ) -> Result<(), ContractError> {
        config.limits.check(state, position)?;
        storage::save_state(env, state);
        storage::save_position(env, staker, position);
        Ok(())
    }

    fn require_deposit_open(
        env: &Env,
        config: &PoolConfig,
        staker: &Address,
    ) -> Result<(), ContractError> {
        if !config.window.is_open(env.ledger().timestamp()) {
            return Err(ContractError::PoolNotOpen);
        }
        if !whitelist::is_allowed(env, staker) {
            return Err(ContractError::NotWhitelisted);
        }
        Ok(())
    }

    fn require_withdraw_enabled(env: &Env, config: &PoolConfig) -> Result<(), ContractError> {
        if !config.window.is_withdraw_enabled(env.ledger().timestamp()) {
            return Err(ContractError::WithdrawNotEnabled);
        }
        Ok(())
    }

    fn require_nft1155(config: &PoolConfig, token_id: u64) -> Result<Nft1155Asset, ContractError> {
        match config.nft1155() {
            Some(asset) if asset.token_id == token_id => Ok(asset),
            _ => Err(ContractError::UnsupportedAsset),
        }
    }

    fn unit_weight(config: &PoolConfig, units: i128) -> Result<i128, ContractError> {
        units
            .checked_mul(config.share_per_unit)
            .ok_or(ContractError::ArithmeticOverflow)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
