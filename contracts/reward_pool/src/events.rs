#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, String, Vec};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the pool is configured.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub name: String,
    pub start_ts: u64,
    pub end_ts: u64,
    pub withdraw_enable_ts: u64,
    pub reward_token: Address,
    pub timestamp: u64,
}

/// Fired when the reward pot is funded.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsAddedEvent {
    pub funder: Address,
    pub amount: i128,
    pub total_reward_added: i128,
    pub timestamp: u64,
}

/// Fired when fungible stake is deposited or withdrawn.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenStakeEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_total_weighted_stake: i128,
    pub timestamp: u64,
}

/// Fired when per-id NFTs are deposited or withdrawn.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Nft721StakeEvent {
    pub staker: Address,
    pub token_ids: Vec<u64>,
    pub new_total_weighted_stake: i128,
    pub timestamp: u64,
}

/// Fired when semi-fungible units are deposited or withdrawn.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Nft1155StakeEvent {
    pub staker: Address,
    pub token_id: u64,
    pub amount: i128,
    pub new_total_weighted_stake: i128,
    pub timestamp: u64,
}

/// Fired when a staker claims rewards.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub staker: Address,
    pub amount: i128,
    pub claimed_total: i128,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    name: String,
    start_ts: u64,
    end_ts: u64,
    withdraw_enable_ts: u64,
    reward_token: Address,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            name,
            start_ts,
            end_ts,
            withdraw_enable_ts,
            reward_token,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_added(env: &Env, funder: Address, amount: i128, total_reward_added: i128) {
    env.events().publish(
        (symbol_short!("RWD_ADD"), funder.clone()),
        RewardsAddedEvent {
            funder,
            amount,
            total_reward_added,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_token_deposited(env: &Env, staker: Address, amount: i128, total_weighted: i128) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), staker.clone()),
        TokenStakeEvent {
            staker,
            amount,
            new_total_weighted_stake: total_weighted,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_token_withdrawn(env: &Env, staker: Address, amount: i128, total_weighted: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), staker.clone()),
        TokenStakeEvent {
            staker,
            amount,
            new_total_weighted_stake: total_weighted,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_nft721_deposited(
    env: &Env,
    staker: Address,
    token_ids: Vec<u64>,
    total_weighted: i128,
) {
    env.events().publish(
        (symbol_short!("NFT_DEP"), staker.clone()),
        Nft721StakeEvent {
            staker,
            token_ids,
            new_total_weighted_stake: total_weighted,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_nft721_withdrawn(
    env: &Env,
    staker: Address,
    token_ids: Vec<u64>,
    total_weighted: i128,
) {
    env.events().publish(
        (symbol_short!("NFT_WDR"), staker.clone()),
        Nft721StakeEvent {
            staker,
            token_ids,
            new_total_weighted_stake: total_weighted,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_nft1155_deposited(
    env: &Env,
    staker: Address,
    token_id: u64,
    amount: i128,
    total_weighted: i128,
) {
    env.events().publish(
        (symbol_short!("SFT_DEP"), staker.clone()),
        Nft1155StakeEvent {
            staker,
            token_id,
            amount,
            new_total_weighted_stake: total_weighted,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_nft1155_withdrawn(
    env: &Env,
    staker: Address,
    token_id: u64,
    amount: i128,
    total_weighted: i128,
) {
    env.events().publish(
        (symbol_short!("SFT_WDR"), staker.clone()),
        Nft1155StakeEvent {
            staker,
            token_id,
            amount,
            new_total_weighted_stake: total_weighted,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_claimed(env: &Env, staker: Address, amount: i128, claimed_total: i128) {
    env.events().publish(
        (symbol_short!("CLAIMED"), staker.clone()),
        RewardClaimedEvent {
            staker,
            amount,
            claimed_total,
            timestamp: env.ledger().timestamp(),
        },
    );
}
