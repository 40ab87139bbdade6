use common::ttl;
use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::config::PoolConfig;
use crate::errors::ContractError;
use crate::position::Position;
use crate::rewards::PoolState;

// ── Storage key constants ────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const STATE: Symbol = symbol_short!("STATE");

// Per-user and per-id persistent storage uses tuple keys: (prefix, id)
const POSITION: Symbol = symbol_short!("POS");
const STAKED_BY: Symbol = symbol_short!("STK_BY");

// ── Configuration ────────────────────────────────────────────────────────────

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub fn load_config(env: &Env) -> Result<PoolConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub fn save_config(env: &Env, config: &PoolConfig) {
    env.storage().instance().set(&CONFIG, config);
    ttl::extend_instance(env);
}

// ── Accumulator ──────────────────────────────────────────────────────────────

pub fn load_state(env: &Env) -> Result<PoolState, ContractError> {
    env.storage()
        .instance()
        .get(&STATE)
        .ok_or(ContractError::NotInitialized)
}

pub fn save_state(env: &Env, state: &PoolState) {
    env.storage().instance().set(&STATE, state);
    ttl::extend_instance(env);
}

// ── Positions ────────────────────────────────────────────────────────────────

/// Returns the stored position, or an empty one for a first-time staker.
pub fn load_position(env: &Env, staker: &Address) -> Position {
    env.storage()
        .persistent()
        .get(&(POSITION, staker.clone()))
        .unwrap_or_else(|| Position::new(env))
}

pub fn save_position(env: &Env, staker: &Address, position: &Position) {
    let key = (POSITION, staker.clone());
    env.storage().persistent().set(&key, position);
    ttl::extend_persistent(env, &key);
}

// ── NFT-721 custody ──────────────────────────────────────────────────────────

pub fn staked_by(env: &Env, token_id: u64) -> Option<Address> {
    env.storage().persistent().get(&(STAKED_BY, token_id))
}

pub fn set_staked_by(env: &Env, token_id: u64, staker: &Address) {
    let key = (STAKED_BY, token_id);
    env.storage().persistent().set(&key, staker);
    ttl::extend_persistent(env, &key);
}

pub fn clear_staked_by(env: &Env, token_id: u64) {
    env.storage().persistent().remove(&(STAKED_BY, token_id));
}
