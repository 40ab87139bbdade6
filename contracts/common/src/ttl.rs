//! Storage rent helpers shared by the pool contracts.
//!
//! Every contract in the workspace extends entries by the same window so a
//! position written once stays readable for the whole life of a pool.

use soroban_sdk::{Env, IntoVal, Val};

/// Remaining-ledger count below which an entry's TTL is bumped.
pub const TTL_THRESHOLD: u32 = 5_184_000;
/// Ledger count an entry is extended to when bumped.
pub const TTL_EXTEND_TO: u32 = 10_368_000;

/// Extends the TTL of the whole instance storage map.
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the TTL of a single persistent entry.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
