//! # Deposit allowlist
//!
//! A per-address membership set in persistent storage plus a single instance
//! flag recording whether the list is active at all. An inactive list admits
//! every address; this lets contracts treat "no whitelist configured" and
//! "address is whitelisted" uniformly through [`is_allowed`].
//!
//! The list is written once when the host contract is configured and only
//! consulted afterwards.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::ttl;

// ── Storage keys ─────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum WhitelistKey {
    Enabled,
    Member(Address),
}

// ── Public API ───────────────────────────────────────────────────────────────

/// Stores every address in `members` and activates the list.
///
/// An empty `members` leaves the list inactive. Duplicate entries are
/// harmless.
pub fn init(env: &Env, members: &Vec<Address>) {
    if members.is_empty() {
        return;
    }
    env.storage().instance().set(&WhitelistKey::Enabled, &true);
    for member in members.iter() {
        let key = WhitelistKey::Member(member);
        env.storage().persistent().set(&key, &true);
        ttl::extend_persistent(env, &key);
    }
}

/// Returns `true` when the list has been activated.
pub fn is_enabled(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&WhitelistKey::Enabled)
        .unwrap_or(false)
}

/// Returns `true` if `who` was stored as a member.
pub fn is_member(env: &Env, who: &Address) -> bool {
    let key = WhitelistKey::Member(who.clone());
    let member: bool = env.storage().persistent().get(&key).unwrap_or(false);
    if member {
        ttl::extend_persistent(env, &key);
    }
    member
}

/// Returns `true` if `who` may pass a whitelist gate: either the list is
/// inactive or `who` is a member.
pub fn is_allowed(env: &Env, who: &Address) -> bool {
    !is_enabled(env) || is_member(env, who)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
