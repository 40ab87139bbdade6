//! Client interfaces of the non-fungible collections the pool can custody.
//!
//! Transfers are authorized by `from` through `require_auth`, so a staker's
//! signature on the pool call covers moving the NFT into the pool and the
//! pool's own address covers moving it back out.

use soroban_sdk::{contractclient, Address, Env};

/// Per-id collection: every token id has exactly one owner.
#[contractclient(name = "Nft721Client")]
pub trait Nft721Interface {
    fn owner_of(env: Env, token_id: u64) -> Address;

    fn transfer(env: Env, from: Address, to: Address, token_id: u64);
}

/// Semi-fungible collection: every token id has a balance per owner.
#[contractclient(name = "Nft1155Client")]
pub trait Nft1155Interface {
    fn balance_of(env: Env, owner: Address, token_id: u64) -> i128;

    fn transfer(env: Env, from: Address, to: Address, token_id: u64, amount: i128);
}
