//! Shared storage helpers for the reward pool contract suite.
//!
//! This crate provides:
//! - [`ttl`]: the TTL window every contract extends its entries by.
//! - [`whitelist`]: a write-once deposit allowlist kept in contract storage.

#![no_std]

pub mod ttl;
pub mod whitelist;
