//! SteakHouse — Tiered Staking on Casper (Odra)
//!
//! A single-asset staking protocol built on a CEP-18 token:
//! - STEAK: fungible token; the staking contract holds staked funds in custody
//! - SteakHouse: stake ledger with tiered simple interest and a 24h
//!   withdrawal cooldown after each claim

#![cfg_attr(target_arch = "wasm32", no_std)]

extern crate alloc;

pub mod tokens;
pub mod steakhouse;
