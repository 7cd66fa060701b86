//! Livenet deploy and demo binary for SteakHouse staking.
//!
//! Run with:
//! - Deploy only:       STEAKHOUSE_LIVENET_MODE=deploy cargo run --bin steakhouse_livenet --features=livenet
//! - Deploy + demo:     STEAKHOUSE_LIVENET_MODE=deploy_and_demo cargo run --bin steakhouse_livenet --features=livenet
//! - Demo on existing:  STEAKHOUSE_LIVENET_MODE=demo STEAKHOUSE_EXISTING_STAKING=... STEAKHOUSE_EXISTING_TOKEN=... cargo run ...
//! - Withdraw:          STEAKHOUSE_LIVENET_MODE=withdraw STEAKHOUSE_EXISTING_STAKING=... STEAKHOUSE_EXISTING_TOKEN=... cargo run ...
//!
//! Required environment variables (Odra livenet):
//! - ODRA_CASPER_LIVENET_SECRET_KEY_PATH
//! - ODRA_CASPER_LIVENET_NODE_ADDRESS        (base URL; Odra appends "/rpc")
//! - ODRA_CASPER_LIVENET_EVENTS_URL          (required by Odra; placeholder URL is OK here)
//! - ODRA_CASPER_LIVENET_CHAIN_NAME
//!
//! Optional:
//! - ODRA_CASPER_LIVENET_DEPLOY_GAS_TOKEN    (motes)
//! - ODRA_CASPER_LIVENET_DEPLOY_GAS_STAKING  (motes)
//! - ODRA_CASPER_LIVENET_CALL_GAS            (motes)
//! - ODRA_CASPER_LIVENET_GAS                 (legacy fallback; motes)
//! - STEAKHOUSE_INITIAL_SUPPLY_STEAK         (whole tokens; default: 2000)
//! - STEAKHOUSE_DEMO_STAKE_STEAK             (whole tokens; default: 100)
//! - STEAKHOUSE_EXISTING_TOKEN               (64-hex or formatted "hash-..."/"contract-package-...")
//! - STEAKHOUSE_EXISTING_STAKING             (64-hex or formatted "hash-..."/"contract-package-...")

use odra::host::{Deployer, HostRef, HostRefLoader};
use odra::prelude::*;
use odra::casper_types::U256;

use steakhouse_casper::steakhouse::{SteakHouse, SteakHouseHostRef, SteakHouseInitArgs};
use steakhouse_casper::tokens::{SteakToken, SteakTokenHostRef, SteakTokenInitArgs};

/// 1 STEAK = 1e18
const WAD: u128 = 1_000_000_000_000_000_000;

const DEFAULT_DEPLOY_GAS_TOKEN_MOTES: u64 = 450_000_000_000; // 450 CSPR
const DEFAULT_DEPLOY_GAS_STAKING_MOTES: u64 = 600_000_000_000; // 600 CSPR
const DEFAULT_CALL_GAS_MOTES: u64 = 50_000_000_000; // 50 CSPR
const MOTES_PER_CSPR: u64 = 1_000_000_000;

/// Whole STEAK to 18-decimal units
fn steak(amount: u64) -> U256 {
    U256::from(amount) * U256::from(WAD)
}

fn main() {
    println!("============================================");
    println!("  SteakHouse Staking — Livenet");
    println!("============================================\n");

    let env = odra_casper_livenet_env::env();

    let mode = std::env::var("STEAKHOUSE_LIVENET_MODE").unwrap_or_else(|_| "deploy".to_string());
    let should_deploy = mode == "deploy" || mode == "deploy_and_demo";
    let should_demo = mode == "demo" || mode == "deploy_and_demo";
    let should_withdraw = mode == "withdraw";

    let gas_fallback = read_u64_env("ODRA_CASPER_LIVENET_GAS", DEFAULT_DEPLOY_GAS_TOKEN_MOTES);
    let deploy_gas_token = read_u64_env("ODRA_CASPER_LIVENET_DEPLOY_GAS_TOKEN", gas_fallback);
    let deploy_gas_staking =
        read_u64_env("ODRA_CASPER_LIVENET_DEPLOY_GAS_STAKING", DEFAULT_DEPLOY_GAS_STAKING_MOTES);
    let call_gas = read_u64_env("ODRA_CASPER_LIVENET_CALL_GAS", DEFAULT_CALL_GAS_MOTES);

    let initial_supply_steak = read_u64_env("STEAKHOUSE_INITIAL_SUPPLY_STEAK", 2000);
    let stake_steak = read_u64_env("STEAKHOUSE_DEMO_STAKE_STEAK", 100);

    println!("[INFO] Mode: {}", mode);
    println!("[INFO] Started at: {}", chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"));
    println!("[INFO] Caller: {:?}", env.caller());
    println!(
        "[INFO] Gas (motes): deploy_token={} ({} CSPR), deploy_staking={} ({} CSPR), calls={} ({} CSPR)",
        deploy_gas_token,
        deploy_gas_token / MOTES_PER_CSPR,
        deploy_gas_staking,
        deploy_gas_staking / MOTES_PER_CSPR,
        call_gas,
        call_gas / MOTES_PER_CSPR
    );
    println!(
        "[INFO] Demo params: initial_supply={} STEAK, stake={} STEAK",
        initial_supply_steak, stake_steak
    );
    println!();

    // ==========================================
    // Step 1: Deploy (or reuse) STEAK token
    // ==========================================
    let token = if should_deploy {
        println!("[STEP 1] Deploying STEAK token...");
        env.set_gas(deploy_gas_token);
        let token = SteakToken::deploy(
            &env,
            SteakTokenInitArgs {
                initial_supply: steak(initial_supply_steak),
            },
        );
        println!("[OK] STEAK deployed at: {:?}", token.address());
        println!("     Name: {}", token.name());
        println!("     Symbol: {}", token.symbol());
        println!("     Total supply: {}", token.total_supply());
        println!();
        token
    } else {
        println!("[STEP 1] Reusing existing STEAK token...");
        let raw = std::env::var("STEAKHOUSE_EXISTING_TOKEN")
            .unwrap_or_else(|_| panic!("STEAKHOUSE_EXISTING_TOKEN must be set for mode={}", mode));
        let addr = parse_contract_address(&raw);
        println!("[OK] STEAK: {:?}", addr);
        println!();
        SteakToken::load(&env, addr)
    };
    let token_addr = token.address();

    // ==========================================
    // Step 2: Deploy (or reuse) SteakHouse
    // ==========================================
    let staking = if should_deploy {
        println!("[STEP 2] Deploying SteakHouse staking contract...");
        env.set_gas(deploy_gas_staking);
        let staking = SteakHouse::deploy(&env, SteakHouseInitArgs { token: token_addr });
        println!("[OK] SteakHouse deployed at: {:?}", staking.address());
        println!("     Token: {:?}", staking.token());
        println!();
        staking
    } else {
        println!("[STEP 2] Reusing existing SteakHouse contract...");
        let raw = std::env::var("STEAKHOUSE_EXISTING_STAKING")
            .unwrap_or_else(|_| panic!("STEAKHOUSE_EXISTING_STAKING must be set for mode={}", mode));
        let addr = parse_contract_address(&raw);
        println!("[OK] SteakHouse: {:?}", addr);
        println!();
        SteakHouse::load(&env, addr)
    };
    let staking_addr = staking.address();

    // ==========================================
    // Step 3: Hand custody to SteakHouse (must succeed for stake to work)
    // ==========================================
    println!("[STEP 3] Setting STEAK custodian to SteakHouse...");
    env.set_gas(call_gas);
    let mut token = token;
    let current_custodian = token.custodian();
    println!("     Current custodian:  {:?}", current_custodian);
    println!("     SteakHouse address: {:?}", staking_addr);

    if current_custodian == Some(staking_addr) {
        println!("[OK] STEAK custodian already set to SteakHouse.");
    } else {
        token.set_custodian(staking_addr);
        let new_custodian = token.custodian();
        println!("[OK] STEAK custodian updated to: {:?}", new_custodian);
        if new_custodian.is_none() {
            panic!("[FATAL] set_custodian succeeded but custodian is None!");
        }
    }
    println!();

    // ==========================================
    // Demo: stake -> claimable -> claim
    // ==========================================
    if should_demo {
        let mut staking = staking;
        let caller = env.caller();

        println!("[DEMO 1] Staking {} STEAK...", stake_steak);
        env.set_gas(call_gas);
        staking.stake(steak(stake_steak));
        println!("[OK] Stake complete.");
        print_position(&staking, &token, caller);

        println!("[DEMO 2] Claiming reward...");
        env.set_gas(call_gas);
        staking.claim();
        println!("[OK] Claim complete. Withdraw unlocks in 24h.");
        print_position(&staking, &token, caller);
    } else if should_withdraw {
        let mut staking = staking;
        let caller = env.caller();

        println!("[WITHDRAW] Releasing claimed reward and withdrawable principal...");
        let remaining_ms = staking.cooldown_remaining(caller);
        if remaining_ms > 0 {
            println!("[WARN] Cooldown has {} s left; withdraw will revert.", remaining_ms / 1000);
        }
        env.set_gas(call_gas);
        staking.withdraw();
        println!("[OK] Withdraw complete.");
        print_position(&staking, &token, caller);
    }

    println!("Done.");
}

fn print_position(staking: &SteakHouseHostRef, token: &SteakTokenHostRef, account: Address) {
    let summary = staking.get_stake_summary(account);
    println!("     Staked:       {}", summary.stake_amount);
    println!("     Pending:      {}", summary.reward);
    println!("     Claimed:      {}", summary.reward_amount);
    println!("     Withdrawable: {}", summary.withdraw_amount);
    println!("     Claimable:    {}", staking.claimable_reward(account));
    println!("     Balance:      {}", token.balance_of(account));
    println!();
}

fn read_u64_env(name: &str, default_value: u64) -> u64 {
    match std::env::var(name) {
        Ok(raw) => {
            let cleaned = raw.trim().replace('_', "");
            cleaned.parse::<u64>().unwrap_or(default_value)
        }
        Err(_) => default_value,
    }
}

fn parse_contract_address(raw: &str) -> Address {
    use odra::casper_types::contracts::ContractPackageHash;
    use odra::casper_types::account::AccountHash;

    fn decode_hex_32(s: &str) -> [u8; 32] {
        let mut out = [0u8; 32];
        if s.len() != 64 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            panic!("Invalid address hash (expected 64 hex): {}", s);
        }
        for i in 0..32 {
            let byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                .unwrap_or_else(|_| panic!("Invalid hex in address: {}", s));
            out[i] = byte;
        }
        out
    }

    let trimmed = raw.trim();
    if let Some(hex) = trimmed.strip_prefix("account-hash-") {
        let bytes = decode_hex_32(hex);
        return Address::Account(AccountHash::new(bytes));
    }
    if let Some(hex) = trimmed.strip_prefix("contract-package-") {
        let bytes = decode_hex_32(hex);
        return Address::Contract(ContractPackageHash::new(bytes));
    }
    if let Some(hex) = trimmed.strip_prefix("package-") {
        let bytes = decode_hex_32(hex);
        return Address::Contract(ContractPackageHash::new(bytes));
    }
    if let Some(hex) = trimmed.strip_prefix("hash-") {
        let bytes = decode_hex_32(hex);
        return Address::Contract(ContractPackageHash::new(bytes));
    }

    if trimmed.len() == 64 && trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        let bytes = decode_hex_32(trimmed);
        return Address::Contract(ContractPackageHash::new(bytes));
    }

    panic!("Invalid address format: {}", trimmed);
}
