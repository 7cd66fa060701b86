//! SteakHouse Staking Contract
//!
//! A single-position staking ledger for STEAK on Casper Network.
//! - Holders lock STEAK into one stake position per account
//! - The stake earns simple interest at a rate set by its size tier
//! - Claimed rewards and partially withdrawn principal sit in a holding
//!   area and are released to the spendable balance only after a 24h
//!   cooldown counted from the most recent claim
//!
//! ## Units
//! - STEAK: 18 decimals (U256), 1 STEAK = 1e18
//! - Block time: milliseconds (u64); interest accrues per elapsed second

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use crate::tokens::SteakTokenContractRef;

// ==========================================
// Constants
// ==========================================

/// 1 STEAK = 1e18
const WAD: u128 = 1_000_000_000_000_000_000;

/// Interest is quoted as an annual percentage
const PERCENT_DIVISOR: u64 = 100;
/// Seconds per year (365 days)
const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Withdrawal cooldown after a claim = 24 hours (block time is in ms)
const COOLDOWN_MS: u64 = 24 * 60 * 60 * 1000;

/// Tier thresholds in whole STEAK (inclusive lower bounds) and their
/// annual rates. Larger stakes earn higher rates.
const TIER1_MIN_TOKENS: u64 = 1_000;
const TIER2_MIN_TOKENS: u64 = 1_500;
const TIER3_MIN_TOKENS: u64 = 2_000;

const RATE_BASE_PCT: u64 = 15;
const RATE_TIER1_PCT: u64 = 16;
const RATE_TIER2_PCT: u64 = 17;
const RATE_TIER3_PCT: u64 = 18;

// ==========================================
// Events
// ==========================================

pub mod events {
    use odra::prelude::*;
    use odra::casper_types::U256;

    #[odra::event]
    pub struct Staked {
        pub staker: Address,
        pub amount: U256,
        pub new_stake: U256,
    }

    #[odra::event]
    pub struct Claimed {
        pub staker: Address,
        pub reward: U256,
    }

    #[odra::event]
    pub struct WithdrawRequested {
        pub staker: Address,
        pub amount: U256,
    }

    #[odra::event]
    pub struct Withdrawn {
        pub staker: Address,
        pub amount: U256,
    }

    #[odra::event]
    pub struct Paused {
        pub by: Address,
    }

    #[odra::event]
    pub struct Unpaused {
        pub by: Address,
    }
}

// ==========================================
// Types
// ==========================================

/// Snapshot of a stake position returned by get_stake_summary.
/// Reports recorded state only; `reward` is the locked-in pending reward,
/// not a live accrual projection (use claimable_reward for that).
#[odra::odra_type]
pub struct StakeSummary {
    pub stake_amount: U256,
    pub reward: U256,
    pub reward_amount: U256,
    pub withdraw_amount: U256,
}

// ==========================================
// Errors
// ==========================================

#[odra::odra_error]
pub enum StakingError {
    InvalidAmount = 1,
    EmptyPosition = 2,
    CooldownNotElapsed = 3,
    ContractPaused = 4,
    Unauthorized = 5,
}

// ==========================================
// Contract
// ==========================================

#[odra::module(events = [
    events::Staked,
    events::Claimed,
    events::WithdrawRequested,
    events::Withdrawn,
    events::Paused,
    events::Unpaused
])]
pub struct SteakHouse {
    // Token reference
    token: Var<Address>,

    // Per-account stake position
    staked: Mapping<Address, U256>,          // Principal currently locked
    stake_ts: Mapping<Address, u64>,         // Accrual clock epoch (ms)
    pending_reward: Mapping<Address, U256>,  // Accrued interest, not yet claimed
    claimed_reward: Mapping<Address, U256>,  // Claimed interest awaiting cooldown
    withdrawable: Mapping<Address, U256>,    // Withdrawn principal awaiting cooldown
    claim_ts: Mapping<Address, u64>,         // Cooldown epoch (ms)

    // Global state
    total_staked: Var<U256>,                 // Sum of all locked principal

    // Admin
    owner: Var<Address>,
    paused: Var<bool>,
}

#[odra::module]
impl SteakHouse {
    // ==========================================
    // Initialization
    // ==========================================

    /// Initialize the staking contract against the STEAK token.
    /// The token's custodian must be set to this contract afterwards.
    pub fn init(&mut self, token: Address) {
        self.token.set(token);
        self.total_staked.set(U256::zero());
        self.owner.set(self.env().caller());
        self.paused.set(false);
    }

    // ==========================================
    // User Functions
    // ==========================================

    /// Stake `amount` STEAK. Creates the position on first use, otherwise
    /// adds to it. Interest accrued on the existing stake is locked into
    /// the pending reward at the pre-addition amount and tier, then the
    /// accrual clock restarts on the new total.
    pub fn stake(&mut self, amount: U256) {
        self.require_not_paused();
        let caller = self.env().caller();

        if amount == U256::zero() {
            self.env().revert(StakingError::InvalidAmount);
        }

        // Lock in interest earned so far before the stake changes size
        let current = self.staked.get(&caller).unwrap_or_default();
        if current > U256::zero() {
            let accrued = self.accrued_interest(caller);
            if accrued > U256::zero() {
                let pending = self.pending_reward.get(&caller).unwrap_or_default();
                self.pending_reward.set(&caller, pending + accrued);
            }
        }

        // Pull funds into custody; the token reverts on insufficient balance
        let token_addr = self.token.get().expect("token not set");
        let mut token = SteakTokenContractRef::new(self.env().clone(), token_addr);
        token.debit(caller, amount);

        let new_stake = current + amount;
        self.staked.set(&caller, new_stake);
        self.stake_ts.set(&caller, self.env().get_block_time());

        let total = self.total_staked.get_or_default();
        self.total_staked.set(total + amount);

        self.env().emit_event(events::Staked {
            staker: caller,
            amount,
            new_stake,
        });
    }

    /// Claim all reward: the pending reward plus interest accrued since
    /// the last stake/claim is promoted to the claimed balance, and the
    /// 24h withdrawal cooldown restarts. No tokens move yet.
    pub fn claim(&mut self) {
        self.require_not_paused();
        let caller = self.env().caller();
        self.require_position(caller);

        let reward = self.promote_reward(caller);

        self.env().emit_event(events::Claimed {
            staker: caller,
            reward,
        });
    }

    /// Claim all reward and additionally move `amount` of staked principal
    /// into the withdrawable balance. One cooldown, restarted now, governs
    /// both. The remaining stake keeps earning interest.
    pub fn claim_and_withdraw(&mut self, amount: U256) {
        self.require_not_paused();
        let caller = self.env().caller();
        self.require_position(caller);

        let staked = self.staked.get(&caller).unwrap_or_default();
        if amount == U256::zero() || amount > staked {
            self.env().revert(StakingError::InvalidAmount);
        }

        let reward = self.promote_reward(caller);

        self.staked.set(&caller, staked - amount);
        let withdrawable = self.withdrawable.get(&caller).unwrap_or_default();
        self.withdrawable.set(&caller, withdrawable + amount);

        let total = self.total_staked.get_or_default();
        if total >= amount {
            self.total_staked.set(total - amount);
        }

        self.env().emit_event(events::Claimed {
            staker: caller,
            reward,
        });
        self.env().emit_event(events::WithdrawRequested {
            staker: caller,
            amount,
        });
    }

    /// Release the claimed reward and withdrawable principal to the
    /// spendable balance. Fails until 24h have elapsed since the most
    /// recent claim.
    pub fn withdraw(&mut self) {
        self.require_not_paused();
        let caller = self.env().caller();

        let claimed = self.claimed_reward.get(&caller).unwrap_or_default();
        let withdrawable = self.withdrawable.get(&caller).unwrap_or_default();
        let payout = claimed + withdrawable;
        if payout == U256::zero() {
            self.env().revert(StakingError::EmptyPosition);
        }

        let claim_ts = self.claim_ts.get(&caller).unwrap_or_default();
        let now = self.env().get_block_time();
        if now < claim_ts + COOLDOWN_MS {
            self.env().revert(StakingError::CooldownNotElapsed);
        }

        let token_addr = self.token.get().expect("token not set");
        let mut token = SteakTokenContractRef::new(self.env().clone(), token_addr);
        token.credit(caller, payout);

        self.claimed_reward.set(&caller, U256::zero());
        self.withdrawable.set(&caller, U256::zero());

        self.env().emit_event(events::Withdrawn {
            staker: caller,
            amount: payout,
        });
    }

    // ==========================================
    // View Functions
    // ==========================================

    /// Reward claimable right now: locked-in pending reward plus interest
    /// accrued since the last stake/claim (read-only, no clock reset).
    pub fn claimable_reward(&self, account: Address) -> U256 {
        let pending = self.pending_reward.get(&account).unwrap_or_default();
        pending + self.accrued_interest(account)
    }

    /// Snapshot of the recorded position
    pub fn get_stake_summary(&self, account: Address) -> StakeSummary {
        StakeSummary {
            stake_amount: self.staked.get(&account).unwrap_or_default(),
            reward: self.pending_reward.get(&account).unwrap_or_default(),
            reward_amount: self.claimed_reward.get(&account).unwrap_or_default(),
            withdraw_amount: self.withdrawable.get(&account).unwrap_or_default(),
        }
    }

    /// Principal currently staked
    pub fn stake_of(&self, account: Address) -> U256 {
        self.staked.get(&account).unwrap_or_default()
    }

    /// Annual interest rate (percent) the account's stake currently earns
    pub fn rate_of(&self, account: Address) -> u64 {
        self.tier_rate(self.staked.get(&account).unwrap_or_default())
    }

    /// Milliseconds left until withdraw unlocks; zero when it is open
    pub fn cooldown_remaining(&self, account: Address) -> u64 {
        let claim_ts = self.claim_ts.get(&account).unwrap_or_default();
        let unlock = claim_ts + COOLDOWN_MS;
        let now = self.env().get_block_time();
        unlock.saturating_sub(now)
    }

    /// Total principal staked across all accounts
    pub fn total_staked(&self) -> U256 {
        self.total_staked.get_or_default()
    }

    /// Get STEAK token address
    pub fn token(&self) -> Option<Address> {
        self.token.get()
    }

    /// Get contract owner
    pub fn owner(&self) -> Option<Address> {
        self.owner.get()
    }

    /// Check if paused
    pub fn is_paused(&self) -> bool {
        self.paused.get_or_default()
    }

    // ==========================================
    // Admin Functions
    // ==========================================

    /// Pause contract (owner only)
    pub fn pause(&mut self) {
        self.require_owner();
        if self.paused.get_or_default() {
            self.env().revert(StakingError::ContractPaused);
        }
        self.paused.set(true);
        self.env().emit_event(events::Paused {
            by: self.env().caller(),
        });
    }

    /// Unpause contract (owner only)
    pub fn unpause(&mut self) {
        self.require_owner();
        if !self.paused.get_or_default() {
            self.env().revert(StakingError::ContractPaused);
        }
        self.paused.set(false);
        self.env().emit_event(events::Unpaused {
            by: self.env().caller(),
        });
    }

    // ==========================================
    // Internal Functions
    // ==========================================

    fn require_not_paused(&self) {
        if self.paused.get_or_default() {
            self.env().revert(StakingError::ContractPaused);
        }
    }

    fn require_owner(&self) {
        if self.owner.get() != Some(self.env().caller()) {
            self.env().revert(StakingError::Unauthorized);
        }
    }

    // A claim needs something staked or a pending reward to promote
    fn require_position(&self, account: Address) {
        let staked = self.staked.get(&account).unwrap_or_default();
        let pending = self.pending_reward.get(&account).unwrap_or_default();
        if staked == U256::zero() && pending == U256::zero() {
            self.env().revert(StakingError::EmptyPosition);
        }
    }

    /// Annual rate (percent) for a stake of the given size. Inclusive
    /// lower bounds; evaluated on the full post-operation amount.
    fn tier_rate(&self, staked: U256) -> u64 {
        let wad = U256::from(WAD);
        if staked >= U256::from(TIER3_MIN_TOKENS) * wad {
            RATE_TIER3_PCT
        } else if staked >= U256::from(TIER2_MIN_TOKENS) * wad {
            RATE_TIER2_PCT
        } else if staked >= U256::from(TIER1_MIN_TOKENS) * wad {
            RATE_TIER1_PCT
        } else {
            RATE_BASE_PCT
        }
    }

    /// Simple interest accrued on the current stake since the accrual
    /// epoch (read-only, doesn't update state). Floor division only, so
    /// interest never rounds up.
    fn accrued_interest(&self, account: Address) -> U256 {
        let staked = self.staked.get(&account).unwrap_or_default();
        if staked == U256::zero() {
            return U256::zero();
        }

        let last_ts = self.stake_ts.get(&account).unwrap_or(self.env().get_block_time());
        let now = self.env().get_block_time();
        if now <= last_ts {
            return U256::zero();
        }

        let elapsed_secs = (now - last_ts) / 1000;
        let rate = self.tier_rate(staked);

        // reward = staked * rate * elapsed / (year * 100)
        // Using checked math to prevent overflow
        staked
            .checked_mul(U256::from(rate))
            .and_then(|x| x.checked_mul(U256::from(elapsed_secs)))
            .map(|x| x / U256::from(SECONDS_PER_YEAR as u128 * PERCENT_DIVISOR as u128))
            .unwrap_or_default()
    }

    /// Move pending plus freshly accrued reward into the claimed balance
    /// and restart both the accrual clock and the withdrawal cooldown.
    fn promote_reward(&mut self, account: Address) -> U256 {
        let pending = self.pending_reward.get(&account).unwrap_or_default();
        let reward = pending + self.accrued_interest(account);

        let claimed = self.claimed_reward.get(&account).unwrap_or_default();
        self.claimed_reward.set(&account, claimed + reward);
        self.pending_reward.set(&account, U256::zero());

        let now = self.env().get_block_time();
        self.stake_ts.set(&account, now);
        self.claim_ts.set(&account, now);

        reward
    }
}
