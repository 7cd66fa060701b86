//! CEP-18 Token implementation: STEAK
//!
//! STEAK is the fungible token the staking contract operates on. The full
//! initial supply is minted to the deployer. A single custodian address
//! (the SteakHouse contract) may debit a holder's spendable balance when
//! funds move into staking custody and credit it when they are released.

use alloc::string::String;
use odra::casper_types::U256;
use odra::prelude::*;
use odra_modules::cep18::events::{
    Burn, DecreaseAllowance, IncreaseAllowance, Mint, SetAllowance, Transfer, TransferFrom,
};
use odra_modules::cep18::storage::{
    Cep18AllowancesStorage, Cep18BalancesStorage, Cep18DecimalsStorage, Cep18NameStorage,
    Cep18SymbolStorage, Cep18TotalSupplyStorage,
};

/// Additional events for STEAK
pub mod events {
    use odra::prelude::*;

    #[odra::event]
    pub struct CustodianSet {
        pub old_custodian: Option<Address>,
        pub new_custodian: Address,
    }
}

/// Errors for token operations (aligned with CEP-18 codes where applicable)
#[odra::odra_error]
pub enum TokenError {
    InsufficientBalance = 60001,
    InsufficientAllowance = 60002,
    CannotTargetSelfUser = 60003,
    Unauthorized = 60004,
}

/// STEAK: fungible token with a custodian role for the staking contract.
/// The custodian debits a holder's spendable balance when funds enter
/// custody (the units leave circulation while staked) and credits the
/// balance when the staking ledger releases them, reward included.
#[odra::module(
    events = [
        Mint,
        Burn,
        SetAllowance,
        IncreaseAllowance,
        DecreaseAllowance,
        Transfer,
        TransferFrom,
        events::CustodianSet
    ],
    errors = TokenError
)]
pub struct SteakToken {
    name: SubModule<Cep18NameStorage>,
    symbol: SubModule<Cep18SymbolStorage>,
    decimals: SubModule<Cep18DecimalsStorage>,
    total_supply: SubModule<Cep18TotalSupplyStorage>,
    balances: SubModule<Cep18BalancesStorage>,
    allowances: SubModule<Cep18AllowancesStorage>,
    custodian: Var<Address>,
}

#[odra::module]
impl SteakToken {
    /// Initialize the token and mint the initial supply to the deployer.
    /// The deployer starts as custodian and hands the role to the staking
    /// contract via `set_custodian` after deployment.
    pub fn init(&mut self, initial_supply: U256) {
        self.name.set("SteakHouse Token".to_string());
        self.symbol.set("STEAK".to_string());
        self.decimals.set(18u8);
        self.total_supply.set(U256::zero());
        self.allowances.init();
        self.balances.init();

        let deployer = self.env().caller();
        self.raw_mint(&deployer, &initial_supply);
        self.custodian.set(deployer);
        self.env().emit_event(events::CustodianSet {
            old_custodian: None,
            new_custodian: deployer,
        });
    }

    /// Token name
    pub fn name(&self) -> String {
        self.name.get()
    }

    /// Token symbol
    pub fn symbol(&self) -> String {
        self.symbol.get()
    }

    /// Token decimals
    pub fn decimals(&self) -> u8 {
        self.decimals.get()
    }

    /// Total supply
    pub fn total_supply(&self) -> U256 {
        self.total_supply.get()
    }

    /// Balance of an address
    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).unwrap_or_default()
    }

    /// Allowance from owner to spender
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get_or_default(&owner, &spender)
    }

    /// Transfer tokens
    pub fn transfer(&mut self, recipient: Address, amount: U256) {
        let sender = self.env().caller();
        if sender == recipient {
            self.env().revert(TokenError::CannotTargetSelfUser);
        }
        self.raw_transfer(&sender, &recipient, &amount);
        self.env().emit_event(Transfer {
            sender,
            recipient,
            amount,
        });
    }

    /// Approve spender
    pub fn approve(&mut self, spender: Address, amount: U256) {
        let owner = self.env().caller();
        if owner == spender {
            self.env().revert(TokenError::CannotTargetSelfUser);
        }
        self.allowances.set(&owner, &spender, amount);
        self.env().emit_event(SetAllowance {
            owner,
            spender,
            allowance: amount,
        });
    }

    /// Increase allowance
    pub fn increase_allowance(&mut self, spender: Address, amount: U256) {
        let owner = self.env().caller();
        if owner == spender {
            self.env().revert(TokenError::CannotTargetSelfUser);
        }
        let allowance = self.allowances.get_or_default(&owner, &spender);
        let new_allowance = allowance.saturating_add(amount);
        self.allowances.set(&owner, &spender, new_allowance);
        self.env().emit_event(IncreaseAllowance {
            owner,
            spender,
            allowance: new_allowance,
            inc_by: amount,
        });
    }

    /// Decrease allowance
    pub fn decrease_allowance(&mut self, spender: Address, amount: U256) {
        let owner = self.env().caller();
        if owner == spender {
            self.env().revert(TokenError::CannotTargetSelfUser);
        }
        let allowance = self.allowances.get_or_default(&owner, &spender);
        let new_allowance = allowance.saturating_sub(amount);
        self.allowances.set(&owner, &spender, new_allowance);
        self.env().emit_event(DecreaseAllowance {
            owner,
            spender,
            allowance: new_allowance,
            decr_by: amount,
        });
    }

    /// Transfer from (with allowance)
    pub fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) {
        if owner == recipient {
            self.env().revert(TokenError::CannotTargetSelfUser);
        }
        if amount.is_zero() {
            return;
        }
        let spender = self.env().caller();
        let allowance = self.allowances.get_or_default(&owner, &spender);
        if allowance < amount {
            self.env().revert(TokenError::InsufficientAllowance);
        }
        self.allowances.set(&owner, &spender, allowance - amount);
        self.raw_transfer(&owner, &recipient, &amount);
        self.env().emit_event(TransferFrom {
            spender,
            owner,
            recipient,
            amount,
        });
    }

    /// Get current custodian
    pub fn custodian(&self) -> Option<Address> {
        self.custodian.get()
    }

    /// Set new custodian (only current custodian can call)
    pub fn set_custodian(&mut self, new_custodian: Address) {
        let caller = self.env().caller();
        let current = self.custodian.get();
        if current != Some(caller) {
            self.env().revert(TokenError::Unauthorized);
        }
        self.custodian.set(new_custodian);
        self.env().emit_event(events::CustodianSet {
            old_custodian: current,
            new_custodian,
        });
    }

    /// Remove `amount` from a holder's spendable balance as it enters
    /// custody (custodian only). Reverts on insufficient balance.
    pub fn debit(&mut self, account: Address, amount: U256) {
        self.require_custodian();
        self.raw_burn(&account, &amount);
    }

    /// Return `amount` to a holder's spendable balance as the staking
    /// ledger releases it (custodian only).
    pub fn credit(&mut self, account: Address, amount: U256) {
        self.require_custodian();
        self.raw_mint(&account, &amount);
    }

    // Caller must be the custodian
    fn require_custodian(&self) {
        if self.custodian.get() != Some(self.env().caller()) {
            self.env().revert(TokenError::Unauthorized);
        }
    }

    // Internal transfer
    fn raw_transfer(&mut self, sender: &Address, recipient: &Address, amount: &U256) {
        let balance = self.balances.get(sender).unwrap_or_default();
        if balance < *amount {
            self.env().revert(TokenError::InsufficientBalance);
        }
        if !amount.is_zero() {
            self.balances.subtract(sender, *amount);
            self.balances.add(recipient, *amount);
        }
    }

    // Internal mint
    fn raw_mint(&mut self, owner: &Address, amount: &U256) {
        self.total_supply.add(*amount);
        self.balances.add(owner, *amount);
        self.env().emit_event(Mint {
            recipient: owner.clone(),
            amount: *amount,
        });
    }

    // Internal burn
    fn raw_burn(&mut self, owner: &Address, amount: &U256) {
        let balance = self.balances.get(owner).unwrap_or_default();
        if balance < *amount {
            self.env().revert(TokenError::InsufficientBalance);
        }
        self.balances.subtract(owner, *amount);
        self.total_supply.subtract(*amount);
        self.env().emit_event(Burn {
            owner: owner.clone(),
            amount: *amount,
        });
    }
}
