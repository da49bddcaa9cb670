//! ERC-20 style token ledger
//!
//! Balances, allowances and the total supply of one fungible asset.

use crate::core::{Address, Amount, Event, Receipt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: Amount, need: Amount },
    #[error("Insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance { have: Amount, need: Amount },
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,
}

/// Token metadata (immutable after creation)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenMetadata {
    /// Token name (e.g., "Test")
    pub name: String,
    /// Token symbol (e.g., "TST")
    pub symbol: String,
    /// Decimal places (usually 18)
    pub decimals: u8,
}

impl TokenMetadata {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
        }
    }
}

/// A fungible token ledger
///
/// `sum(balances) == total_supply` holds after every call: each mutating
/// method checks every precondition before writing anything. Deserialized
/// snapshots are rejected unless they satisfy the same equation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "LedgerSnapshot")]
pub struct TokenLedger {
    /// Fixed at creation
    metadata: TokenMetadata,
    total_supply: Amount,
    /// Balances: address -> amount
    balances: HashMap<Address, Amount>,
    /// Allowances: owner -> (spender -> amount)
    allowances: HashMap<Address, HashMap<Address, Amount>>,
}

/// Unchecked wire form of a [`TokenLedger`]
#[derive(Deserialize)]
struct LedgerSnapshot {
    metadata: TokenMetadata,
    total_supply: Amount,
    balances: HashMap<Address, Amount>,
    allowances: HashMap<Address, HashMap<Address, Amount>>,
}

impl TryFrom<LedgerSnapshot> for TokenLedger {
    type Error = String;

    fn try_from(snapshot: LedgerSnapshot) -> Result<Self, Self::Error> {
        let ledger = Self {
            metadata: snapshot.metadata,
            total_supply: snapshot.total_supply,
            balances: snapshot.balances,
            allowances: snapshot.allowances,
        };
        if !ledger.is_conserved() {
            return Err(format!(
                "balances do not sum to total supply {}",
                ledger.total_supply
            ));
        }
        Ok(ledger)
    }
}

impl TokenLedger {
    /// Create a new ledger with all supply allocated to creator
    pub fn new(creator: Address, metadata: TokenMetadata, initial_supply: Amount) -> Self {
        let mut balances = HashMap::new();
        balances.insert(creator, initial_supply);

        log::info!(
            "Token ledger created: {} ({}) supply {} credited to {}",
            metadata.name,
            metadata.symbol,
            initial_supply,
            creator
        );

        Self {
            metadata,
            total_supply: initial_supply,
            balances,
            allowances: HashMap::new(),
        }
    }

    // =========================================================================
    // ERC-20 View Functions
    // =========================================================================

    /// Get token name
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Get token symbol
    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    /// Get decimal places
    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    /// Get total supply
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Get balance of an address
    pub fn balance_of(&self, address: &Address) -> Amount {
        self.balances.get(address).copied().unwrap_or_default()
    }

    /// Get allowance for a spender
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or_default()
    }

    /// Get all holders with non-zero balances
    pub fn holders(&self) -> Vec<(&Address, &Amount)> {
        self.balances.iter().filter(|(_, b)| !b.is_zero()).collect()
    }

    /// Get holder count
    pub fn holder_count(&self) -> usize {
        self.balances.values().filter(|b| !b.is_zero()).count()
    }

    /// Sum of all balances, `None` if it does not fit in an amount
    pub fn circulating(&self) -> Option<Amount> {
        self.balances
            .values()
            .try_fold(Amount::ZERO, |sum, balance| sum.checked_add(*balance))
    }

    /// Whether the balances add up to the total supply
    pub fn is_conserved(&self) -> bool {
        self.circulating() == Some(self.total_supply)
    }

    // =========================================================================
    // ERC-20 Mutating Functions
    // =========================================================================

    /// Transfer tokens from the caller to another address
    ///
    /// A zero-value transfer succeeds and still emits `Transfer`.
    pub fn transfer(
        &mut self,
        caller: Address,
        to: Address,
        value: Amount,
    ) -> Result<Receipt, TokenError> {
        self.move_balance(caller, to, value)?;

        Ok(Receipt::single(Event::Transfer {
            from: caller,
            to,
            value,
        }))
    }

    /// Set the spender's allowance on the caller's funds (overwrites)
    pub fn approve(
        &mut self,
        caller: Address,
        spender: Address,
        value: Amount,
    ) -> Result<Receipt, TokenError> {
        self.set_allowance(caller, spender, value);

        Ok(Receipt::single(Event::Approval {
            owner: caller,
            spender,
            value,
        }))
    }

    /// Transfer tokens on behalf of owner (requires prior approval)
    ///
    /// The allowance is checked before the balance, so a call short on both
    /// reports `InsufficientAllowance`.
    pub fn transfer_from(
        &mut self,
        spender: Address,
        owner: Address,
        to: Address,
        value: Amount,
    ) -> Result<Receipt, TokenError> {
        let current_allowance = self.allowance(&owner, &spender);
        let remaining =
            current_allowance
                .checked_sub(value)
                .ok_or(TokenError::InsufficientAllowance {
                    have: current_allowance,
                    need: value,
                })?;

        self.move_balance(owner, to, value)?;
        self.set_allowance(owner, spender, remaining);

        Ok(Receipt::single(Event::Transfer {
            from: owner,
            to,
            value,
        }))
    }

    /// Raise the spender's allowance by `added`
    pub fn increase_approval(
        &mut self,
        caller: Address,
        spender: Address,
        added: Amount,
    ) -> Result<Receipt, TokenError> {
        let total = self
            .allowance(&caller, &spender)
            .checked_add(added)
            .ok_or_else(|| overflow("increase_approval"))?;

        self.approve(caller, spender, total)
    }

    /// Lower the spender's allowance by `subtracted`, flooring at zero
    pub fn decrease_approval(
        &mut self,
        caller: Address,
        spender: Address,
        subtracted: Amount,
    ) -> Result<Receipt, TokenError> {
        let total = self
            .allowance(&caller, &spender)
            .saturating_sub(subtracted);

        self.approve(caller, spender, total)
    }

    // =========================================================================
    // Supply adjustment (gated by the owning kernel)
    // =========================================================================

    /// Create `value` new tokens at `to`
    pub(crate) fn mint(&mut self, to: Address, value: Amount) -> Result<Receipt, TokenError> {
        let supply = self
            .total_supply
            .checked_add(value)
            .ok_or_else(|| overflow("mint"))?;
        let balance = self
            .balance_of(&to)
            .checked_add(value)
            .ok_or_else(|| overflow("mint"))?;

        self.total_supply = supply;
        self.balances.insert(to, balance);

        Ok(Receipt::single(Event::Transfer {
            from: Address::ZERO,
            to,
            value,
        }))
    }

    /// Destroy `value` tokens held by `from`
    pub(crate) fn burn(&mut self, from: Address, value: Amount) -> Result<Receipt, TokenError> {
        let have = self.balance_of(&from);
        let balance = have
            .checked_sub(value)
            .ok_or(TokenError::InsufficientBalance { have, need: value })?;
        // balance <= supply, so this cannot underflow while conserved
        let supply = self
            .total_supply
            .checked_sub(value)
            .ok_or_else(|| overflow("burn"))?;

        self.balances.insert(from, balance);
        self.total_supply = supply;

        Ok(Receipt::single(Event::Transfer {
            from,
            to: Address::ZERO,
            value,
        }))
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    /// Debit `from` and credit `to`; both new balances are computed first
    fn move_balance(&mut self, from: Address, to: Address, value: Amount) -> Result<(), TokenError> {
        let have = self.balance_of(&from);
        let debited = have
            .checked_sub(value)
            .ok_or(TokenError::InsufficientBalance { have, need: value })?;

        if from == to {
            return Ok(());
        }

        let credited = self
            .balance_of(&to)
            .checked_add(value)
            .ok_or_else(|| overflow("transfer"))?;

        self.balances.insert(from, debited);
        self.balances.insert(to, credited);
        Ok(())
    }

    fn set_allowance(&mut self, owner: Address, spender: Address, value: Amount) {
        self.allowances
            .entry(owner)
            .or_default()
            .insert(spender, value);
    }
}

fn overflow(operation: &str) -> TokenError {
    log::error!("Arithmetic overflow in {}", operation);
    TokenError::ArithmeticOverflow
}
