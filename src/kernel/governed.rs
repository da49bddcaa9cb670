//! A token ledger composed with an operator registry
//!
//! Forwards the ledger and registry operations unchanged and adds supply
//! adjustment (mint, burn) behind the operator gate. Every committed call
//! lands in one ordered event log.

use crate::config::KernelConfig;
use crate::core::{Address, Amount, EventLog, OperatorName, Receipt};
use crate::governance::{AuthorizationGate, OperatorRegistry};
use crate::kernel::call::Call;
use crate::kernel::error::KernelError;
use crate::token::{TokenLedger, TokenMetadata};
use serde::Serialize;

/// Ledger, registry and their shared event history
#[derive(Clone, Debug, Serialize)]
pub struct GovernedToken {
    ledger: TokenLedger,
    registry: OperatorRegistry,
    events: EventLog,
}

impl GovernedToken {
    /// Credit `initial_supply` to `creator`; `owner` manages the operators
    pub fn new(
        creator: Address,
        owner: Address,
        metadata: TokenMetadata,
        initial_supply: Amount,
    ) -> Self {
        Self {
            ledger: TokenLedger::new(creator, metadata, initial_supply),
            registry: OperatorRegistry::new(owner),
            events: EventLog::new(),
        }
    }

    pub fn from_config(config: &KernelConfig) -> Self {
        Self::new(
            config.creator,
            config.owner,
            config.token.metadata(),
            config.token.initial_supply,
        )
    }

    pub fn ledger(&self) -> &TokenLedger {
        &self.ledger
    }

    pub fn registry(&self) -> &OperatorRegistry {
        &self.registry
    }

    pub fn gate(&self) -> AuthorizationGate<'_> {
        self.registry.gate()
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    // =========================================================================
    // Ledger operations
    // =========================================================================

    pub fn transfer(
        &mut self,
        caller: Address,
        to: Address,
        value: Amount,
    ) -> Result<Receipt, KernelError> {
        let receipt = self.ledger.transfer(caller, to, value)?;
        Ok(self.commit(receipt))
    }

    pub fn approve(
        &mut self,
        caller: Address,
        spender: Address,
        value: Amount,
    ) -> Result<Receipt, KernelError> {
        let receipt = self.ledger.approve(caller, spender, value)?;
        Ok(self.commit(receipt))
    }

    pub fn transfer_from(
        &mut self,
        spender: Address,
        owner: Address,
        to: Address,
        value: Amount,
    ) -> Result<Receipt, KernelError> {
        let receipt = self.ledger.transfer_from(spender, owner, to, value)?;
        Ok(self.commit(receipt))
    }

    pub fn increase_approval(
        &mut self,
        caller: Address,
        spender: Address,
        added: Amount,
    ) -> Result<Receipt, KernelError> {
        let receipt = self.ledger.increase_approval(caller, spender, added)?;
        Ok(self.commit(receipt))
    }

    pub fn decrease_approval(
        &mut self,
        caller: Address,
        spender: Address,
        subtracted: Amount,
    ) -> Result<Receipt, KernelError> {
        let receipt = self.ledger.decrease_approval(caller, spender, subtracted)?;
        Ok(self.commit(receipt))
    }

    // =========================================================================
    // Registry operations
    // =========================================================================

    pub fn define_operators(
        &mut self,
        caller: Address,
        names: &[OperatorName],
        addresses: &[Address],
    ) -> Result<Receipt, KernelError> {
        let receipt = self.registry.define_operators(caller, names, addresses)?;
        Ok(self.commit(receipt))
    }

    // =========================================================================
    // Operator-gated supply adjustment
    // =========================================================================

    /// Create tokens at `to`; caller must be an operator
    pub fn mint(
        &mut self,
        caller: Address,
        to: Address,
        value: Amount,
    ) -> Result<Receipt, KernelError> {
        self.require_operator(caller, "mint")?;
        let receipt = self.ledger.mint(to, value)?;
        log::info!("{} minted {} to {}", caller, value, to);
        Ok(self.commit(receipt))
    }

    /// Destroy tokens held by `from`; caller must be an operator
    pub fn burn(
        &mut self,
        caller: Address,
        from: Address,
        value: Amount,
    ) -> Result<Receipt, KernelError> {
        self.require_operator(caller, "burn")?;
        let receipt = self.ledger.burn(from, value)?;
        log::info!("{} burned {} from {}", caller, value, from);
        Ok(self.commit(receipt))
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Run one call on behalf of `caller`
    pub fn apply(&mut self, caller: Address, call: Call) -> Result<Receipt, KernelError> {
        let name = call.name();
        let result = match call {
            Call::Transfer { to, value } => self.transfer(caller, to, value),
            Call::Approve { spender, value } => self.approve(caller, spender, value),
            Call::TransferFrom { from, to, value } => self.transfer_from(caller, from, to, value),
            Call::IncreaseApproval { spender, value } => {
                self.increase_approval(caller, spender, value)
            }
            Call::DecreaseApproval { spender, value } => {
                self.decrease_approval(caller, spender, value)
            }
            Call::DefineOperators { names, addresses } => {
                self.define_operators(caller, &names, &addresses)
            }
            Call::Mint { to, value } => self.mint(caller, to, value),
            Call::Burn { from, value } => self.burn(caller, from, value),
        };

        match &result {
            Ok(receipt) => log::debug!("{} by {}: {} event(s)", name, caller, receipt.len()),
            Err(e) => log::debug!("{} by {} rejected: {}", name, caller, e),
        }
        result
    }

    fn require_operator(&self, caller: Address, operation: &str) -> Result<(), KernelError> {
        self.registry.gate().require_operator(&caller).map_err(|e| {
            log::warn!("Rejected {} by non-operator {}", operation, caller);
            KernelError::from(e)
        })
    }

    fn commit(&mut self, receipt: Receipt) -> Receipt {
        self.events.append(&receipt);
        receipt
    }
}
