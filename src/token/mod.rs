//! ERC-20 style fungible token ledger
//!
//! Provides a standard interface for one fungible token with:
//! - Balances per address, summing to the total supply
//! - Allowances for delegated transfers
//! - Transfer, approve and allowance adjustment operations
//!
//! # Example
//!
//! ```ignore
//! use ledger_kernel::core::{unit, Address, Amount};
//! use ledger_kernel::token::{TokenLedger, TokenMetadata};
//!
//! let creator = Address::with_last_byte(1);
//! let supply = Amount::from(1_000_000u64) * unit(18).unwrap();
//! let mut ledger = TokenLedger::new(creator, TokenMetadata::new("My Token", "MTK", 18), supply);
//!
//! // Transfer tokens
//! let receipt = ledger.transfer(creator, Address::with_last_byte(2), Amount::from(1000u64))?;
//! assert_eq!(receipt.logs.len(), 1);
//! ```

pub mod ledger;

pub use ledger::{TokenError, TokenLedger, TokenMetadata};
