//! Ledger Kernel: a fungible-token ledger and operator registry in Rust
//!
//! This crate provides:
//! - An ERC-20 style ledger with checked 256-bit balances and allowances
//! - An owner-managed, ordered operator registry with atomic redefinition
//! - An authorization gate for operator-only operations
//! - A composed kernel with operator-gated mint/burn and one event log
//! - A lock-serialized shared handle, a REST/WebSocket API and a CLI
//!
//! # Example
//!
//! ```rust
//! use ledger_kernel::core::{Address, Amount, Event, OperatorName};
//! use ledger_kernel::kernel::GovernedToken;
//! use ledger_kernel::token::TokenMetadata;
//!
//! let alice = Address::with_last_byte(1);
//! let bob = Address::with_last_byte(2);
//! let mut kernel = GovernedToken::new(
//!     alice,
//!     alice,
//!     TokenMetadata::new("Test", "TST", 18),
//!     Amount::from(1_000u64),
//! );
//!
//! // A zero-value transfer still emits its event
//! let receipt = kernel.transfer(alice, bob, Amount::ZERO).unwrap();
//! assert_eq!(receipt.logs.len(), 1);
//!
//! // Only the owner redefines operators
//! let legal = OperatorName::from_tag("LEGAL").unwrap();
//! let receipt = kernel.define_operators(alice, &[legal], &[bob]).unwrap();
//! assert_eq!(receipt.logs[0], Event::OperatorsCleared { size: 0 });
//! assert!(kernel.gate().is_operator(&bob));
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod governance;
pub mod kernel;
pub mod token;

// Re-export commonly used types
pub use api::{create_router, ApiState};
pub use config::{ConfigError, KernelConfig, TokenConfig};
pub use core::{Address, Amount, Event, EventLog, OperatorName, Receipt};
pub use governance::{AuthorizationGate, OperatorBinding, OperatorRegistry, RegistryError};
pub use kernel::{Call, CallRequest, GovernedToken, KernelError, SharedKernel};
pub use token::{TokenError, TokenLedger, TokenMetadata};
