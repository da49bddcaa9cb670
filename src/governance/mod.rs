//! Operator registry and authorization
//!
//! An owner redefines a named, ordered set of operators in one atomic step;
//! the [`AuthorizationGate`] answers "is this caller an operator?" for any
//! operation that wants to be operator-gated.
//!
//! # Example
//!
//! ```ignore
//! use ledger_kernel::core::{Address, OperatorName};
//! use ledger_kernel::governance::OperatorRegistry;
//!
//! let owner = Address::with_last_byte(1);
//! let mut registry = OperatorRegistry::new(owner);
//!
//! let legal = OperatorName::from_tag("LEGAL")?;
//! registry.define_operators(owner, &[legal], &[Address::with_last_byte(2)])?;
//!
//! assert!(registry.gate().is_operator(&Address::with_last_byte(2)));
//! ```

pub mod gate;
pub mod operator;

pub use gate::{ensure_owner, AuthorizationGate};
pub use operator::{OperatorBinding, OperatorRegistry, RegistryError};
