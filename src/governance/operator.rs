//! Operator registry
//!
//! An owner-managed, ordered set of named operator bindings. The whole set
//! is replaced in one step by [`OperatorRegistry::define_operators`].

use crate::core::{Address, Event, OperatorName, Receipt};
use crate::governance::gate::{ensure_owner, AuthorizationGate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Registry-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unauthorized caller: {0}")]
    Unauthorized(Address),
    #[error("Invalid argument: {names} names for {addresses} addresses")]
    InvalidArgument { names: usize, addresses: usize },
    #[error("Operator index {index} out of range (count {count})")]
    IndexOutOfRange { index: usize, count: usize },
}

/// A named association granting an address the operator capability
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorBinding {
    pub name: OperatorName,
    pub address: Address,
}

/// Ordered operator bindings plus the owner allowed to redefine them
#[derive(Clone, Debug, Serialize)]
pub struct OperatorRegistry {
    owner: Address,
    /// Definition order is significant: lookups are positional
    bindings: Vec<OperatorBinding>,
}

impl OperatorRegistry {
    /// Create an empty registry owned by `owner`
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            bindings: Vec::new(),
        }
    }

    /// The address allowed to redefine operators
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Replace every binding with `names[i] -> addresses[i]`, in input order
    ///
    /// Emits `OperatorsCleared` with the previous count, then one
    /// `OperatorDefined` per new binding. The length check runs before the
    /// owner check, so mismatched input is `InvalidArgument` for any caller.
    /// Duplicate names or addresses are accepted as given.
    pub fn define_operators(
        &mut self,
        caller: Address,
        names: &[OperatorName],
        addresses: &[Address],
    ) -> Result<Receipt, RegistryError> {
        if names.len() != addresses.len() {
            return Err(RegistryError::InvalidArgument {
                names: names.len(),
                addresses: addresses.len(),
            });
        }
        ensure_owner(&self.owner, &caller)?;

        let next: Vec<OperatorBinding> = names
            .iter()
            .zip(addresses)
            .map(|(name, address)| OperatorBinding {
                name: *name,
                address: *address,
            })
            .collect();

        let mut receipt = Receipt::single(Event::OperatorsCleared {
            size: self.bindings.len(),
        });
        for binding in &next {
            receipt.push(Event::OperatorDefined {
                name: binding.name,
                address: binding.address,
            });
        }

        let previous = std::mem::replace(&mut self.bindings, next);
        log::info!(
            "Operators redefined: {} cleared, {} defined",
            previous.len(),
            self.bindings.len()
        );

        Ok(receipt)
    }

    /// Number of bindings in the current generation
    pub fn operator_count(&self) -> usize {
        self.bindings.len()
    }

    /// Address bound at `index`, in definition order
    pub fn operator_address(&self, index: usize) -> Result<Address, RegistryError> {
        self.binding(index).map(|binding| binding.address)
    }

    /// Name bound at `index`, in definition order
    pub fn operator_name(&self, index: usize) -> Result<OperatorName, RegistryError> {
        self.binding(index).map(|binding| binding.name)
    }

    pub fn bindings(&self) -> &[OperatorBinding] {
        &self.bindings
    }

    /// Operator check over the current bindings
    pub fn gate(&self) -> AuthorizationGate<'_> {
        AuthorizationGate::new(&self.bindings)
    }

    fn binding(&self, index: usize) -> Result<&OperatorBinding, RegistryError> {
        self.bindings
            .get(index)
            .ok_or(RegistryError::IndexOutOfRange {
                index,
                count: self.bindings.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(n: u8) -> Address {
        Address::with_last_byte(n)
    }

    fn name(tag: &str) -> OperatorName {
        OperatorName::from_tag(tag).unwrap()
    }

    fn create_test_registry() -> OperatorRegistry {
        OperatorRegistry::new(account(0))
    }

    #[test]
    fn test_registry_starts_empty() {
        let registry = create_test_registry();

        assert_eq!(registry.operator_count(), 0);
        assert_eq!(registry.owner(), account(0));
        assert_eq!(
            registry.operator_address(0),
            Err(RegistryError::IndexOutOfRange { index: 0, count: 0 })
        );
    }

    #[test]
    fn test_define_single_operator() {
        let mut registry = create_test_registry();

        let receipt = registry
            .define_operators(account(0), &[name("OPERATOR")], &[account(2)])
            .unwrap();

        assert_eq!(
            receipt.logs,
            vec![
                Event::OperatorsCleared { size: 0 },
                Event::OperatorDefined {
                    name: name("OPERATOR"),
                    address: account(2),
                },
            ]
        );
        assert_eq!(registry.operator_count(), 1);
    }

    #[test]
    fn test_define_operators_in_order() {
        let mut registry = create_test_registry();

        let receipt = registry
            .define_operators(
                account(0),
                &[name("OPERATOR1"), name("OPERATOR2")],
                &[account(2), account(3)],
            )
            .unwrap();

        assert_eq!(receipt.len(), 3);
        assert_eq!(receipt.logs[0], Event::OperatorsCleared { size: 0 });
        assert_eq!(
            receipt.logs[1],
            Event::OperatorDefined {
                name: name("OPERATOR1"),
                address: account(2),
            }
        );
        assert_eq!(
            receipt.logs[2],
            Event::OperatorDefined {
                name: name("OPERATOR2"),
                address: account(3),
            }
        );
        assert_eq!(registry.operator_name(1).unwrap(), name("OPERATOR2"));
    }

    #[test]
    fn test_define_empty_set() {
        let mut registry = create_test_registry();

        let receipt = registry.define_operators(account(0), &[], &[]).unwrap();

        assert_eq!(receipt.logs, vec![Event::OperatorsCleared { size: 0 }]);
        assert_eq!(registry.operator_count(), 0);
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let mut registry = create_test_registry();
        registry
            .define_operators(account(0), &[name("LEGAL")], &[account(1)])
            .unwrap();

        let result = registry.define_operators(
            account(0),
            &[name("OPERATOR"), name("OPERATOR2")],
            &[account(2)],
        );

        assert_eq!(
            result,
            Err(RegistryError::InvalidArgument {
                names: 2,
                addresses: 1,
            })
        );
        assert_eq!(registry.operator_count(), 1);
        assert_eq!(registry.operator_address(0).unwrap(), account(1));
    }

    #[test]
    fn test_mismatched_lengths_rejected_for_any_caller() {
        let mut registry = create_test_registry();

        let result = registry.define_operators(account(4), &[name("OPERATOR")], &[]);

        assert!(matches!(result, Err(RegistryError::InvalidArgument { .. })));
    }

    #[test]
    fn test_non_owner_rejected() {
        let mut registry = create_test_registry();
        registry
            .define_operators(account(0), &[name("LEGAL")], &[account(1)])
            .unwrap();

        let result = registry.define_operators(account(4), &[name("OPERATOR")], &[account(2)]);

        assert_eq!(result, Err(RegistryError::Unauthorized(account(4))));
        assert_eq!(registry.bindings().len(), 1);
        assert_eq!(registry.operator_address(0).unwrap(), account(1));
    }

    #[test]
    fn test_redefinition_replaces_everything() {
        let mut registry = create_test_registry();
        registry
            .define_operators(
                account(0),
                &[name("LEGAL"), name("REGULATOR")],
                &[account(1), account(2)],
            )
            .unwrap();

        assert_eq!(registry.operator_count(), 2);
        assert_eq!(registry.operator_address(0).unwrap(), account(1));
        assert_eq!(registry.operator_address(1).unwrap(), account(2));

        let receipt = registry
            .define_operators(account(0), &[name("OPERATOR")], &[account(2)])
            .unwrap();

        assert_eq!(
            receipt.logs,
            vec![
                Event::OperatorsCleared { size: 2 },
                Event::OperatorDefined {
                    name: name("OPERATOR"),
                    address: account(2),
                },
            ]
        );
        assert_eq!(registry.operator_count(), 1);
        assert_eq!(registry.operator_address(0).unwrap(), account(2));
        assert!(registry.operator_address(1).is_err());
    }

    #[test]
    fn test_duplicates_kept_as_given() {
        let mut registry = create_test_registry();

        registry
            .define_operators(
                account(0),
                &[name("LEGAL"), name("LEGAL")],
                &[account(1), account(1)],
            )
            .unwrap();

        assert_eq!(registry.operator_count(), 2);
        assert_eq!(registry.operator_address(1).unwrap(), account(1));
    }
}
