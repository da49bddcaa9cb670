//! Capability guards
//!
//! Pure checks with no side effects. Protected operations call them before
//! touching any state and propagate the typed failure.

use crate::core::{Address, OperatorName};
use crate::governance::operator::{OperatorBinding, RegistryError};

/// Decides whether a caller currently holds the operator capability
#[derive(Clone, Copy, Debug)]
pub struct AuthorizationGate<'a> {
    bindings: &'a [OperatorBinding],
}

impl<'a> AuthorizationGate<'a> {
    pub fn new(bindings: &'a [OperatorBinding]) -> Self {
        Self { bindings }
    }

    /// True if `address` is bound under any name
    pub fn is_operator(&self, address: &Address) -> bool {
        self.bindings.iter().any(|binding| binding.address == *address)
    }

    /// Fail with `Unauthorized` unless `caller` is an operator
    pub fn require_operator(&self, caller: &Address) -> Result<(), RegistryError> {
        if self.is_operator(caller) {
            Ok(())
        } else {
            Err(RegistryError::Unauthorized(*caller))
        }
    }

    /// Every name `address` is bound under
    pub fn names_of(&self, address: &Address) -> Vec<OperatorName> {
        self.bindings
            .iter()
            .filter(|binding| binding.address == *address)
            .map(|binding| binding.name)
            .collect()
    }
}

/// Fail with `Unauthorized` unless `caller` is the owner
pub fn ensure_owner(owner: &Address, caller: &Address) -> Result<(), RegistryError> {
    if owner == caller {
        Ok(())
    } else {
        Err(RegistryError::Unauthorized(*caller))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::governance::OperatorRegistry;

    fn account(n: u8) -> Address {
        Address::with_last_byte(n)
    }

    fn registry_with_authorities() -> OperatorRegistry {
        let mut registry = OperatorRegistry::new(account(0));
        registry
            .define_operators(
                account(0),
                &[
                    OperatorName::from_tag("LEGAL").unwrap(),
                    OperatorName::from_tag("REGULATOR").unwrap(),
                ],
                &[account(1), account(2)],
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_every_bound_address_passes() {
        let registry = registry_with_authorities();
        let gate = registry.gate();

        assert!(gate.require_operator(&account(1)).is_ok());
        assert!(gate.require_operator(&account(2)).is_ok());
    }

    #[test]
    fn test_unbound_address_rejected() {
        let registry = registry_with_authorities();

        assert_eq!(
            registry.gate().require_operator(&account(0)),
            Err(RegistryError::Unauthorized(account(0)))
        );
        assert!(!registry.gate().is_operator(&account(9)));
    }

    #[test]
    fn test_empty_registry_has_no_operators() {
        let registry = OperatorRegistry::new(account(0));
        assert!(!registry.gate().is_operator(&account(0)));
    }

    #[test]
    fn test_gate_follows_latest_generation() {
        let mut registry = registry_with_authorities();
        registry
            .define_operators(
                account(0),
                &[OperatorName::from_tag("OPERATOR").unwrap()],
                &[account(2)],
            )
            .unwrap();

        let gate = registry.gate();
        assert!(!gate.is_operator(&account(1)));
        assert!(gate.is_operator(&account(2)));
        assert_eq!(
            gate.names_of(&account(2)),
            vec![OperatorName::from_tag("OPERATOR").unwrap()]
        );
    }

    #[test]
    fn test_owner_guard() {
        assert!(ensure_owner(&account(0), &account(0)).is_ok());
        assert_eq!(
            ensure_owner(&account(0), &account(4)),
            Err(RegistryError::Unauthorized(account(4)))
        );
    }
}
