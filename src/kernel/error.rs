//! Errors surfaced by the composed kernel

use crate::governance::RegistryError;
use crate::token::TokenError;
use thiserror::Error;

/// Any failure of a kernel call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    #[error("Token error: {0}")]
    Token(#[from] TokenError),
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

impl KernelError {
    /// Internal faults, as opposed to ordinary business rejections
    pub fn is_fatal(&self) -> bool {
        matches!(self, KernelError::Token(TokenError::ArithmeticOverflow))
    }

    /// Caller lacked the owner or operator capability
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, KernelError::Registry(RegistryError::Unauthorized(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Address;

    #[test]
    fn test_classification() {
        let overflow = KernelError::from(TokenError::ArithmeticOverflow);
        assert!(overflow.is_fatal());
        assert!(!overflow.is_unauthorized());

        let denied = KernelError::from(RegistryError::Unauthorized(Address::ZERO));
        assert!(denied.is_unauthorized());
        assert!(!denied.is_fatal());

        let shape = KernelError::from(RegistryError::InvalidArgument {
            names: 2,
            addresses: 1,
        });
        assert!(!shape.is_fatal());
        assert!(!shape.is_unauthorized());
    }
}
