//! Serializable kernel calls
//!
//! Each variant names one mutating operation. The caller identity travels
//! next to the call, never inside it.

use crate::core::{decimal, Address, Amount, OperatorName};
use serde::{Deserialize, Serialize};

/// A mutating operation against a [`GovernedToken`](super::GovernedToken)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Call {
    Transfer {
        to: Address,
        #[serde(with = "decimal")]
        value: Amount,
    },
    Approve {
        spender: Address,
        #[serde(with = "decimal")]
        value: Amount,
    },
    TransferFrom {
        from: Address,
        to: Address,
        #[serde(with = "decimal")]
        value: Amount,
    },
    IncreaseApproval {
        spender: Address,
        #[serde(with = "decimal")]
        value: Amount,
    },
    DecreaseApproval {
        spender: Address,
        #[serde(with = "decimal")]
        value: Amount,
    },
    DefineOperators {
        names: Vec<OperatorName>,
        addresses: Vec<Address>,
    },
    /// Operator-gated
    Mint {
        to: Address,
        #[serde(with = "decimal")]
        value: Amount,
    },
    /// Operator-gated
    Burn {
        from: Address,
        #[serde(with = "decimal")]
        value: Amount,
    },
}

impl Call {
    pub fn name(&self) -> &'static str {
        match self {
            Call::Transfer { .. } => "transfer",
            Call::Approve { .. } => "approve",
            Call::TransferFrom { .. } => "transfer_from",
            Call::IncreaseApproval { .. } => "increase_approval",
            Call::DecreaseApproval { .. } => "decrease_approval",
            Call::DefineOperators { .. } => "define_operators",
            Call::Mint { .. } => "mint",
            Call::Burn { .. } => "burn",
        }
    }
}

/// A call together with the identity invoking it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRequest {
    pub caller: Address,
    pub call: Call,
}
