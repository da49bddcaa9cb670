//! Primitive value types shared by the ledger and the operator registry
//!
//! Amounts are 256-bit unsigned integers, addresses are 20-byte opaque
//! identifiers and operator names are 32-byte right-padded tags.

use alloy_primitives::{hex, B256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use alloy_primitives::Address;

/// Monetary and count values (balances, allowances, supply)
pub type Amount = U256;

/// Width of an operator name in bytes
pub const OPERATOR_NAME_LEN: usize = 32;

/// Errors raised while parsing primitive values from text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("Operator name too long: {len} bytes, max {OPERATOR_NAME_LEN}")]
    NameTooLong { len: usize },
    #[error("Invalid operator name: {0}")]
    InvalidName(String),
}

/// Parse an amount from a decimal string or a `0x`-prefixed hex string
pub fn parse_amount(input: &str) -> Result<Amount, ParseError> {
    let input = input.trim();
    let (digits, radix) = match input.strip_prefix("0x") {
        Some(digits) => (digits, 16),
        None => (input, 10),
    };
    if digits.is_empty() {
        return Err(ParseError::InvalidAmount(input.to_string()));
    }
    U256::from_str_radix(digits, radix).map_err(|_| ParseError::InvalidAmount(input.to_string()))
}

/// Parse a 20-byte hex address
pub fn parse_address(input: &str) -> Result<Address, ParseError> {
    Address::from_str(input.trim()).map_err(|_| ParseError::InvalidAddress(input.to_string()))
}

/// `10^decimals`, the number of base units in one whole token
pub fn unit(decimals: u8) -> Option<Amount> {
    U256::from(10u64).checked_pow(U256::from(decimals))
}

/// Fixed-width identifier naming an operator binding.
///
/// Built from a short ASCII tag, right-padded with zero bytes
/// (`"LEGAL"` becomes `0x4c4547414c000…`).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct OperatorName(B256);

impl OperatorName {
    /// Right-pad a short tag to the full identifier width
    pub fn from_tag(tag: &str) -> Result<Self, ParseError> {
        let bytes = tag.as_bytes();
        if bytes.len() > OPERATOR_NAME_LEN {
            return Err(ParseError::NameTooLong { len: bytes.len() });
        }
        Ok(Self(B256::right_padding_from(bytes)))
    }

    /// Wrap raw identifier bytes
    pub const fn from_bytes(bytes: B256) -> Self {
        Self(bytes)
    }

    /// Raw identifier bytes
    pub fn as_bytes(&self) -> &B256 {
        &self.0
    }

    /// The tag this name was padded from, if it is printable ASCII
    pub fn tag(&self) -> Option<&str> {
        let bytes = self.0.as_slice();
        let end = bytes.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
        let tag = &bytes[..end];
        if tag.is_empty() || !tag.iter().all(|b| b.is_ascii_graphic()) {
            return None;
        }
        std::str::from_utf8(tag).ok()
    }
}

impl FromStr for OperatorName {
    type Err = ParseError;

    /// Accepts a full `0x` 32-byte hex identifier or a short tag
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.starts_with("0x") && input.len() == 2 + OPERATOR_NAME_LEN * 2 {
            return B256::from_str(input)
                .map(Self)
                .map_err(|_| ParseError::InvalidName(input.to_string()));
        }
        Self::from_tag(input)
    }
}

impl TryFrom<String> for OperatorName {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OperatorName> for String {
    fn from(name: OperatorName) -> Self {
        name.to_string()
    }
}

impl fmt::Display for OperatorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag() {
            Some(tag) => f.write_str(tag),
            None => f.write_str(&hex::encode_prefixed(self.0)),
        }
    }
}

/// Serde adapter writing amounts as decimal strings.
///
/// Reads decimal strings, `0x` hex strings or plain JSON integers.
pub mod decimal {
    use super::{parse_amount, Amount};
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(value: &Amount, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Amount, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }

    struct AmountVisitor;

    impl<'de> Visitor<'de> for AmountVisitor {
        type Value = Amount;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an unsigned integer or a decimal/hex string")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Amount, E> {
            Ok(Amount::from(value))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Amount, E> {
            parse_amount(value).map_err(E::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1000").unwrap(), U256::from(1000u64));
        assert_eq!(parse_amount("0x3e8").unwrap(), U256::from(1000u64));
        assert_eq!(
            parse_amount("10000000000000000000000").unwrap(),
            U256::from(10_000u64) * unit(18).unwrap()
        );
        assert!(parse_amount("-1").is_err());
        assert!(parse_amount("ten").is_err());

        // No digits at all is malformed, not zero
        assert!(parse_amount("").is_err());
        assert!(parse_amount("   ").is_err());
        assert!(parse_amount("0x").is_err());
        assert_eq!(parse_amount("0").unwrap(), U256::ZERO);
    }

    #[test]
    fn test_unit() {
        assert_eq!(unit(0), Some(U256::from(1u64)));
        assert_eq!(unit(18), Some(U256::from(1_000_000_000_000_000_000u64)));
        assert_eq!(unit(255), None);
    }

    #[test]
    fn test_operator_name_padding() {
        let name = OperatorName::from_tag("LEGAL").unwrap();
        let bytes = name.as_bytes().as_slice();

        assert_eq!(&bytes[..5], b"LEGAL");
        assert!(bytes[5..].iter().all(|b| *b == 0));
        assert_eq!(name.tag(), Some("LEGAL"));
        assert_eq!(name.to_string(), "LEGAL");
    }

    #[test]
    fn test_operator_name_too_long() {
        let tag = "X".repeat(33);
        assert_eq!(
            OperatorName::from_tag(&tag),
            Err(ParseError::NameTooLong { len: 33 })
        );
        assert!(OperatorName::from_tag(&"X".repeat(32)).is_ok());
    }

    #[test]
    fn test_operator_name_from_hex() {
        let hex_name = format!("0x{}", "4f50455241544f52".to_string() + &"0".repeat(48));
        let name: OperatorName = hex_name.parse().unwrap();
        assert_eq!(name, OperatorName::from_tag("OPERATOR").unwrap());

        // Non-printable identifiers display as hex
        let raw = OperatorName::from_bytes(B256::repeat_byte(0x01));
        assert!(raw.tag().is_none());
        assert_eq!(raw.to_string(), format!("0x{}", "01".repeat(32)));
    }

    #[test]
    fn test_operator_name_serde() {
        let name = OperatorName::from_tag("REGULATOR").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"REGULATOR\"");

        let back: OperatorName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
    }

    #[test]
    fn test_decimal_serde() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            #[serde(with = "decimal")]
            value: Amount,
        }

        let json = serde_json::to_string(&Wrapper {
            value: U256::from(1500u64),
        })
        .unwrap();
        assert_eq!(json, r#"{"value":"1500"}"#);

        let from_number: Wrapper = serde_json::from_str(r#"{"value":42}"#).unwrap();
        assert_eq!(from_number.value, U256::from(42u64));

        let from_hex: Wrapper = serde_json::from_str(r#"{"value":"0x10"}"#).unwrap();
        assert_eq!(from_hex.value, U256::from(16u64));

        assert!(serde_json::from_str::<Wrapper>(r#"{"value":""}"#).is_err());
    }
}
