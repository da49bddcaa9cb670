//! Kernel configuration
//!
//! Loaded from an optional JSON file; any omitted field takes its default.

use crate::core::{decimal, unit, Address, Amount};
use crate::token::TokenMetadata;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Token created at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(with = "decimal")]
    pub initial_supply: Amount,
}

impl TokenConfig {
    pub fn metadata(&self) -> TokenMetadata {
        TokenMetadata::new(self.name.clone(), self.symbol.clone(), self.decimals)
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        // 10 000 whole tokens at 18 decimals
        let initial_supply = Amount::from(10_000u64) * unit(18).unwrap_or(Amount::from(1u64));
        Self {
            name: "Test".to_string(),
            symbol: "TST".to_string(),
            decimals: 18,
            initial_supply,
        }
    }
}

/// Kernel configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    pub token: TokenConfig,
    /// Receives the whole initial supply
    pub creator: Address,
    /// Sole address allowed to redefine operators
    pub owner: Address,
    /// Events buffered per subscriber before it starts lagging
    pub event_capacity: usize,
    /// Default port for `kernel serve`
    pub api_port: u16,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            token: TokenConfig::default(),
            creator: Address::with_last_byte(0xa0),
            owner: Address::with_last_byte(0xa0),
            event_capacity: 100,
            api_port: 3000,
        }
    }
}

impl KernelConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load from `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_fixture() {
        let config = KernelConfig::default();

        assert_eq!(config.token.name, "Test");
        assert_eq!(config.token.symbol, "TST");
        assert_eq!(config.token.decimals, 18);
        assert_eq!(
            config.token.initial_supply.to_string(),
            "10000000000000000000000"
        );
        assert_eq!(config.creator, config.owner);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "token": {{ "name": "Franc", "symbol": "CHFX", "initial_supply": "5000" }},
                "owner": "0x00000000000000000000000000000000000000b0",
                "api_port": 8080
            }}"#
        )
        .unwrap();

        let config = KernelConfig::load(file.path()).unwrap();

        assert_eq!(config.token.name, "Franc");
        assert_eq!(config.token.decimals, 18);
        assert_eq!(config.token.initial_supply, Amount::from(5000u64));
        assert_eq!(config.owner, Address::with_last_byte(0xb0));
        assert_eq!(config.creator, Address::with_last_byte(0xa0));
        assert_eq!(config.api_port, 8080);
        assert_eq!(config.event_capacity, 100);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = KernelConfig::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let result = KernelConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_or_default() {
        let config = KernelConfig::load_or_default(None).unwrap();
        assert_eq!(config, KernelConfig::default());
    }
}
