//! # Runtime Configuration
//!
//! Deployment configuration with defaults and environment overrides.
//!
//! | Variable | Field | Format |
//! |----------|-------|--------|
//! | `CC_NETWORK_ID` | `network.network_id` | decimal `u64` |
//! | `CC_OPERATOR` | `identities.operator` | 20-byte hex |
//! | `CC_REGISTRY_ADDRESS` | `identities.registry` | 20-byte hex |
//! | `CC_LEDGER_ADDRESS` | `identities.ledger` | 20-byte hex |
//! | `CC_REENTRANCY_GUARD` | `ledger.enforce_reentrancy_guard` | `true`/`false`/`1`/`0` |
//! | `CC_LOG_LEVEL` | `log_level` | `tracing` filter directive |

use cc_02_custody_ledger::LedgerConfig;
use serde::{Deserialize, Serialize};
use shared_types::{Address, NetworkId};
use std::str::FromStr;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An environment variable could not be parsed.
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// A required identity is the null address.
    #[error("{0} identity must not be the null address")]
    NullIdentity(&'static str),

    /// The ledger and the registry were given the same identity.
    #[error("ledger and registry share identity {0}")]
    SharedIdentity(Address),

    /// Network id 0 is reserved.
    #[error("network id must be non-zero")]
    ZeroNetworkId,
}

/// Network configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Identifier folded into every commitment.
    pub network_id: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self { network_id: 1 }
    }
}

impl NetworkConfig {
    /// The configured network id.
    #[must_use]
    pub fn id(&self) -> NetworkId {
        NetworkId(self.network_id)
    }
}

/// Identities of the deployment participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Caller of both `initialize` operations.
    pub operator: Address,
    /// Registry identity.
    pub registry: Address,
    /// Ledger identity.
    pub ledger: Address,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            operator: Address::from_low_u64(0x0100),
            registry: Address::from_low_u64(0x0A01),
            ledger: Address::from_low_u64(0x0C01),
        }
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Network configuration.
    pub network: NetworkConfig,
    /// Participant identities.
    pub identities: IdentityConfig,
    /// Ledger settings.
    pub ledger: LedgerConfig,
    /// Fallback log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            identities: IdentityConfig::default(),
            ledger: LedgerConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Defaults overridden by `CC_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `CC_*` key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("CC_NETWORK_ID") {
            config.network.network_id = parse_value("CC_NETWORK_ID", &value)?;
        }
        if let Some(value) = lookup("CC_OPERATOR") {
            config.identities.operator = parse_value("CC_OPERATOR", &value)?;
        }
        if let Some(value) = lookup("CC_REGISTRY_ADDRESS") {
            config.identities.registry = parse_value("CC_REGISTRY_ADDRESS", &value)?;
        }
        if let Some(value) = lookup("CC_LEDGER_ADDRESS") {
            config.identities.ledger = parse_value("CC_LEDGER_ADDRESS", &value)?;
        }
        if let Some(value) = lookup("CC_REENTRANCY_GUARD") {
            config.ledger.enforce_reentrancy_guard = parse_flag("CC_REENTRANCY_GUARD", &value)?;
        }
        if let Some(value) = lookup("CC_LOG_LEVEL") {
            config.log_level = value;
        }

        Ok(config)
    }

    /// Rejects configurations no deployment can start from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.network.network_id == 0 {
            return Err(ConfigError::ZeroNetworkId);
        }
        let ids = &self.identities;
        for (role, identity) in [
            ("operator", ids.operator),
            ("registry", ids.registry),
            ("ledger", ids.ledger),
        ] {
            if identity.is_zero() {
                return Err(ConfigError::NullIdentity(role));
            }
        }
        if ids.ledger == ids.registry {
            return Err(ConfigError::SharedIdentity(ids.ledger));
        }
        Ok(())
    }
}

fn parse_value<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}
