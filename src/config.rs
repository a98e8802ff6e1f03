// src/config.rs
//! Runtime configuration.
//!
//! Sources, later ones overriding earlier ones:
//! 1. Built-in defaults
//! 2. `registry.toml` in the working directory (optional)
//! 3. Environment variables prefixed with `REGISTRY_`, e.g.
//!    `REGISTRY_AUTHORITY=0x...`, `REGISTRY_BIND_ADDRESS=0.0.0.0:3000`
//!
//! Call `dotenv().ok()` before [`Settings::load`] to pick up a `.env` file.

use crate::contracts::credential_registry::{DEFAULT_NAME, DEFAULT_SYMBOL};
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, Environment, File};
use ethers_core::types::Address;
use serde::Deserialize;
use std::net::SocketAddr;

/// Registry deployment settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Issuing authority, fixed for the lifetime of the registry
    pub authority: Address,

    /// Socket address the API server binds to
    pub bind_address: SocketAddr,

    /// Collection name reported by the registry
    pub name: String,

    /// Collection symbol reported by the registry
    pub symbol: String,

    /// Default `env_logger` filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Settings {
    /// Loads settings from the file and environment sources.
    ///
    /// # Errors
    /// Fails if `authority` is missing or any value is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::defaults(Config::builder())?
            .add_source(File::with_name("registry").required(false))
            .add_source(Environment::with_prefix("REGISTRY"))
            .build()?;
        Self::from_config(config)
    }

    /// Deserializes settings from an already built configuration.
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        config.try_deserialize()
    }

    /// Applies the built-in defaults to a configuration builder.
    pub fn defaults(builder: ConfigBuilder<DefaultState>) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        builder
            .set_default("bind_address", "127.0.0.1:3000")?
            .set_default("name", DEFAULT_NAME)?
            .set_default("symbol", DEFAULT_SYMBOL)?
            .set_default("log_level", "info")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_with_authority() {
        let config = Settings::defaults(Config::builder())
            .unwrap()
            .set_override("authority", "0x00000000000000000000000000000000000000aa")
            .unwrap()
            .build()
            .unwrap();
        let settings = Settings::from_config(config).unwrap();

        assert_eq!(settings.authority, Address::from_low_u64_be(0xaa));
        assert_eq!(settings.bind_address, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(settings.name, "UniversityDegree");
        assert_eq!(settings.symbol, "UDEG");
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_missing_authority_is_an_error() {
        let config = Settings::defaults(Config::builder()).unwrap().build().unwrap();
        assert!(Settings::from_config(config).is_err());
    }

    #[test]
    fn test_malformed_authority_is_an_error() {
        let config = Settings::defaults(Config::builder())
            .unwrap()
            .set_override("authority", "not-an-address")
            .unwrap()
            .build()
            .unwrap();
        assert!(Settings::from_config(config).is_err());
    }
}
