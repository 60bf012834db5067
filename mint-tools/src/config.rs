// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Settings file for the minting client.
//!
//! Every key is optional. A missing file means defaults; command line flags are applied on top
//! by the caller.

use std::{fs, net::SocketAddr, path::Path, time::Duration};

use alloy::primitives::{
    utils::{parse_ether, UnitsError},
    Address, U256,
};
use serde::{Deserialize, Serialize};

use crate::core::{
    metadata::MetadataConfig, network::RINKEBY_CHAIN_ID, sale::EndComparison,
    session::SessionConfig, view::DEFAULT_MAX_SUPPLY,
};

/// Settings file picked up from the working directory when no path is given.
pub const FILENAME: &str = "unity-mint.toml";

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8545";
pub const DEFAULT_MINT_PRICE: &str = "0.01";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_METADATA_BIND: &str = "127.0.0.1:3000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml read error: {0}")]
    TomlRead(#[from] toml::de::Error),
    #[error("invalid mint price {price:?}: {source}")]
    MintPrice { price: String, source: UnitsError },
    #[error("poll interval must be at least one second")]
    PollInterval,
    #[error("missing {0}, set it in {FILENAME} or pass it on the command line")]
    Missing(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct MintConfig {
    pub endpoint: String,
    pub chain_id: u64,
    pub contract_address: Option<Address>,
    /// Ether amount sent with each mint, as a decimal string.
    pub mint_price: String,
    pub poll_interval_secs: u64,
    pub presale_end_comparison: EndComparison,
    pub max_supply: u64,
    pub metadata: MetadataSettings,
    pub deploy: DeploySettings,
}

impl Default for MintConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            chain_id: RINKEBY_CHAIN_ID,
            contract_address: None,
            mint_price: DEFAULT_MINT_PRICE.into(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            presale_end_comparison: EndComparison::default(),
            max_supply: DEFAULT_MAX_SUPPLY,
            metadata: MetadataSettings::default(),
            deploy: DeploySettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MetadataSettings {
    pub bind: SocketAddr,
    #[serde(flatten)]
    pub token: MetadataConfig,
}

impl Default for MetadataSettings {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            token: MetadataConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DeploySettings {
    pub metadata_url: Option<String>,
    pub whitelist: Option<Address>,
    pub max_fee_per_gas_gwei: Option<u128>,
}

impl MintConfig {
    /// Reads the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Reads `path` if given, else [`FILENAME`] if it exists, else returns defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(FILENAME).exists() => Self::load(FILENAME),
            None => Ok(Self::default()),
        }
    }

    pub fn mint_price_wei(&self) -> Result<U256, ConfigError> {
        parse_ether(self.mint_price.trim()).map_err(|source| ConfigError::MintPrice {
            price: self.mint_price.clone(),
            source,
        })
    }

    pub fn poll_interval(&self) -> Result<Duration, ConfigError> {
        match self.poll_interval_secs {
            0 => Err(ConfigError::PollInterval),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    pub fn contract_address(&self) -> Result<Address, ConfigError> {
        self.contract_address.ok_or(ConfigError::Missing("contract address"))
    }

    pub fn session_config(&self) -> Result<SessionConfig, ConfigError> {
        Ok(SessionConfig::builder()
            .required_chain_id(self.chain_id)
            .mint_price(self.mint_price_wei()?)
            .poll_interval(self.poll_interval()?)
            .end_comparison(self.presale_end_comparison)
            .build())
    }
}
