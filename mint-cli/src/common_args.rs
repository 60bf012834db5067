// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{fs, path::PathBuf};

use alloy::{
    primitives::{Address, FixedBytes},
    signers::{
        local::{LocalSigner, PrivateKeySigner},
        Signer,
    },
};
use eyre::{eyre, Context};
use mint_tools::{config::MintConfig, core::wallet::RpcWallet, utils::decode0x};

use crate::constants::PRIVATE_KEY_ENV;

#[derive(Debug, clap::Args)]
pub struct AuthArgs {
    /// File path to a text file containing a hex-encoded private key
    #[arg(long)]
    private_key_path: Option<PathBuf>,
    /// Private key as a hex string. Warning: this exposes your key to shell history
    #[arg(long, env = PRIVATE_KEY_ENV, hide_env_values = true)]
    private_key: Option<String>,
    /// Path to an Ethereum wallet keystore file (e.g. clef)
    #[arg(long)]
    keystore_path: Option<String>,
    /// Keystore password file
    #[arg(long)]
    keystore_password_path: Option<PathBuf>,
}

impl AuthArgs {
    /// The configured signer, or `None` when no key source was given.
    fn build_signer(&self, chain_id: u64) -> eyre::Result<Option<PrivateKeySigner>> {
        if let Some(key) = &self.private_key {
            if key.is_empty() {
                return Err(eyre!("empty private key"));
            }
            return parse_key(key, chain_id).map(Some);
        }

        if let Some(file) = &self.private_key_path {
            let key = fs::read_to_string(file).wrap_err("could not open private key file")?;
            return parse_key(&key, chain_id).map(Some);
        }

        let Some(keystore) = &self.keystore_path else {
            return Ok(None);
        };
        let password = self
            .keystore_password_path
            .as_ref()
            .map(fs::read_to_string)
            .unwrap_or(Ok("".into()))?;
        let signer = LocalSigner::decrypt_keystore(keystore, password.trim_end())?
            .with_chain_id(Some(chain_id));
        Ok(Some(signer))
    }

    /// Wallet on the configured endpoint, signing if a key source was given.
    pub fn wallet(&self, config: &MintConfig) -> eyre::Result<RpcWallet> {
        Ok(match self.build_signer(config.chain_id)? {
            Some(signer) => RpcWallet::with_signer(&config.endpoint, signer),
            None => RpcWallet::read_only(&config.endpoint),
        })
    }
}

fn parse_key(key: &str, chain_id: u64) -> eyre::Result<PrivateKeySigner> {
    let bytes = decode0x(key)?;
    if bytes.len() != 32 {
        return Err(eyre!("private key must be 32 bytes, got {}", bytes.len()));
    }
    let priv_key_bytes: FixedBytes<32> = FixedBytes::from_slice(&bytes);
    Ok(PrivateKeySigner::from_bytes(&priv_key_bytes)?.with_chain_id(Some(chain_id)))
}

#[derive(Debug, clap::Args)]
pub struct ProviderArgs {
    /// JSON-RPC endpoint of the network the collection lives on
    #[arg(short, long)]
    endpoint: Option<String>,
    /// Chain id the wallet must report
    #[arg(long)]
    chain_id: Option<u64>,
}

impl ProviderArgs {
    pub fn apply(&self, config: &mut MintConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint.clone_from(endpoint);
        }
        if let Some(chain_id) = self.chain_id {
            config.chain_id = chain_id;
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct SaleArgs {
    /// Address of the deployed collection contract
    #[arg(long)]
    contract_address: Option<Address>,
    /// Ether sent with each mint
    #[arg(long)]
    mint_price: Option<String>,
    /// Seconds between poll ticks
    #[arg(long)]
    poll_interval_secs: Option<u64>,
}

impl SaleArgs {
    pub fn apply(&self, config: &mut MintConfig) {
        if let Some(address) = self.contract_address {
            config.contract_address = Some(address);
        }
        if let Some(price) = &self.mint_price {
            config.mint_price.clone_from(price);
        }
        if let Some(secs) = self.poll_interval_secs {
            config.poll_interval_secs = secs;
        }
    }
}

/// Flags shared by every command that talks to the collection contract.
#[derive(Debug, clap::Args)]
pub struct SessionArgs {
    #[command(flatten)]
    pub auth: AuthArgs,
    #[command(flatten)]
    pub provider: ProviderArgs,
    #[command(flatten)]
    pub sale: SaleArgs,
}

impl SessionArgs {
    pub fn apply(&self, config: &mut MintConfig) {
        self.provider.apply(config);
        self.sale.apply(config);
    }
}
