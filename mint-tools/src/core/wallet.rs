// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! [`Wallet`] backed by a JSON-RPC endpoint and an optional local signing key.

use alloy::{
    network::EthereumWallet,
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};

use super::signer::{Wallet, WalletError};
use crate::utils::color::Color;

#[derive(Debug, Clone)]
pub struct RpcWallet {
    endpoint: String,
    signer: Option<(EthereumWallet, Address)>,
}

impl RpcWallet {
    /// Wallet that can read but never sign.
    pub fn read_only(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            signer: None,
        }
    }

    pub fn with_signer(endpoint: impl Into<String>, signer: PrivateKeySigner) -> Self {
        let address = signer.address();
        Self {
            endpoint: endpoint.into(),
            signer: Some((EthereumWallet::new(signer), address)),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn address(&self) -> Option<Address> {
        self.signer.as_ref().map(|(_, address)| *address)
    }
}

impl Wallet for RpcWallet {
    type Provider = DynProvider;

    async fn connect(&self) -> Result<DynProvider, WalletError> {
        info!(@grey, "connecting to {}", self.endpoint.lavender());
        let provider = match &self.signer {
            Some((wallet, _)) => DynProvider::new(
                ProviderBuilder::new()
                    .wallet(wallet.clone())
                    .connect(&self.endpoint)
                    .await?,
            ),
            None => DynProvider::new(ProviderBuilder::new().connect(&self.endpoint).await?),
        };
        Ok(provider)
    }

    async fn chain_id(&self, provider: &DynProvider) -> Result<u64, WalletError> {
        Ok(provider.get_chain_id().await?)
    }

    async fn signer_address(&self, _provider: &DynProvider) -> Result<Address, WalletError> {
        self.address().ok_or(WalletError::NoSigner)
    }
}
