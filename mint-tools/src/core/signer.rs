// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Access to the user's wallet.
//!
//! A [`SignerSource`] owns the one wallet connection of a session. The connection is opened on
//! first use and reused afterwards; every handle it gives out has been checked against the
//! required chain.

use std::{future::Future, sync::Arc};

use alloy::primitives::Address;
use tokio::sync::OnceCell;

use super::{
    diagnostics::Notifier,
    network::{check_chain_id, network_name, NetworkError},
};
use crate::utils::color::DebugColor;

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("failed to connect wallet: {0}")]
    Connect(String),
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),
    #[error("wallet has no signing key")]
    NoSigner,
}

#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    #[error("{0}")]
    Network(#[from] NetworkError),
    #[error("{0}")]
    Wallet(#[from] WalletError),
}

/// Wallet and provider capability the session acquires but does not implement.
pub trait Wallet: Send + Sync + 'static {
    /// Connection to the chain through the wallet.
    type Provider: Clone + Send + Sync + 'static;

    /// Opens the wallet connection. May prompt the user.
    fn connect(&self) -> impl Future<Output = Result<Self::Provider, WalletError>> + Send;

    /// Chain the wallet is currently on.
    fn chain_id(
        &self,
        provider: &Self::Provider,
    ) -> impl Future<Output = Result<u64, WalletError>> + Send;

    /// Address of the signing identity behind the connection.
    fn signer_address(
        &self,
        provider: &Self::Provider,
    ) -> impl Future<Output = Result<Address, WalletError>> + Send;
}

/// Read-only access to the chain.
#[derive(Debug, Clone)]
pub struct ProviderHandle<P> {
    provider: P,
    chain_id: u64,
}

impl<P> ProviderHandle<P> {
    pub fn new(provider: P, chain_id: u64) -> Self {
        Self { provider, chain_id }
    }

    pub fn inner(&self) -> &P {
        &self.provider
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

/// Access that can also sign and submit transactions.
#[derive(Debug, Clone)]
pub struct SignerHandle<P> {
    provider: P,
    address: Address,
}

impl<P> SignerHandle<P> {
    pub fn new(provider: P, address: Address) -> Self {
        Self { provider, address }
    }

    pub fn inner(&self) -> &P {
        &self.provider
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

pub struct SignerSource<W: Wallet> {
    wallet: W,
    connection: OnceCell<W::Provider>,
    required_chain_id: u64,
    notifier: Arc<dyn Notifier>,
}

impl<W: Wallet> SignerSource<W> {
    pub fn new(wallet: W, required_chain_id: u64, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            wallet,
            connection: OnceCell::new(),
            required_chain_id,
            notifier,
        }
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn required_chain_id(&self) -> u64 {
        self.required_chain_id
    }

    pub fn is_connected(&self) -> bool {
        self.connection.initialized()
    }

    /// Read-only handle on the required chain.
    pub async fn provider(&self) -> Result<ProviderHandle<W::Provider>, SignerError> {
        let (provider, chain_id) = self.checked_connection().await?;
        Ok(ProviderHandle::new(provider, chain_id))
    }

    /// Signing handle on the required chain.
    pub async fn signer(&self) -> Result<SignerHandle<W::Provider>, SignerError> {
        let (provider, _) = self.checked_connection().await?;
        let address = self.wallet.signer_address(&provider).await?;
        Ok(SignerHandle::new(provider, address))
    }

    async fn checked_connection(&self) -> Result<(W::Provider, u64), SignerError> {
        let provider = self
            .connection
            .get_or_try_init(|| async {
                let provider = self.wallet.connect().await?;
                debug!(@grey, "wallet connected");
                Ok::<_, WalletError>(provider)
            })
            .await?
            .clone();

        let chain_id = self.wallet.chain_id(&provider).await?;
        if let Err(err) = check_chain_id(self.required_chain_id, chain_id) {
            self.notifier.alert(&format!(
                "Change the network to {}",
                network_name(self.required_chain_id)
            ));
            debug!(@grey, "rejected wallet on chain {}", chain_id.debug_lavender());
            return Err(err.into());
        }
        Ok((provider, chain_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockWallet, RecordingNotifier, OTHER_ADDRESS};

    fn source(wallet: MockWallet, notifier: &Arc<RecordingNotifier>) -> SignerSource<MockWallet> {
        SignerSource::new(wallet, 4, notifier.clone())
    }

    #[tokio::test]
    async fn connects_once_and_reuses() {
        let notifier = Arc::new(RecordingNotifier::default());
        let wallet = MockWallet::new(4, OTHER_ADDRESS);
        let source = source(wallet, &notifier);
        assert!(!source.is_connected());

        let provider = source.provider().await.unwrap();
        assert_eq!(provider.chain_id(), 4);
        let signer = source.signer().await.unwrap();
        assert_eq!(signer.address(), OTHER_ADDRESS);
        source.provider().await.unwrap();

        assert!(source.is_connected());
        assert_eq!(source.wallet().connects(), 1);
        assert!(notifier.alerts().is_empty());
    }

    #[tokio::test]
    async fn wrong_network_returns_no_handle() {
        let notifier = Arc::new(RecordingNotifier::default());
        let source = source(MockWallet::new(1, OTHER_ADDRESS), &notifier);

        let err = source.provider().await.unwrap_err();
        assert!(matches!(
            err,
            SignerError::Network(NetworkError::WrongNetwork {
                expected: 4,
                actual: 1
            })
        ));
        assert!(source.signer().await.is_err());
        assert_eq!(notifier.alerts(), vec!["Change the network to Rinkeby"; 2]);
    }

    #[tokio::test]
    async fn switching_to_required_chain_recovers() {
        let notifier = Arc::new(RecordingNotifier::default());
        let source = source(MockWallet::new(1, OTHER_ADDRESS), &notifier);
        assert!(source.provider().await.is_err());

        source.wallet().switch_chain(4);
        assert!(source.provider().await.is_ok());
        assert_eq!(source.wallet().connects(), 1);
    }

    #[tokio::test]
    async fn failed_connect_is_retried() {
        let notifier = Arc::new(RecordingNotifier::default());
        let wallet = MockWallet::new(4, OTHER_ADDRESS);
        wallet.fail_next_connect();
        let source = source(wallet, &notifier);

        assert!(matches!(
            source.provider().await,
            Err(SignerError::Wallet(WalletError::Connect(_)))
        ));
        assert!(!source.is_connected());
        assert!(source.provider().await.is_ok());
        assert_eq!(source.wallet().connects(), 2);
    }

    #[tokio::test]
    async fn read_only_wallet_has_no_signer() {
        let notifier = Arc::new(RecordingNotifier::default());
        let source = source(MockWallet::read_only(4), &notifier);
        assert!(source.provider().await.is_ok());
        assert!(matches!(
            source.signer().await,
            Err(SignerError::Wallet(WalletError::NoSigner))
        ));
    }
}
