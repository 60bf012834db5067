// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Typed access to the collection contract.
//!
//! Reads have no side effects and may be repeated freely. Submissions are sent exactly once;
//! nothing in this module retries them.

use std::future::Future;

use alloy::{
    network::Ethereum,
    primitives::{Address, TxHash, U256},
    providers::{PendingTransactionBuilder, Provider},
    rpc::types::TransactionReceipt,
    sol,
};

use super::signer::{ProviderHandle, SignerHandle};
use crate::utils::color::DebugColor;

/// EIP-1193 error code returned when the user declines to sign.
pub const USER_REJECTED_CODE: i64 = 4001;

sol! {
    #[sol(rpc)]
    interface ProfitUnity {
        function presaleStarted() external view returns (bool);
        function presaleEnded() external view returns (uint256);
        function owner() external view returns (address);
        function tokenIds() external view returns (uint256);
        function startPresale() external;
        function presaleMint() external payable;
        function mint() external payable;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("transaction rejected by signer: {0}")]
    Rejected(String),
    #[error("transaction reverted{}: {reason}", describe_tx(.tx_hash))]
    Reverted {
        tx_hash: Option<TxHash>,
        reason: String,
    },
    #[error("read failed: {0}")]
    Read(String),
    #[error("failed to submit transaction: {0}")]
    Submit(String),
    #[error("transaction {} did not confirm: {reason}", .tx_hash.debug_red())]
    Unconfirmed { tx_hash: TxHash, reason: String },
    #[error("contract returned out of range value {0}")]
    OutOfRange(U256),
}

/// A submitted transaction that has not been confirmed yet.
pub trait PendingReceipt: Send + 'static {
    fn tx_hash(&self) -> TxHash;

    /// Waits until the transaction is finalized, failing if it reverted.
    fn confirmation(self) -> impl Future<Output = Result<TxHash, LedgerError>> + Send;
}

/// The seven operations the client needs from the collection contract.
pub trait SaleLedger<P>: Send + Sync + 'static {
    type Receipt: PendingReceipt;

    fn presale_started(
        &self,
        provider: &ProviderHandle<P>,
    ) -> impl Future<Output = Result<bool, LedgerError>> + Send;

    /// Unix time in seconds at which the presale ends, zero if unset.
    fn presale_end_timestamp(
        &self,
        provider: &ProviderHandle<P>,
    ) -> impl Future<Output = Result<u64, LedgerError>> + Send;

    fn owner(
        &self,
        provider: &ProviderHandle<P>,
    ) -> impl Future<Output = Result<Address, LedgerError>> + Send;

    fn minted_count(
        &self,
        provider: &ProviderHandle<P>,
    ) -> impl Future<Output = Result<u64, LedgerError>> + Send;

    fn submit_start_presale(
        &self,
        signer: &SignerHandle<P>,
    ) -> impl Future<Output = Result<Self::Receipt, LedgerError>> + Send;

    fn submit_presale_mint(
        &self,
        signer: &SignerHandle<P>,
        value: U256,
    ) -> impl Future<Output = Result<Self::Receipt, LedgerError>> + Send;

    fn submit_public_mint(
        &self,
        signer: &SignerHandle<P>,
        value: U256,
    ) -> impl Future<Output = Result<Self::Receipt, LedgerError>> + Send;
}

/// [`SaleLedger`] over a deployed collection contract.
#[derive(Debug, Clone, Copy)]
pub struct ContractLedger {
    address: Address,
}

impl ContractLedger {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

impl<P: Provider + Clone + 'static> SaleLedger<P> for ContractLedger {
    type Receipt = ChainReceipt;

    async fn presale_started(&self, provider: &ProviderHandle<P>) -> Result<bool, LedgerError> {
        let contract = ProfitUnity::new(self.address, provider.inner());
        contract.presaleStarted().call().await.map_err(read_error)
    }

    async fn presale_end_timestamp(
        &self,
        provider: &ProviderHandle<P>,
    ) -> Result<u64, LedgerError> {
        let contract = ProfitUnity::new(self.address, provider.inner());
        let end = contract.presaleEnded().call().await.map_err(read_error)?;
        to_u64(end)
    }

    async fn owner(&self, provider: &ProviderHandle<P>) -> Result<Address, LedgerError> {
        let contract = ProfitUnity::new(self.address, provider.inner());
        contract.owner().call().await.map_err(read_error)
    }

    async fn minted_count(&self, provider: &ProviderHandle<P>) -> Result<u64, LedgerError> {
        let contract = ProfitUnity::new(self.address, provider.inner());
        let minted = contract.tokenIds().call().await.map_err(read_error)?;
        to_u64(minted)
    }

    async fn submit_start_presale(
        &self,
        signer: &SignerHandle<P>,
    ) -> Result<ChainReceipt, LedgerError> {
        let contract = ProfitUnity::new(self.address, signer.inner());
        let pending = contract
            .startPresale()
            .from(signer.address())
            .send()
            .await
            .map_err(submit_error)?;
        Ok(ChainReceipt::new(pending))
    }

    async fn submit_presale_mint(
        &self,
        signer: &SignerHandle<P>,
        value: U256,
    ) -> Result<ChainReceipt, LedgerError> {
        let contract = ProfitUnity::new(self.address, signer.inner());
        let pending = contract
            .presaleMint()
            .from(signer.address())
            .value(value)
            .send()
            .await
            .map_err(submit_error)?;
        Ok(ChainReceipt::new(pending))
    }

    async fn submit_public_mint(
        &self,
        signer: &SignerHandle<P>,
        value: U256,
    ) -> Result<ChainReceipt, LedgerError> {
        let contract = ProfitUnity::new(self.address, signer.inner());
        let pending = contract
            .mint()
            .from(signer.address())
            .value(value)
            .send()
            .await
            .map_err(submit_error)?;
        Ok(ChainReceipt::new(pending))
    }
}

/// Pending transaction on an Ethereum JSON-RPC node.
pub struct ChainReceipt {
    pending: PendingTransactionBuilder<Ethereum>,
}

impl ChainReceipt {
    fn new(pending: PendingTransactionBuilder<Ethereum>) -> Self {
        debug!(@grey, "sent tx: {}", pending.tx_hash().debug_lavender());
        Self { pending }
    }
}

impl PendingReceipt for ChainReceipt {
    fn tx_hash(&self) -> TxHash {
        *self.pending.tx_hash()
    }

    async fn confirmation(self) -> Result<TxHash, LedgerError> {
        let tx_hash = *self.pending.tx_hash();
        let receipt = self
            .pending
            .get_receipt()
            .await
            .map_err(|err| LedgerError::Unconfirmed {
                tx_hash,
                reason: err.to_string(),
            })?;
        check_receipt(&receipt)
    }
}

/// Fails with [`LedgerError::Reverted`] unless the receipt reports success.
fn check_receipt(receipt: &TransactionReceipt) -> Result<TxHash, LedgerError> {
    if !receipt.status() {
        return Err(LedgerError::Reverted {
            tx_hash: Some(receipt.transaction_hash),
            reason: "execution reverted".into(),
        });
    }
    Ok(receipt.transaction_hash)
}

fn describe_tx(tx_hash: &Option<TxHash>) -> String {
    tx_hash
        .map(|hash| format!(" {}", hash.debug_red()))
        .unwrap_or_default()
}

fn to_u64(value: U256) -> Result<u64, LedgerError> {
    u64::try_from(value).map_err(|_| LedgerError::OutOfRange(value))
}

fn read_error(err: alloy::contract::Error) -> LedgerError {
    LedgerError::Read(err.to_string())
}

/// Sorts a failed submission into rejected, reverted, or anything else.
fn submit_error(err: alloy::contract::Error) -> LedgerError {
    if let alloy::contract::Error::TransportError(ref rpc) = err {
        if let Some(payload) = rpc.as_error_resp() {
            return classify_error_response(payload.code, &payload.message);
        }
    }
    LedgerError::Submit(err.to_string())
}

fn classify_error_response(code: i64, message: &str) -> LedgerError {
    if code == USER_REJECTED_CODE {
        LedgerError::Rejected(message.to_owned())
    } else if message.to_lowercase().contains("revert") {
        LedgerError::Reverted {
            tx_hash: None,
            reason: message.to_owned(),
        }
    } else {
        LedgerError::Submit(format!("{message} (code {code})"))
    }
}
