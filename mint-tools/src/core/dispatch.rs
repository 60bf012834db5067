// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! User-triggered actions.
//!
//! Actions never return errors. A failed action records a diagnostic, releases the inflight
//! slot, and reports [`ActionOutcome::Failed`]; the state it would have changed stays as it was.

use std::{fmt, future::Future, sync::Arc};

use alloy::primitives::TxHash;

use super::{
    diagnostics::{FailureKind, Origin},
    ledger::{LedgerError, PendingReceipt, SaleLedger},
    session::Session,
    signer::{SignerError, SignerHandle, Wallet},
};
use crate::utils::{
    color::{Color, DebugColor},
    format_price,
};

/// Message shown after a confirmed mint.
pub const MINT_SUCCESS_MESSAGE: &str = "You successfully minted a Profit Unity NFT!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Connect,
    StartPresale,
    PresaleMint,
    PublicMint,
}

impl Action {
    fn origin(self) -> Origin {
        match self {
            Self::Connect => Origin::Connect,
            Self::StartPresale => Origin::StartPresale,
            Self::PresaleMint => Origin::PresaleMint,
            Self::PublicMint => Origin::PublicMint,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.origin().fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Connected,
    AlreadyConnected,
    Confirmed(TxHash),
    /// Another state-changing action was inflight; nothing was submitted.
    Busy,
    /// The action failed; see the session diagnostics.
    Failed,
}

#[derive(Debug, thiserror::Error)]
enum ActionError {
    #[error("{0}")]
    Signer(#[from] SignerError),
    #[error("{0}")]
    Ledger(#[from] LedgerError),
}

impl ActionError {
    fn kind(&self) -> FailureKind {
        match self {
            Self::Signer(SignerError::Network(_)) => FailureKind::WrongNetwork,
            Self::Signer(SignerError::Wallet(_)) => FailureKind::Other,
            Self::Ledger(LedgerError::Rejected(_)) => FailureKind::Rejected,
            Self::Ledger(LedgerError::Reverted { .. }) => FailureKind::Reverted,
            Self::Ledger(LedgerError::Read(_)) => FailureKind::TransientRead,
            Self::Ledger(_) => FailureKind::Other,
        }
    }
}

impl<W: Wallet, L: SaleLedger<W::Provider>> Session<W, L> {
    /// Connects the wallet and starts polling.
    ///
    /// Does nothing if the session is already connected.
    pub async fn connect(self: &Arc<Self>) -> ActionOutcome {
        if self.state.is_connected() {
            return ActionOutcome::AlreadyConnected;
        }
        match self.signer.provider().await {
            Ok(provider) => {
                if !self.state.set_connected() {
                    return ActionOutcome::AlreadyConnected;
                }
                info!(@grey, "connected on chain {}", provider.chain_id().debug_lavender());
                self.restart_polling();
                ActionOutcome::Connected
            }
            Err(err) => {
                self.report_signer_failure(Origin::Connect, &err);
                ActionOutcome::Failed
            }
        }
    }

    /// Starts the presale. Only the contract owner can do this successfully.
    pub async fn start_presale(&self) -> ActionOutcome {
        let outcome = self
            .dispatch(Action::StartPresale, |signer| async move {
                self.ledger.submit_start_presale(&signer).await
            })
            .await;
        if let ActionOutcome::Confirmed(_) = outcome {
            self.poll_sale_status().await;
        }
        outcome
    }

    /// Mints one token during the presale, paying the configured price.
    pub async fn presale_mint(&self) -> ActionOutcome {
        let price = self.config.mint_price;
        let outcome = self
            .dispatch(Action::PresaleMint, |signer| async move {
                self.ledger.submit_presale_mint(&signer, price).await
            })
            .await;
        self.announce_mint(outcome);
        outcome
    }

    /// Mints one token after the presale, paying the configured price.
    pub async fn public_mint(&self) -> ActionOutcome {
        let price = self.config.mint_price;
        let outcome = self
            .dispatch(Action::PublicMint, |signer| async move {
                self.ledger.submit_public_mint(&signer, price).await
            })
            .await;
        self.announce_mint(outcome);
        outcome
    }

    fn announce_mint(&self, outcome: ActionOutcome) {
        if let ActionOutcome::Confirmed(_) = outcome {
            self.notifier.alert(MINT_SUCCESS_MESSAGE);
        }
    }

    /// Runs one state-changing action while holding the inflight slot.
    async fn dispatch<F, Fut>(&self, action: Action, submit: F) -> ActionOutcome
    where
        F: FnOnce(SignerHandle<W::Provider>) -> Fut,
        Fut: Future<Output = Result<L::Receipt, LedgerError>>,
    {
        let Some(_pending) = self.state.begin_operation() else {
            debug!(@grey, "{action} ignored, another transaction is pending");
            return ActionOutcome::Busy;
        };

        match self.submit_and_confirm(action, submit).await {
            Ok(tx_hash) => {
                info!(@grey, "{action} confirmed in tx {}", tx_hash.debug_lavender());
                ActionOutcome::Confirmed(tx_hash)
            }
            Err(err) => {
                self.diagnostics
                    .record(action.origin(), err.kind(), err.to_string());
                ActionOutcome::Failed
            }
        }
    }

    async fn submit_and_confirm<F, Fut>(
        &self,
        action: Action,
        submit: F,
    ) -> Result<TxHash, ActionError>
    where
        F: FnOnce(SignerHandle<W::Provider>) -> Fut,
        Fut: Future<Output = Result<L::Receipt, LedgerError>>,
    {
        let signer = self.signer.signer().await?;
        debug!(
            @grey,
            "{action} from {} paying {}",
            signer.address().debug_lavender(),
            match action {
                Action::PresaleMint | Action::PublicMint => format_price(self.config.mint_price),
                _ => "nothing".grey(),
            }
        );
        let receipt = submit(signer).await?;
        info!(@grey, "{action} sent, waiting for tx {}", receipt.tx_hash().debug_lavender());
        Ok(receipt.confirmation().await?)
    }
}
