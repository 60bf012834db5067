// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! The client session.
//!
//! One [`Session`] exists per connected user. It owns the wallet connection, the ledger client,
//! the state store and the poll loops, and is shared as an `Arc<Session>` with the tasks that
//! keep it fresh. Actions live in [`dispatch`](super::dispatch), poll loops in
//! [`poller`](super::poller).

use std::{sync::Arc, time::Duration};

use alloy::primitives::{utils::parse_ether, U256};
use parking_lot::Mutex;
use typed_builder::TypedBuilder;

use super::{
    diagnostics::{ConsoleNotifier, Diagnostics, Notifier},
    ledger::SaleLedger,
    network::RINKEBY_CHAIN_ID,
    poller::PollerHandle,
    sale::EndComparison,
    signer::{SignerSource, Wallet},
    state::{SessionSnapshot, StateStore},
};
use crate::utils::unix_now;

/// Period of both poll loops unless configured otherwise.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Price of one token: 0.01 ether.
pub fn default_mint_price() -> U256 {
    parse_ether("0.01").unwrap_or(U256::from(10_000_000_000_000_000u64))
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct SessionConfig {
    #[builder(default = RINKEBY_CHAIN_ID)]
    pub required_chain_id: u64,
    #[builder(default = default_mint_price())]
    pub mint_price: U256,
    #[builder(default = DEFAULT_POLL_INTERVAL)]
    pub poll_interval: Duration,
    #[builder(default)]
    pub end_comparison: EndComparison,
    /// Source of wall-clock time in unix seconds.
    #[builder(default = unix_now as fn() -> u64)]
    pub clock: fn() -> u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

pub struct Session<W: Wallet, L: SaleLedger<W::Provider>> {
    pub(super) config: SessionConfig,
    pub(super) signer: SignerSource<W>,
    pub(super) ledger: L,
    pub(super) state: StateStore,
    pub(super) diagnostics: Diagnostics,
    pub(super) notifier: Arc<dyn Notifier>,
    pub(super) poller: Mutex<Option<PollerHandle>>,
}

impl<W: Wallet, L: SaleLedger<W::Provider>> Session<W, L> {
    pub fn new(config: SessionConfig, wallet: W, ledger: L) -> Arc<Self> {
        Self::with_notifier(config, wallet, ledger, Arc::new(ConsoleNotifier))
    }

    pub fn with_notifier(
        config: SessionConfig,
        wallet: W,
        ledger: L,
        notifier: Arc<dyn Notifier>,
    ) -> Arc<Self> {
        let signer = SignerSource::new(wallet, config.required_chain_id, notifier.clone());
        let state = StateStore::new(config.end_comparison);
        Arc::new(Self {
            config,
            signer,
            ledger,
            state,
            diagnostics: Diagnostics::default(),
            notifier,
            poller: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn signer(&self) -> &SignerSource<W> {
        &self.signer
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.snapshot()
    }

    pub(super) fn now(&self) -> u64 {
        (self.config.clock)()
    }
}

impl<W: Wallet, L: SaleLedger<W::Provider>> Drop for Session<W, L> {
    fn drop(&mut self) {
        if let Some(poller) = self.poller.get_mut().take() {
            poller.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_collection() {
        let config = SessionConfig::default();
        assert_eq!(config.required_chain_id, 4);
        assert_eq!(config.mint_price, U256::from(10_000_000_000_000_000u64));
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.end_comparison, EndComparison::AtOrAfter);
    }
}
