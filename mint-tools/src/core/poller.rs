// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Periodic refresh of the session state.
//!
//! Two independent loops run per session, each with its own cancellation token:
//!
//! - sale status: reads `presaleStarted`, and the end timestamp while the presale is active.
//!   It cancels itself once the presale has ended, since that phase is terminal.
//! - minted count: reads the number of minted tokens on every tick until stopped.
//!
//! The loops hold a weak reference to the session, so dropping the session stops them too.

use std::{
    sync::{Arc, Weak},
    time::Duration,
};

use tokio::{
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use super::{
    diagnostics::{FailureKind, Origin},
    ledger::{LedgerError, SaleLedger},
    sale::{SaleStatus, Transition},
    session::Session,
    signer::{ProviderHandle, SignerError, Wallet, WalletError},
};
use crate::utils::color::DebugColor;

/// Cancellation handles of the running poll loops.
#[derive(Debug)]
pub struct PollerHandle {
    sale_status: CancellationToken,
    minted_count: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl PollerHandle {
    pub fn cancel(&self) {
        self.sale_status.cancel();
        self.minted_count.cancel();
    }

    pub fn is_sale_status_running(&self) -> bool {
        !self.sale_status.is_cancelled()
    }

    pub fn is_minted_count_running(&self) -> bool {
        !self.minted_count.is_cancelled()
    }

    /// Cancels both loops and waits for them to exit.
    pub async fn shutdown(self) {
        self.cancel();
        for task in self.tasks {
            if let Err(err) = task.await {
                warn!(@yellow, "poll loop ended abnormally: {err}");
            }
        }
    }
}

impl<W: Wallet, L: SaleLedger<W::Provider>> Session<W, L> {
    /// Starts both poll loops, replacing any loops already running.
    pub fn restart_polling(self: &Arc<Self>) {
        let mut slot = self.poller.lock();
        if let Some(previous) = slot.take() {
            debug!(@grey, "replacing running poll loops");
            previous.cancel();
        }

        let period = self.config.poll_interval;
        let sale_status = CancellationToken::new();
        let minted_count = CancellationToken::new();
        let tasks = vec![
            tokio::spawn(run_sale_status(
                Arc::downgrade(self),
                sale_status.clone(),
                period,
            )),
            tokio::spawn(run_minted_count(
                Arc::downgrade(self),
                minted_count.clone(),
                period,
            )),
        ];
        *slot = Some(PollerHandle {
            sale_status,
            minted_count,
            tasks,
        });
    }

    /// Stops the poll loops and waits for them to exit.
    pub async fn stop_polling(&self) {
        let previous = self.poller.lock().take();
        if let Some(previous) = previous {
            previous.shutdown().await;
        }
    }

    /// Whether the sale-status loop is still scheduled.
    pub fn is_sale_status_polling(&self) -> bool {
        self.poller
            .lock()
            .as_ref()
            .is_some_and(PollerHandle::is_sale_status_running)
    }

    /// Whether the minted-count loop is still scheduled.
    pub fn is_minted_count_polling(&self) -> bool {
        self.poller
            .lock()
            .as_ref()
            .is_some_and(PollerHandle::is_minted_count_running)
    }

    /// One sale-status tick: re-derives the sale phase from fresh reads.
    ///
    /// Read failures are recorded and leave the state untouched.
    pub async fn poll_sale_status(&self) -> SaleStatus {
        let provider = match self.signer.provider().await {
            Ok(provider) => provider,
            Err(err) => {
                self.report_signer_failure(Origin::SaleStatusPoll, &err);
                return self.state.sale_status();
            }
        };

        let started = match self.ledger.presale_started(&provider).await {
            Ok(started) => started,
            Err(err) => {
                self.report_read_failure(Origin::SaleStatusPoll, &err);
                return self.state.sale_status();
            }
        };

        let transition = self.state.observe_presale_started(started);
        log_transition(transition);
        if transition.status() == SaleStatus::NotStarted && self.state.ownership().is_none() {
            self.resolve_ownership(&provider).await;
        }

        if self.state.sale_status() == SaleStatus::PresaleActive {
            match self.ledger.presale_end_timestamp(&provider).await {
                Ok(end) => log_transition(self.state.observe_presale_end(end, self.now())),
                Err(err) => self.report_read_failure(Origin::SaleStatusPoll, &err),
            }
        }
        self.state.sale_status()
    }

    /// One minted-count tick.
    pub async fn poll_minted_count(&self) -> Option<u64> {
        let provider = match self.signer.provider().await {
            Ok(provider) => provider,
            Err(err) => {
                self.report_signer_failure(Origin::MintedCountPoll, &err);
                return self.state.snapshot().minted;
            }
        };
        match self.ledger.minted_count(&provider).await {
            Ok(count) => Some(self.state.record_minted(count)),
            Err(err) => {
                self.report_read_failure(Origin::MintedCountPoll, &err);
                self.state.snapshot().minted
            }
        }
    }

    /// Compares the contract owner with the connected signer.
    async fn resolve_ownership(&self, provider: &ProviderHandle<W::Provider>) {
        let owner = match self.ledger.owner(provider).await {
            Ok(owner) => owner,
            Err(err) => {
                self.report_read_failure(Origin::OwnershipCheck, &err);
                return;
            }
        };
        match self.signer.signer().await {
            Ok(signer) => {
                // `Address` equality ignores checksum casing
                let is_owner = signer.address() == owner;
                debug!(
                    @grey,
                    "contract owner {}, signer is owner: {is_owner}",
                    owner.debug_lavender()
                );
                self.state.set_owner(is_owner);
            }
            Err(SignerError::Wallet(WalletError::NoSigner)) => self.state.set_owner(false),
            Err(err) => self.report_signer_failure(Origin::OwnershipCheck, &err),
        }
    }

    fn report_read_failure(&self, origin: Origin, err: &LedgerError) {
        self.diagnostics
            .record(origin, FailureKind::TransientRead, err.to_string());
    }

    pub(super) fn report_signer_failure(&self, origin: Origin, err: &SignerError) {
        let kind = match err {
            SignerError::Network(_) => FailureKind::WrongNetwork,
            SignerError::Wallet(_) => FailureKind::Other,
        };
        self.diagnostics.record(origin, kind, err.to_string());
    }
}

fn log_transition(transition: Transition) {
    if let Transition::Entered(status) = transition {
        info!(@grey, "sale is now {}", status.debug_lavender());
    }
}

async fn run_sale_status<W, L>(
    session: Weak<Session<W, L>>,
    cancel: CancellationToken,
    period: Duration,
) where
    W: Wallet,
    L: SaleLedger<W::Provider>,
{
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {}
        }
        let Some(session) = session.upgrade() else {
            break;
        };
        if session.poll_sale_status().await.is_terminal() {
            debug!(@grey, "presale ended, stopping sale status polling");
            cancel.cancel();
            break;
        }
    }
}

async fn run_minted_count<W, L>(
    session: Weak<Session<W, L>>,
    cancel: CancellationToken,
    period: Duration,
) where
    W: Wallet,
    L: SaleLedger<W::Provider>,
{
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {}
        }
        let Some(session) = session.upgrade() else {
            break;
        };
        session.poll_minted_count().await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use alloy::primitives::Address;

    use super::*;
    use crate::{
        core::{diagnostics::Notifier, session::SessionConfig},
        testing::{MockLedger, MockWallet, RecordingNotifier, OTHER_ADDRESS, OWNER_ADDRESS},
    };

    const NOW: u64 = 1_700_000_000;

    fn fixed_now() -> u64 {
        NOW
    }

    fn session(signer: Address, ledger: &MockLedger) -> Arc<Session<MockWallet, MockLedger>> {
        let config = SessionConfig::builder().clock(fixed_now).build();
        let notifier: Arc<dyn Notifier> = Arc::new(RecordingNotifier::default());
        Session::with_notifier(config, MockWallet::new(4, signer), ledger.clone(), notifier)
    }

    #[tokio::test]
    async fn not_started_resolves_ownership_once() {
        let ledger = MockLedger::new(OWNER_ADDRESS);
        let session = session(OWNER_ADDRESS, &ledger);

        assert_eq!(session.poll_sale_status().await, SaleStatus::NotStarted);
        assert_eq!(session.poll_sale_status().await, SaleStatus::NotStarted);

        assert_eq!(session.snapshot().is_owner, Some(true));
        assert_eq!(ledger.owner_reads(), 1);
        assert_eq!(ledger.end_reads(), 0);
    }

    #[tokio::test]
    async fn other_signer_is_not_owner() {
        let ledger = MockLedger::new(OWNER_ADDRESS);
        let session = session(OTHER_ADDRESS, &ledger);
        session.poll_sale_status().await;
        assert_eq!(session.snapshot().is_owner, Some(false));
    }

    #[tokio::test]
    async fn started_with_future_end_is_active() {
        let ledger = MockLedger::new(OWNER_ADDRESS);
        ledger.set_started(true);
        ledger.set_end(NOW + 300);
        let session = session(OTHER_ADDRESS, &ledger);

        assert_eq!(session.poll_sale_status().await, SaleStatus::PresaleActive);
        assert_eq!(ledger.owner_reads(), 0);
    }

    #[tokio::test]
    async fn started_with_past_end_is_ended() {
        let ledger = MockLedger::new(OWNER_ADDRESS);
        ledger.set_started(true);
        ledger.set_end(NOW - 300);
        let session = session(OTHER_ADDRESS, &ledger);

        assert_eq!(session.poll_sale_status().await, SaleStatus::PresaleEnded);
    }

    #[tokio::test]
    async fn failed_read_skips_tick() {
        let ledger = MockLedger::new(OWNER_ADDRESS);
        ledger.set_minted(4);
        let session = session(OTHER_ADDRESS, &ledger);

        ledger.fail_reads(1);
        assert_eq!(session.poll_minted_count().await, None);
        assert_eq!(session.diagnostics().count(Origin::MintedCountPoll), 1);
        assert_eq!(
            session.diagnostics().records()[0].kind,
            FailureKind::TransientRead
        );

        assert_eq!(session.poll_minted_count().await, Some(4));
    }

    #[tokio::test]
    async fn minted_count_is_non_decreasing_across_ticks() {
        let ledger = MockLedger::new(OWNER_ADDRESS);
        let session = session(OTHER_ADDRESS, &ledger);
        let mut last = 0;
        for remote in [1, 3, 2, 3, 0, 6] {
            ledger.set_minted(remote);
            let seen = session.poll_minted_count().await.unwrap();
            assert!(seen >= last);
            last = seen;
        }
        assert_eq!(last, 6);
    }

    #[tokio::test(start_paused = true)]
    async fn sale_loop_stops_after_presale_ends() {
        let ledger = MockLedger::new(OWNER_ADDRESS);
        ledger.set_started(true);
        ledger.set_end(NOW - 1);
        let session = session(OTHER_ADDRESS, &ledger);

        session.restart_polling();
        time::sleep(Duration::from_secs(12)).await;

        assert_eq!(session.snapshot().sale, SaleStatus::PresaleEnded);
        assert_eq!(ledger.started_reads(), 1);
        assert!(!session.is_sale_status_polling());
        assert!(session.is_minted_count_polling());
        assert_eq!(ledger.minted_reads(), 3);

        session.stop_polling().await;
        assert!(!session.is_minted_count_polling());
    }

    #[tokio::test(start_paused = true)]
    async fn sale_loop_follows_presale_until_end() {
        let ledger = MockLedger::new(OWNER_ADDRESS);
        let session = session(OTHER_ADDRESS, &ledger);
        session.restart_polling();

        time::sleep(Duration::from_secs(1)).await;
        assert_eq!(session.snapshot().sale, SaleStatus::NotStarted);

        ledger.set_started(true);
        ledger.set_end(NOW + 60);
        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(session.snapshot().sale, SaleStatus::PresaleActive);
        assert!(session.is_sale_status_polling());

        ledger.set_end(NOW);
        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(session.snapshot().sale, SaleStatus::PresaleEnded);
        assert!(!session.is_sale_status_polling());

        session.stop_polling().await;
    }

    #[tokio::test(start_paused = true)]
    async fn restarting_does_not_duplicate_loops() {
        let ledger = MockLedger::new(OWNER_ADDRESS);
        let session = session(OTHER_ADDRESS, &ledger);

        session.restart_polling();
        session.restart_polling();
        session.restart_polling();
        time::sleep(Duration::from_secs(12)).await;

        // ticks at 0s, 5s and 10s from a single loop
        assert_eq!(ledger.minted_reads(), 3);
        assert_eq!(ledger.started_reads(), 3);
        session.stop_polling().await;
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_session_stops_loops() {
        let ledger = MockLedger::new(OWNER_ADDRESS);
        let session = session(OTHER_ADDRESS, &ledger);
        session.restart_polling();
        time::sleep(Duration::from_secs(1)).await;
        let reads = ledger.minted_reads();

        drop(session);
        time::sleep(Duration::from_secs(20)).await;
        assert_eq!(ledger.minted_reads(), reads);
    }
}
