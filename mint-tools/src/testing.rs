// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! In-memory wallet and ledger for exercising sessions without a node.

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
        Arc,
    },
};

use alloy::primitives::{address, Address, TxHash, U256};
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::core::{
    diagnostics::Notifier,
    ledger::{LedgerError, PendingReceipt, SaleLedger},
    signer::{ProviderHandle, SignerHandle, Wallet, WalletError},
};

pub const OWNER_ADDRESS: Address = address!("3f1Eae7D46d88F08fc2F8ed27FCb2AB183EB2d0E");
pub const OTHER_ADDRESS: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().push(message.to_owned());
    }
}

/// Connection handed out by [`MockWallet`]; carries the connect sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockProvider(pub usize);

#[derive(Debug)]
pub struct MockWallet {
    chain_id: AtomicU64,
    address: Option<Address>,
    connects: AtomicUsize,
    fail_next_connect: AtomicBool,
}

impl MockWallet {
    pub fn new(chain_id: u64, address: Address) -> Self {
        Self {
            chain_id: AtomicU64::new(chain_id),
            address: Some(address),
            connects: AtomicUsize::new(0),
            fail_next_connect: AtomicBool::new(false),
        }
    }

    pub fn read_only(chain_id: u64) -> Self {
        Self {
            address: None,
            ..Self::new(chain_id, Address::ZERO)
        }
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn switch_chain(&self, chain_id: u64) {
        self.chain_id.store(chain_id, Ordering::SeqCst);
    }

    pub fn fail_next_connect(&self) {
        self.fail_next_connect.store(true, Ordering::SeqCst);
    }
}

impl Wallet for MockWallet {
    type Provider = MockProvider;

    async fn connect(&self) -> Result<MockProvider, WalletError> {
        let sequence = self.connects.fetch_add(1, Ordering::SeqCst);
        if self.fail_next_connect.swap(false, Ordering::SeqCst) {
            return Err(WalletError::Connect("user closed the wallet prompt".into()));
        }
        Ok(MockProvider(sequence))
    }

    async fn chain_id(&self, _provider: &MockProvider) -> Result<u64, WalletError> {
        Ok(self.chain_id.load(Ordering::SeqCst))
    }

    async fn signer_address(&self, _provider: &MockProvider) -> Result<Address, WalletError> {
        self.address.ok_or(WalletError::NoSigner)
    }
}

/// What a submitted transaction should do once confirmation is awaited.
#[derive(Debug, Clone)]
pub enum SubmitBehavior {
    Confirm,
    RejectOnSubmit,
    RevertOnConfirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    StartPresale,
    PresaleMint(U256),
    PublicMint(U256),
}

#[derive(Debug, Default)]
struct Chain {
    started: bool,
    end: u64,
    minted: u64,
}

#[derive(Debug, Default)]
struct Counters {
    started_reads: AtomicUsize,
    end_reads: AtomicUsize,
    owner_reads: AtomicUsize,
    minted_reads: AtomicUsize,
}

/// Ledger whose state lives in memory and is mutated by confirmed submissions.
#[derive(Debug, Clone)]
pub struct MockLedger {
    chain: Arc<Mutex<Chain>>,
    owner: Address,
    counters: Arc<Counters>,
    submissions: Arc<Mutex<Vec<Submission>>>,
    behaviors: Arc<Mutex<VecDeque<SubmitBehavior>>>,
    failing_reads: Arc<AtomicUsize>,
    gate: Arc<Mutex<Option<Arc<Notify>>>>,
}

impl MockLedger {
    pub fn new(owner: Address) -> Self {
        Self {
            chain: Arc::default(),
            owner,
            counters: Arc::default(),
            submissions: Arc::default(),
            behaviors: Arc::default(),
            failing_reads: Arc::default(),
            gate: Arc::default(),
        }
    }

    pub fn set_started(&self, started: bool) {
        self.chain.lock().started = started;
    }

    pub fn set_end(&self, end: u64) {
        self.chain.lock().end = end;
    }

    pub fn set_minted(&self, minted: u64) {
        self.chain.lock().minted = minted;
    }

    pub fn minted(&self) -> u64 {
        self.chain.lock().minted
    }

    pub fn started(&self) -> bool {
        self.chain.lock().started
    }

    /// Queues the behavior of the next submission; unqueued submissions confirm.
    pub fn push_behavior(&self, behavior: SubmitBehavior) {
        self.behaviors.lock().push_back(behavior);
    }

    /// Makes the next `count` reads fail.
    pub fn fail_reads(&self, count: usize) {
        self.failing_reads.store(count, Ordering::SeqCst);
    }

    /// Holds confirmations until the returned [`Notify`] is signalled.
    pub fn hold_confirmations(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.gate.lock() = Some(notify.clone());
        notify
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().clone()
    }

    pub fn started_reads(&self) -> usize {
        self.counters.started_reads.load(Ordering::SeqCst)
    }

    pub fn end_reads(&self) -> usize {
        self.counters.end_reads.load(Ordering::SeqCst)
    }

    pub fn owner_reads(&self) -> usize {
        self.counters.owner_reads.load(Ordering::SeqCst)
    }

    pub fn minted_reads(&self) -> usize {
        self.counters.minted_reads.load(Ordering::SeqCst)
    }

    fn read<T>(
        &self,
        counter: &AtomicUsize,
        value: impl FnOnce(&Chain) -> T,
    ) -> Result<T, LedgerError> {
        counter.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .failing_reads
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(LedgerError::Read("connection reset".into()));
        }
        Ok(value(&self.chain.lock()))
    }

    fn submit(&self, submission: Submission) -> Result<MockReceipt, LedgerError> {
        let behavior = self
            .behaviors
            .lock()
            .pop_front()
            .unwrap_or(SubmitBehavior::Confirm);
        if let SubmitBehavior::RejectOnSubmit = behavior {
            return Err(LedgerError::Rejected("User denied transaction signature".into()));
        }
        let mut submissions = self.submissions.lock();
        submissions.push(submission);
        let tx_hash = TxHash::with_last_byte(submissions.len() as u8);
        Ok(MockReceipt {
            tx_hash,
            submission,
            revert: matches!(behavior, SubmitBehavior::RevertOnConfirm),
            chain: self.chain.clone(),
            gate: self.gate.lock().clone(),
        })
    }
}

pub struct MockReceipt {
    tx_hash: TxHash,
    submission: Submission,
    revert: bool,
    chain: Arc<Mutex<Chain>>,
    gate: Option<Arc<Notify>>,
}

impl PendingReceipt for MockReceipt {
    fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    async fn confirmation(self) -> Result<TxHash, LedgerError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.revert {
            return Err(LedgerError::Reverted {
                tx_hash: Some(self.tx_hash),
                reason: "You are not whitelisted".into(),
            });
        }
        let mut chain = self.chain.lock();
        match self.submission {
            Submission::StartPresale => chain.started = true,
            Submission::PresaleMint(_) | Submission::PublicMint(_) => chain.minted += 1,
        }
        Ok(self.tx_hash)
    }
}

impl SaleLedger<MockProvider> for MockLedger {
    type Receipt = MockReceipt;

    async fn presale_started(
        &self,
        _provider: &ProviderHandle<MockProvider>,
    ) -> Result<bool, LedgerError> {
        self.read(&self.counters.started_reads, |chain| chain.started)
    }

    async fn presale_end_timestamp(
        &self,
        _provider: &ProviderHandle<MockProvider>,
    ) -> Result<u64, LedgerError> {
        self.read(&self.counters.end_reads, |chain| chain.end)
    }

    async fn owner(
        &self,
        _provider: &ProviderHandle<MockProvider>,
    ) -> Result<Address, LedgerError> {
        let owner = self.owner;
        self.read(&self.counters.owner_reads, |_| owner)
    }

    async fn minted_count(
        &self,
        _provider: &ProviderHandle<MockProvider>,
    ) -> Result<u64, LedgerError> {
        self.read(&self.counters.minted_reads, |chain| chain.minted)
    }

    async fn submit_start_presale(
        &self,
        _signer: &SignerHandle<MockProvider>,
    ) -> Result<MockReceipt, LedgerError> {
        self.submit(Submission::StartPresale)
    }

    async fn submit_presale_mint(
        &self,
        _signer: &SignerHandle<MockProvider>,
        value: U256,
    ) -> Result<MockReceipt, LedgerError> {
        self.submit(Submission::PresaleMint(value))
    }

    async fn submit_public_mint(
        &self,
        _signer: &SignerHandle<MockProvider>,
        value: U256,
    ) -> Result<MockReceipt, LedgerError> {
        self.submit(Submission::PublicMint(value))
    }
}
