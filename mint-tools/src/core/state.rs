// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Single authoritative container for the session's view of the sale.
//!
//! Poll loops and actions only write through the setters below; the presentation layer only
//! reads [`SessionSnapshot`]s.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use super::sale::{EndComparison, SaleStateMachine, SaleStatus, Transition};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
}

/// Point-in-time copy of everything the presentation layer renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub connection: ConnectionState,
    pub sale: SaleStatus,
    /// `None` until the owner has been compared with the connected signer.
    pub is_owner: Option<bool>,
    /// `None` until the first successful read.
    pub minted: Option<u64>,
    pub pending: bool,
}

impl SessionSnapshot {
    pub fn is_connected(&self) -> bool {
        self.connection == ConnectionState::Connected
    }
}

#[derive(Debug)]
struct Inner {
    connection: ConnectionState,
    sale: SaleStateMachine,
    is_owner: Option<bool>,
    minted: Option<u64>,
}

#[derive(Debug)]
pub struct StateStore {
    inner: RwLock<Inner>,
    pending: AtomicBool,
}

impl StateStore {
    pub fn new(comparison: EndComparison) -> Self {
        Self {
            inner: RwLock::new(Inner {
                connection: ConnectionState::Disconnected,
                sale: SaleStateMachine::new(comparison),
                is_owner: None,
                minted: None,
            }),
            pending: AtomicBool::new(false),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.inner.read();
        SessionSnapshot {
            connection: inner.connection,
            sale: inner.sale.status(),
            is_owner: inner.is_owner,
            minted: inner.minted,
            pending: self.is_pending(),
        }
    }

    pub fn sale_status(&self) -> SaleStatus {
        self.inner.read().sale.status()
    }

    pub fn is_connected(&self) -> bool {
        self.inner.read().connection == ConnectionState::Connected
    }

    /// Marks the session connected, returning `false` if it already was.
    pub fn set_connected(&self) -> bool {
        let mut inner = self.inner.write();
        let changed = inner.connection != ConnectionState::Connected;
        inner.connection = ConnectionState::Connected;
        changed
    }

    pub fn observe_presale_started(&self, started: bool) -> Transition {
        self.inner.write().sale.observe_started(started)
    }

    pub fn observe_presale_end(&self, end: u64, now: u64) -> Transition {
        self.inner.write().sale.observe_end(end, now)
    }

    pub fn ownership(&self) -> Option<bool> {
        self.inner.read().is_owner
    }

    pub fn set_owner(&self, is_owner: bool) {
        self.inner.write().is_owner = Some(is_owner);
    }

    /// Records a minted-count read, keeping the count non-decreasing.
    ///
    /// Returns the count now held by the store.
    pub fn record_minted(&self, count: u64) -> u64 {
        let mut inner = self.inner.write();
        let kept = inner.minted.map_or(count, |old| old.max(count));
        inner.minted = Some(kept);
        kept
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Claims the single inflight slot for a state-changing operation.
    ///
    /// Returns `None` if another operation holds it. The slot is released when the guard drops.
    pub fn begin_operation(&self) -> Option<PendingGuard<'_>> {
        self.pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| PendingGuard {
                flag: &self.pending,
            })
    }
}

/// Holds the inflight slot; dropping it clears the pending flag.
#[derive(Debug)]
#[must_use = "the pending flag is cleared as soon as the guard is dropped"]
pub struct PendingGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
