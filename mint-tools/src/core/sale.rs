// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Sale phase derived from the collection contract.
//!
//! The contract exposes two values: whether the presale was started, and the unix time at which
//! the presale ends. The phase only ever moves forward:
//! `NotStarted -> PresaleActive -> PresaleEnded`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Phase of the sale as seen by the client.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaleStatus {
    #[default]
    NotStarted,
    PresaleActive,
    PresaleEnded,
}

impl SaleStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::PresaleEnded)
    }
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NotStarted => "not started",
            Self::PresaleActive => "presale active",
            Self::PresaleEnded => "presale ended",
        };
        f.write_str(text)
    }
}

/// How the presale end timestamp is compared against the current time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndComparison {
    /// Ended once `now >= end`.
    #[default]
    AtOrAfter,
    /// Ended once `end < now`.
    StrictlyAfter,
}

impl EndComparison {
    /// Whether a presale ending at `end` is over at `now`.
    ///
    /// An end of zero means the contract never recorded one, which is never treated as ended.
    pub fn has_ended(self, end: u64, now: u64) -> bool {
        if end == 0 {
            return false;
        }
        match self {
            Self::AtOrAfter => now >= end,
            Self::StrictlyAfter => end < now,
        }
    }
}

/// Stateless derivation of the phase from a single consistent read.
pub fn derive_status(started: bool, end: u64, now: u64, comparison: EndComparison) -> SaleStatus {
    if !started {
        SaleStatus::NotStarted
    } else if comparison.has_ended(end, now) {
        SaleStatus::PresaleEnded
    } else {
        SaleStatus::PresaleActive
    }
}

/// Result of feeding an observation into the [`SaleStateMachine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged(SaleStatus),
    Entered(SaleStatus),
    /// The observation would have moved the phase backwards and was dropped.
    Ignored(SaleStatus),
}

impl Transition {
    pub fn status(self) -> SaleStatus {
        match self {
            Self::Unchanged(status) | Self::Entered(status) | Self::Ignored(status) => status,
        }
    }
}

/// Forward-only sale phase tracker.
#[derive(Debug, Default, Clone)]
pub struct SaleStateMachine {
    status: SaleStatus,
    comparison: EndComparison,
}

impl SaleStateMachine {
    pub fn new(comparison: EndComparison) -> Self {
        Self {
            status: SaleStatus::NotStarted,
            comparison,
        }
    }

    pub fn status(&self) -> SaleStatus {
        self.status
    }

    /// Applies a fresh read of the contract's `presaleStarted` flag.
    pub fn observe_started(&mut self, started: bool) -> Transition {
        match (self.status, started) {
            (SaleStatus::NotStarted, true) => self.enter(SaleStatus::PresaleActive),
            (SaleStatus::NotStarted, false) => Transition::Unchanged(self.status),
            (_, true) => Transition::Unchanged(self.status),
            (_, false) => Transition::Ignored(self.status),
        }
    }

    /// Applies a fresh read of the presale end timestamp at wall-clock time `now`.
    ///
    /// Only meaningful while the presale is active.
    pub fn observe_end(&mut self, end: u64, now: u64) -> Transition {
        match self.status {
            SaleStatus::PresaleActive => match derive_status(true, end, now, self.comparison) {
                SaleStatus::PresaleEnded => self.enter(SaleStatus::PresaleEnded),
                _ => Transition::Unchanged(self.status),
            },
            status => Transition::Unchanged(status),
        }
    }

    fn enter(&mut self, status: SaleStatus) -> Transition {
        self.status = status;
        Transition::Entered(status)
    }
}
