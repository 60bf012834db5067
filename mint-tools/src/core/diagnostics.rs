// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Soft-failure reporting.
//!
//! Actions and poll ticks never hand errors back to their caller. Failures end up here instead:
//! logged, and kept in a bounded in-memory record that callers can inspect.

use std::{collections::VecDeque, fmt};

use parking_lot::Mutex;

use crate::utils::color::Color;

/// Number of failures kept before the oldest is dropped.
pub const DIAGNOSTICS_CAPACITY: usize = 64;

/// Where a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Connect,
    StartPresale,
    PresaleMint,
    PublicMint,
    SaleStatusPoll,
    MintedCountPoll,
    OwnershipCheck,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Connect => "connect",
            Self::StartPresale => "start presale",
            Self::PresaleMint => "presale mint",
            Self::PublicMint => "public mint",
            Self::SaleStatusPoll => "sale status poll",
            Self::MintedCountPoll => "minted count poll",
            Self::OwnershipCheck => "ownership check",
        };
        f.write_str(text)
    }
}

/// Coarse classification of a recorded failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    WrongNetwork,
    Rejected,
    Reverted,
    TransientRead,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub origin: Origin,
    pub kind: FailureKind,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    records: Mutex<VecDeque<Diagnostic>>,
}

impl Diagnostics {
    pub fn record(&self, origin: Origin, kind: FailureKind, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            origin,
            kind,
            message: message.into(),
        };
        match kind {
            FailureKind::TransientRead => {
                debug!(@grey, "{origin} failed, retrying next tick: {}", diagnostic.message)
            }
            _ => warn!(@yellow, "{origin} failed: {}", diagnostic.message),
        }
        let mut records = self.records.lock();
        if records.len() == DIAGNOSTICS_CAPACITY {
            records.pop_front();
        }
        records.push_back(diagnostic);
    }

    /// Copies out the retained failures, oldest first.
    pub fn records(&self) -> Vec<Diagnostic> {
        self.records.lock().iter().cloned().collect()
    }

    pub fn count(&self, origin: Origin) -> usize {
        self.records
            .lock()
            .iter()
            .filter(|record| record.origin == origin)
            .count()
    }
}

/// User-visible alerts, the counterpart of a browser `alert()`.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Prints alerts to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{}", message.yellow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_most_recent_records() {
        let diagnostics = Diagnostics::default();
        for i in 0..DIAGNOSTICS_CAPACITY + 3 {
            diagnostics.record(Origin::MintedCountPoll, FailureKind::TransientRead, i.to_string());
        }
        let records = diagnostics.records();
        assert_eq!(records.len(), DIAGNOSTICS_CAPACITY);
        assert_eq!(records[0].message, "3");
        assert_eq!(
            diagnostics.count(Origin::MintedCountPoll),
            DIAGNOSTICS_CAPACITY
        );
        assert_eq!(diagnostics.count(Origin::PublicMint), 0);
    }
}
