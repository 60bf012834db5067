// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! One-shot state-changing actions.

use std::sync::Arc;

use alloy::primitives::TxHash;
use eyre::{bail, eyre};

use crate::{
    core::{
        dispatch::{Action, ActionOutcome},
        ledger::SaleLedger,
        session::Session,
        signer::Wallet,
        view::Screen,
    },
    utils::color::{Color, DebugColor},
};

/// Connects, refreshes the sale phase, and performs `action` if the current screen offers it.
///
/// Returns the confirmed transaction hash, or `None` for [`Action::Connect`].
pub async fn run<W: Wallet, L: SaleLedger<W::Provider>>(
    session: &Arc<Session<W, L>>,
    action: Action,
) -> eyre::Result<Option<TxHash>> {
    let result = run_inner(session, action).await;
    session.stop_polling().await;
    result
}

async fn run_inner<W: Wallet, L: SaleLedger<W::Provider>>(
    session: &Arc<Session<W, L>>,
    action: Action,
) -> eyre::Result<Option<TxHash>> {
    super::status::connect(session).await?;
    if action == Action::Connect {
        return Ok(None);
    }

    session.poll_sale_status().await;
    let screen = Screen::from_snapshot(&session.snapshot());
    if screen.action() != Some(action) {
        let reason = match screen {
            Screen::StartPresale => "Presale hasnt started yet.",
            _ => screen.message().unwrap_or("another transaction is pending"),
        };
        bail!("{} is not available: {}", action.to_string().red(), reason);
    }

    let outcome = match action {
        Action::StartPresale => session.start_presale().await,
        Action::PresaleMint => session.presale_mint().await,
        Action::PublicMint => session.public_mint().await,
        Action::Connect => return Ok(None),
    };
    match outcome {
        ActionOutcome::Confirmed(tx_hash) => {
            mintln!("{action} confirmed in tx {}", tx_hash.debug_lavender());
            Ok(Some(tx_hash))
        }
        ActionOutcome::Busy => bail!("another transaction is pending"),
        ActionOutcome::Failed => Err(last_failure(session)),
        ActionOutcome::Connected | ActionOutcome::AlreadyConnected => Ok(None),
    }
}

/// The most recent diagnostic as a report.
pub(super) fn last_failure<W: Wallet, L: SaleLedger<W::Provider>>(
    session: &Session<W, L>,
) -> eyre::Report {
    match session.diagnostics().records().pop() {
        Some(diagnostic) => eyre!("{} failed: {}", diagnostic.origin, diagnostic.message),
        None => eyre!("action failed"),
    }
}
