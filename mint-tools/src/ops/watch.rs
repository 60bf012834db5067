// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{future::Future, sync::Arc, time::Duration};

use tokio::time::{interval, MissedTickBehavior};

use crate::core::{
    ledger::SaleLedger,
    session::Session,
    signer::Wallet,
    state::SessionSnapshot,
    view::{self, Screen},
};

/// How often the snapshot is checked for changes.
const REFRESH: Duration = Duration::from_millis(250);

/// Runs the poll loops and prints the page each time it changes, until `shutdown` resolves.
///
/// Returns the screens in the order they were shown.
pub async fn watch<W: Wallet, L: SaleLedger<W::Provider>>(
    session: &Arc<Session<W, L>>,
    max_supply: u64,
    shutdown: impl Future<Output = ()>,
) -> eyre::Result<Vec<Screen>> {
    super::status::connect(session).await?;
    tokio::pin!(shutdown);

    let mut shown = Vec::new();
    let mut last: Option<SessionSnapshot> = None;
    let mut refresh = interval(REFRESH);
    refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            _ = refresh.tick() => {}
        }
        let snapshot = session.snapshot();
        if last == Some(snapshot) {
            continue;
        }
        last = Some(snapshot);

        let screen = Screen::from_snapshot(&snapshot);
        if shown.last() != Some(&screen) {
            shown.push(screen);
        }
        println!("{}\n", view::render(&snapshot, max_supply));
    }

    session.stop_polling().await;
    greyln!("stopped watching");
    Ok(shown)
}
