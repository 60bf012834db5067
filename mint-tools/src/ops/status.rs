// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::sync::Arc;

use crate::core::{
    dispatch::ActionOutcome, ledger::SaleLedger, session::Session, signer::Wallet, view,
    view::Screen,
};

/// Connects the session, failing with the recorded diagnostic if the wallet is unusable.
pub(super) async fn connect<W: Wallet, L: SaleLedger<W::Provider>>(
    session: &Arc<Session<W, L>>,
) -> eyre::Result<()> {
    match session.connect().await {
        ActionOutcome::Failed => Err(super::action::last_failure(session)),
        _ => Ok(()),
    }
}

/// Polls the sale once and prints the page a user would see.
pub async fn status<W: Wallet, L: SaleLedger<W::Provider>>(
    session: &Arc<Session<W, L>>,
    max_supply: u64,
) -> eyre::Result<Screen> {
    connect(session).await?;
    session.stop_polling().await;

    session.poll_sale_status().await;
    session.poll_minted_count().await;

    let snapshot = session.snapshot();
    println!("{}", view::render(&snapshot, max_supply));
    for diagnostic in session.diagnostics().records() {
        egreyln!("{}: {}", diagnostic.origin, diagnostic.message);
    }
    Ok(Screen::from_snapshot(&snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::session::SessionConfig,
        testing::{MockLedger, MockWallet, OTHER_ADDRESS, OWNER_ADDRESS},
    };

    fn fixed_now() -> u64 {
        1_700_000_000
    }

    #[tokio::test]
    async fn owner_sees_start_presale() {
        let ledger = MockLedger::new(OWNER_ADDRESS);
        ledger.set_minted(2);
        let config = SessionConfig::builder().clock(fixed_now).build();
        let session = Session::new(config, MockWallet::new(4, OWNER_ADDRESS), ledger.clone());

        assert_eq!(status(&session, 20).await.unwrap(), Screen::StartPresale);
        assert_eq!(session.snapshot().minted, Some(2));
        assert!(!session.is_sale_status_polling());
    }

    #[tokio::test]
    async fn others_see_not_started() {
        let ledger = MockLedger::new(OWNER_ADDRESS);
        let config = SessionConfig::builder().clock(fixed_now).build();
        let session = Session::new(config, MockWallet::new(4, OTHER_ADDRESS), ledger);

        assert_eq!(
            status(&session, 20).await.unwrap(),
            Screen::PresaleNotStarted
        );
    }
}
