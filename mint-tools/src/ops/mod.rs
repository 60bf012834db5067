// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub use action::run;
pub use deploy::deploy;
pub use metadata::{print_metadata, serve_metadata};
pub use status::status;
pub use watch::watch;

mod action;
mod deploy;
mod metadata;
mod status;
mod watch;

use std::sync::Arc;

use crate::{
    config::MintConfig,
    core::{ledger::ContractLedger, session::Session, wallet::RpcWallet},
};

/// Session over a deployed collection contract.
pub type ContractSession = Session<RpcWallet, ContractLedger>;

pub fn open_session(config: &MintConfig, wallet: RpcWallet) -> eyre::Result<Arc<ContractSession>> {
    let ledger = ContractLedger::new(config.contract_address()?);
    Ok(Session::new(config.session_config()?, wallet, ledger))
}

/// Resolves on Ctrl-C.
pub async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(@yellow, "failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
}
