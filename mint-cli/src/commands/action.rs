// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use mint_tools::{config::MintConfig, core::dispatch::Action, ops};

use crate::{common_args::SessionArgs, error::CliResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[command(flatten)]
    session: SessionArgs,
}

pub async fn exec(args: Args, mut config: MintConfig, action: Action) -> CliResult {
    args.session.apply(&mut config);
    let wallet = args.session.auth.wallet(&config)?;
    if wallet.address().is_none() {
        return Err(eyre::eyre!(
            "{action} needs a signer, pass --private-key, --private-key-path or --keystore-path"
        )
        .into());
    }
    let session = ops::open_session(&config, wallet)?;
    ops::run(&session, action).await?;
    Ok(())
}
