// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use mint_tools::{config::MintConfig, ops};

use crate::{common_args::SessionArgs, error::CliResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[command(flatten)]
    session: SessionArgs,
}

pub async fn exec(args: Args, mut config: MintConfig) -> CliResult {
    args.session.apply(&mut config);
    let wallet = args.session.auth.wallet(&config)?;
    let session = ops::open_session(&config, wallet)?;
    ops::status(&session, config.max_supply).await?;
    Ok(())
}
