// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use mint_tools::{config::MintConfig, ops};

use crate::{common_args::SessionArgs, error::CliResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Tokens in the collection, shown as `n/<max-supply> have been minted`
    #[arg(long)]
    max_supply: Option<u64>,

    #[command(flatten)]
    session: SessionArgs,
}

pub async fn exec(args: Args, mut config: MintConfig) -> CliResult {
    args.session.apply(&mut config);
    if let Some(max_supply) = args.max_supply {
        config.max_supply = max_supply;
    }
    let wallet = args.session.auth.wallet(&config)?;
    let session = ops::open_session(&config, wallet)?;
    ops::watch(&session, config.max_supply, ops::ctrl_c()).await?;
    Ok(())
}
