// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use mint_tools::{config::MintConfig, ops};

use crate::error::CliResult;

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Token id, used verbatim
    token_id: String,
    /// Base URL token images are served from
    #[arg(long)]
    image_base_url: Option<String>,
}

pub fn exec(args: Args, mut config: MintConfig) -> CliResult {
    if let Some(url) = args.image_base_url {
        config.metadata.token.image_base_url = url;
    }
    ops::print_metadata(&config.metadata.token, &args.token_id)?;
    Ok(())
}
