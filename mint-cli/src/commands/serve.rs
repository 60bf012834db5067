// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::net::SocketAddr;

use mint_tools::{config::MintConfig, ops};

use crate::error::CliResult;

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Address to listen on
    #[arg(long)]
    bind: Option<SocketAddr>,
    /// Base URL token images are served from
    #[arg(long)]
    image_base_url: Option<String>,
}

pub async fn exec(args: Args, mut config: MintConfig) -> CliResult {
    if let Some(url) = args.image_base_url {
        config.metadata.token.image_base_url = url;
    }
    let bind = args.bind.unwrap_or(config.metadata.bind);
    ops::serve_metadata(bind, config.metadata.token).await?;
    Ok(())
}
