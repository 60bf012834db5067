// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::net::SocketAddr;

use crate::core::metadata::{self, MetadataConfig};

pub fn print_metadata(config: &MetadataConfig, token_id: &str) -> eyre::Result<()> {
    let metadata = config.token(token_id);
    println!("{}", serde_json::to_string_pretty(&metadata)?);
    Ok(())
}

/// Serves token metadata until Ctrl-C.
pub async fn serve_metadata(bind: SocketAddr, config: MetadataConfig) -> eyre::Result<()> {
    metadata::serve(bind, config, super::ctrl_c()).await?;
    greyln!("metadata server stopped");
    Ok(())
}
