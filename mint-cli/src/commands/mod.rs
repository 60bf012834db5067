// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::PathBuf;

use mint_tools::{config::MintConfig, core::dispatch::Action};

use crate::error::CliResult;

mod action;
mod deploy;
mod metadata;
mod serve;
mod status;
mod watch;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Print the current sale phase and minted count
    #[clap(visible_alias = "s")]
    Status(status::Args),
    /// Follow the sale and print every change until Ctrl-C
    #[clap(visible_alias = "w")]
    Watch(watch::Args),
    /// Start the presale (contract owner only)
    StartPresale(action::Args),
    /// Mint one token during the presale
    PresaleMint(action::Args),
    /// Mint one token after the presale ended
    PublicMint(action::Args),
    /// Print the metadata of a token
    #[clap(visible_alias = "m")]
    Metadata(metadata::Args),
    /// Serve token metadata over HTTP
    ServeMetadata(serve::Args),
    /// Deploy the collection contract
    #[clap(visible_alias = "d")]
    Deploy(deploy::Args),
}

pub async fn exec(cmd: Command, config_path: Option<PathBuf>) -> CliResult {
    let config = MintConfig::discover(config_path.as_deref())?;
    match cmd {
        Command::Status(args) => status::exec(args, config).await,
        Command::Watch(args) => watch::exec(args, config).await,
        Command::StartPresale(args) => action::exec(args, config, Action::StartPresale).await,
        Command::PresaleMint(args) => action::exec(args, config, Action::PresaleMint).await,
        Command::PublicMint(args) => action::exec(args, config, Action::PublicMint).await,
        Command::Metadata(args) => metadata::exec(args, config),
        Command::ServeMetadata(args) => serve::exec(args, config).await,
        Command::Deploy(args) => deploy::exec(args, config).await,
    }
}
