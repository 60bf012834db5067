// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::PathBuf;

use alloy::primitives::Address;
use eyre::eyre;
use mint_tools::{config::MintConfig, core::deployment::DeploymentConfig, ops};

use crate::{
    common_args::{AuthArgs, ProviderArgs},
    error::CliResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Compiled contract artifact (hardhat JSON with a `bytecode` field).
    #[arg(long)]
    artifact: PathBuf,
    /// Base URL the contract builds token URIs from.
    #[arg(long)]
    metadata_url: Option<String>,
    /// Address of the whitelist contract.
    #[arg(long)]
    whitelist: Option<Address>,
    /// Only perform gas estimation.
    #[arg(long)]
    estimate_gas: bool,
    /// Optional max fee per gas in gwei units.
    #[arg(long)]
    max_fee_per_gas_gwei: Option<u128>,

    /// Wallet source to use.
    #[command(flatten)]
    auth: AuthArgs,
    #[command(flatten)]
    provider: ProviderArgs,
}

pub async fn exec(args: Args, mut config: MintConfig) -> CliResult {
    args.provider.apply(&mut config);
    let metadata_url = args
        .metadata_url
        .or(config.deploy.metadata_url.clone())
        .ok_or(eyre!("missing metadata url, pass --metadata-url"))?;
    let whitelist = args
        .whitelist
        .or(config.deploy.whitelist)
        .ok_or(eyre!("missing whitelist address, pass --whitelist"))?;
    let deployment = DeploymentConfig::builder()
        .metadata_url(metadata_url)
        .whitelist(whitelist)
        .max_fee_per_gas_gwei(args.max_fee_per_gas_gwei.or(config.deploy.max_fee_per_gas_gwei))
        .estimate_gas(args.estimate_gas)
        .build();

    let wallet = args.auth.wallet(&config)?;
    ops::deploy(&args.artifact, &deployment, wallet, config.chain_id).await?;
    Ok(())
}
