// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract deployment.

use std::{path::Path, sync::Arc};

use alloy::primitives::{utils::format_units, Address, U256};

use crate::{
    core::{
        deployment::{self, format_gas, ContractArtifact, DeploymentConfig},
        diagnostics::ConsoleNotifier,
        signer::SignerSource,
        wallet::RpcWallet,
    },
    utils::color::{Color, DebugColor},
};

/// Deploys the collection contract and prints its address.
///
/// Returns `None` when only estimating gas.
pub async fn deploy(
    artifact: impl AsRef<Path>,
    config: &DeploymentConfig,
    wallet: RpcWallet,
    chain_id: u64,
) -> eyre::Result<Option<Address>> {
    let artifact = ContractArtifact::read(artifact)?;
    if !artifact.contract_name.is_empty() {
        info!(@grey, "deploying {}", artifact.contract_name.lavender());
    }

    let source = SignerSource::new(wallet, chain_id, Arc::new(ConsoleNotifier));
    let signer = source.signer().await?;
    let deployed =
        deployment::deploy(&artifact, config, signer.address(), signer.inner()).await?;

    match deployed.address {
        Some(address) => {
            mintln!("deployed contract at address: {address}");
            Ok(Some(address))
        }
        None => {
            print_gas_estimate(deployed.gas, deployed.gas_price)?;
            Ok(None)
        }
    }
}

fn print_gas_estimate(gas: u64, gas_price: u128) -> eyre::Result<()> {
    greyln!("estimates");
    greyln!("deployment tx gas: {}", format_gas(gas.into()));
    greyln!(
        "gas price: {} gwei",
        format_units(gas_price, "gwei")?.debug_lavender()
    );

    let total_cost = U256::from(gas_price).saturating_mul(U256::from(gas));
    let eth_estimate = format_units(total_cost, "ether")?;
    greyln!("deployment tx total cost: {} ETH", eth_estimate.debug_lavender());
    Ok(())
}
