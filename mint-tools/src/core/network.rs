// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::utils::color::Color;

/// Chain id of the Rinkeby test network the collection was launched on.
pub const RINKEBY_CHAIN_ID: u64 = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    #[error(
        "wallet is connected to chain {} but chain {} is required.\nChange the network to {}",
        .actual.red(),
        .expected.mint(),
        network_name(.expected.to_owned()).yellow()
    )]
    WrongNetwork { expected: u64, actual: u64 },
}

/// Checks that a wallet reports the chain the collection lives on.
pub fn check_chain_id(expected: u64, actual: u64) -> Result<(), NetworkError> {
    if expected == actual {
        Ok(())
    } else {
        Err(NetworkError::WrongNetwork { expected, actual })
    }
}

/// Human readable name of well known chains.
pub fn network_name(chain_id: u64) -> String {
    match chain_id {
        1 => "Ethereum Mainnet".into(),
        RINKEBY_CHAIN_ID => "Rinkeby".into(),
        5 => "Goerli".into(),
        11_155_111 => "Sepolia".into(),
        31_337 => "a local devnet".into(),
        other => format!("chain {other}"),
    }
}
