// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Deploys the collection contract from a compiled artifact.

use std::{fs, path::Path};

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, TxHash},
    providers::Provider,
    rpc::types::{TransactionReceipt, TransactionRequest},
    sol_types::SolValue,
};
use serde::Deserialize;
use typed_builder::TypedBuilder;

use crate::utils::{
    color::{Color, DebugColor},
    decode0x,
};

const WEI_PER_GWEI: u128 = 1_000_000_000;

/// The parts of a hardhat compilation artifact needed to deploy.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    #[serde(default)]
    pub contract_name: String,
    pub bytecode: String,
}

impl ContractArtifact {
    pub fn read(path: impl AsRef<Path>) -> Result<Self, DeploymentError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| DeploymentError::ReadArtifact {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, DeploymentError> {
        serde_json::from_str(text).map_err(|err| DeploymentError::InvalidArtifact(err.to_string()))
    }

    pub fn bytecode(&self) -> Result<Vec<u8>, DeploymentError> {
        let code = decode0x(&self.bytecode)
            .map_err(|err| DeploymentError::InvalidArtifact(format!("bytecode: {err}")))?;
        if code.is_empty() {
            return Err(DeploymentError::InvalidArtifact(
                "bytecode is empty, is the contract abstract?".into(),
            ));
        }
        Ok(code)
    }
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct DeploymentConfig {
    /// Base URL the contract prefixes token ids with.
    #[builder(setter(into))]
    pub metadata_url: String,
    /// Address of the whitelist contract consulted during the presale.
    pub whitelist: Address,
    #[builder(default)]
    pub max_fee_per_gas_gwei: Option<u128>,
    #[builder(default)]
    pub estimate_gas: bool,
}

/// Creation code followed by the ABI-encoded `(string, address)` constructor arguments.
pub fn deployment_code(bytecode: &[u8], config: &DeploymentConfig) -> Vec<u8> {
    let args = (config.metadata_url.clone(), config.whitelist).abi_encode_params();
    let mut code = Vec::with_capacity(bytecode.len() + args.len());
    code.extend_from_slice(bytecode);
    code.extend_from_slice(&args);
    code
}

#[derive(Debug)]
pub struct DeploymentRequest {
    tx: TransactionRequest,
    max_fee_per_gas_wei: Option<u128>,
}

impl DeploymentRequest {
    pub fn new(
        sender: Address,
        code: Vec<u8>,
        max_fee_per_gas_gwei: Option<u128>,
    ) -> Result<Self, DeploymentError> {
        let max_fee_per_gas_wei = max_fee_per_gas_gwei
            .map(|gwei| {
                gwei.checked_mul(WEI_PER_GWEI)
                    .ok_or(DeploymentError::MaxFeeTooLarge(gwei))
            })
            .transpose()?;
        Ok(Self {
            tx: TransactionRequest::default()
                .with_from(sender)
                .with_deploy_code(Bytes::from(code)),
            max_fee_per_gas_wei,
        })
    }

    pub async fn estimate_gas(&self, provider: &impl Provider) -> Result<u64, DeploymentError> {
        Ok(provider.estimate_gas(self.tx.clone()).await?)
    }

    pub async fn fee_per_gas(&self, provider: &impl Provider) -> Result<u128, DeploymentError> {
        match self.max_fee_per_gas_wei {
            Some(wei) => Ok(wei),
            None => Ok(provider.get_gas_price().await?),
        }
    }

    pub async fn exec(
        self,
        provider: &impl Provider,
    ) -> Result<TransactionReceipt, DeploymentError> {
        let gas = self.estimate_gas(provider).await?;

        let mut tx = self.tx;
        tx.gas = Some(gas);
        if let Some(max_fee_per_gas) = self.max_fee_per_gas_wei {
            tx.max_fee_per_gas = Some(max_fee_per_gas);
            tx.max_priority_fee_per_gas = Some(0);
        }

        let tx = provider.send_transaction(tx).await?;
        let tx_hash = *tx.tx_hash();
        debug!(@grey, "sent deploy tx: {}", tx_hash.debug_lavender());

        let receipt = tx
            .get_receipt()
            .await
            .or(Err(DeploymentError::FailedToComplete))?;
        if !receipt.status() {
            return Err(DeploymentError::Reverted { tx_hash });
        }
        Ok(receipt)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),
    #[error("failed to read artifact {}: {reason}", .path.red())]
    ReadArtifact { path: String, reason: String },
    #[error("invalid artifact: {0}")]
    InvalidArtifact(String),
    #[error("max fee per gas of {0} gwei does not fit in wei")]
    MaxFeeTooLarge(u128),
    #[error("tx failed to complete")]
    FailedToComplete,
    #[error("deploy tx reverted {}", .tx_hash.debug_red())]
    Reverted { tx_hash: TxHash },
    #[error("missing contract address in receipt {}", .tx_hash.debug_red())]
    NoContractAddress { tx_hash: TxHash },
}

/// Outcome of [`deploy`]; `None` address means only the gas was estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployed {
    pub address: Option<Address>,
    pub gas: u64,
    pub gas_price: u128,
}

/// Deploys the collection contract, or only estimates its gas.
pub async fn deploy(
    artifact: &ContractArtifact,
    config: &DeploymentConfig,
    sender: Address,
    provider: &impl Provider,
) -> Result<Deployed, DeploymentError> {
    let code = deployment_code(&artifact.bytecode()?, config);
    debug!(@grey, "sender address: {}", sender.debug_lavender());
    debug!(
        @grey,
        "constructor args: metadata url {} whitelist {}",
        config.metadata_url.lavender(),
        config.whitelist.debug_lavender()
    );
    let req = DeploymentRequest::new(sender, code, config.max_fee_per_gas_gwei)?;

    if config.estimate_gas {
        let gas = req.estimate_gas(provider).await?;
        let gas_price = req.fee_per_gas(provider).await?;
        return Ok(Deployed {
            address: None,
            gas,
            gas_price,
        });
    }

    let receipt = req.exec(provider).await?;
    let address = receipt
        .contract_address
        .ok_or(DeploymentError::NoContractAddress {
            tx_hash: receipt.transaction_hash,
        })?;
    info!(@grey, "deployment tx hash: {}", receipt.transaction_hash.debug_lavender());
    debug!(@grey, "gas used: {}", format_gas(receipt.gas_used.into()));
    Ok(Deployed {
        address: Some(address),
        gas: receipt.gas_used,
        gas_price: receipt.effective_gas_price,
    })
}

pub fn format_gas(gas: u128) -> String {
    let text = format!("{gas} gas");
    if gas <= 3_000_000 {
        text.mint()
    } else if gas <= 7_000_000 {
        text.yellow()
    } else {
        text.pink()
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    fn config() -> DeploymentConfig {
        DeploymentConfig::builder()
            .metadata_url("https://unity.example/api/")
            .whitelist(address!("00000000000000000000000000000000000000aa"))
            .build()
    }

    #[test]
    fn parses_hardhat_artifact() {
        let artifact = ContractArtifact::parse(
            r#"{"_format":"hh-sol-artifact-1","contractName":"ProfitUnity","abi":[],"bytecode":"0x6080","deployedBytecode":"0x"}"#,
        )
        .unwrap();
        assert_eq!(artifact.contract_name, "ProfitUnity");
        assert_eq!(artifact.bytecode().unwrap(), vec![0x60, 0x80]);
    }

    #[test]
    fn empty_bytecode_is_rejected() {
        let artifact = ContractArtifact::parse(r#"{"bytecode":"0x"}"#).unwrap();
        assert!(matches!(
            artifact.bytecode(),
            Err(DeploymentError::InvalidArtifact(_))
        ));
        assert!(ContractArtifact::parse("{}").is_err());
    }

    #[test]
    fn reads_artifact_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ProfitUnity.json");
        fs::write(&path, r#"{"bytecode":"6080604052"}"#).unwrap();
        let artifact = ContractArtifact::read(&path).unwrap();
        assert_eq!(artifact.bytecode().unwrap().len(), 5);

        let missing = ContractArtifact::read(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(DeploymentError::ReadArtifact { .. })));
    }

    #[test]
    fn constructor_args_follow_bytecode() {
        let config = config();
        let code = deployment_code(&[0x60, 0x80], &config);
        assert_eq!(&code[..2], &[0x60, 0x80]);

        let args = &code[2..];
        // head: string offset, address; tail: length, padded contents
        assert_eq!(args.len(), 32 * 4);
        assert_eq!(args[31], 0x40);
        assert_eq!(&args[44..64], config.whitelist.as_slice());
        assert_eq!(args[95] as usize, config.metadata_url.len());
        assert!(args[96..].starts_with(config.metadata_url.as_bytes()));

        let (url, whitelist) = <(String, Address)>::abi_decode_params(args).unwrap();
        assert_eq!(url, config.metadata_url);
        assert_eq!(whitelist, config.whitelist);
    }

    #[test]
    fn gwei_fee_is_converted() {
        let req = DeploymentRequest::new(Address::ZERO, vec![0x00], Some(2)).unwrap();
        assert_eq!(req.max_fee_per_gas_wei, Some(2_000_000_000));

        let req = DeploymentRequest::new(Address::ZERO, vec![0x00], None).unwrap();
        assert_eq!(req.max_fee_per_gas_wei, None);
    }

    #[test]
    fn oversized_gwei_fee_is_rejected() {
        let gwei = u128::MAX / WEI_PER_GWEI + 1;
        let err = DeploymentRequest::new(Address::ZERO, vec![0x00], Some(gwei)).unwrap_err();
        assert!(matches!(
            err,
            DeploymentError::MaxFeeTooLarge(fee) if fee == gwei
        ));

        let largest = u128::MAX / WEI_PER_GWEI;
        assert!(DeploymentRequest::new(Address::ZERO, vec![0x00], Some(largest)).is_ok());
    }
}
