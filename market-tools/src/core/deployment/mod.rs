// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::primitives::{Address, TxHash, U256};
use typed_builder::TypedBuilder;

use crate::{
    core::{artifact::ArtifactError, factory::FactoryError, signer::SignerError},
    utils::color::DebugColor,
};

pub use environment::{
    DeploymentEnvironment, GasEstimate, PendingDeployment, RpcEnvironment, RpcPendingDeployment,
};
pub use request::DeploymentRequest;

mod environment;
mod request;

/// Contract deployed when none is specified.
pub const DEFAULT_CONTRACT: &str = "PredictionMarket";

/// Defines what to deploy and how.
///
/// When `constructor_args` is `None` the contract is constructed with the deployer's own
/// address as its only argument.
#[derive(Debug, TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
pub struct DeploymentConfig {
    #[builder(default = DEFAULT_CONTRACT.to_string())]
    pub contract: String,
    pub constructor_args: Option<Vec<String>>,
    pub constructor_value: U256,
    pub max_fee_per_gas_wei: Option<u128>,
    pub estimate_gas: bool,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Units(#[from] alloy::primitives::utils::UnitsError),

    #[error("{0}")]
    Artifact(#[from] ArtifactError),
    #[error("invalid constructor: {0}")]
    Factory(#[from] FactoryError),
    #[error("{0}")]
    Signer(#[from] SignerError),

    #[error("tx failed to complete: {0}")]
    FailedToComplete(#[from] alloy::providers::PendingTransactionError),
    #[error("deploy tx reverted {}", .tx_hash.debug_red())]
    Reverted { tx_hash: TxHash },
    #[error("missing contract address in receipt of tx {}", .tx_hash.debug_red())]
    MissingReceiptAddress { tx_hash: TxHash },
    #[error("deployed contract {} has no code", .0.debug_red())]
    NoCode(Address),
}
