// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::PathBuf;

use alloy::{
    primitives::{utils::parse_ether, U256},
    signers::Signer,
};
use market_tools::{
    core::{
        artifact::{ArtifactStore, DEFAULT_ARTIFACTS_DIR},
        deployment::{RpcEnvironment, DEFAULT_CONTRACT},
    },
    ops, DeploymentConfig,
};

use crate::{
    common_args::{AuthArgs, ProviderArgs},
    error::MarketDeployResult,
};

#[derive(Debug, clap::Args)]
pub struct DeployArgs {
    /// Contract to deploy, by name or as `path/to/Source.sol:Contract`.
    #[arg(long, default_value = DEFAULT_CONTRACT)]
    contract: String,
    /// Directory holding the compiled contract artifacts.
    #[arg(long, default_value = DEFAULT_ARTIFACTS_DIR)]
    artifacts: PathBuf,
    /// The constructor arguments. Defaults to the deployer's own address.
    #[arg(
        long,
        num_args(0..),
        value_name = "ARGS",
        allow_hyphen_values = true,
    )]
    constructor_args: Option<Vec<String>>,
    /// The amount of Ether sent to the contract through the constructor.
    #[arg(long, value_parser = parse_ether, default_value = "0")]
    constructor_value: U256,
    /// Only perform gas estimation.
    #[arg(long)]
    estimate_gas: bool,

    /// Wallet source to use. Without one, the node's first unlocked account signs.
    #[command(flatten)]
    auth: AuthArgs,
    #[command(flatten)]
    provider: ProviderArgs,
}

pub async fn exec(args: DeployArgs) -> MarketDeployResult {
    let config = DeploymentConfig::builder()
        .contract(args.contract)
        .constructor_args(args.constructor_args)
        .constructor_value(args.constructor_value)
        .max_fee_per_gas_wei(args.auth.get_max_fee_per_gas_wei()?)
        .estimate_gas(args.estimate_gas)
        .build();

    // Everything that can fail locally is checked before the first network call.
    args.provider.check()?;
    let signer = args.auth.signer_config().build_signer()?;
    let signer_address = signer.as_ref().map(Signer::address);

    let provider = args.provider.build_provider(signer).await?;
    let env = RpcEnvironment::new(
        provider,
        signer_address,
        ArtifactStore::new(args.artifacts),
    );

    let mut stdout = std::io::stdout();
    ops::deploy(&env, &config, &mut stdout).await?;
    Ok(())
}
