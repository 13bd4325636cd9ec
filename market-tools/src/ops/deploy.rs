// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract deployment.

use std::io::Write;

use alloy::primitives::{utils::format_units, Address};

use crate::{
    core::deployment::{
        DeploymentConfig, DeploymentEnvironment, DeploymentError, GasEstimate, PendingDeployment,
    },
    utils::color::DebugColor,
};

/// Deploys the configured contract and writes the deployer and contract addresses to `out`.
///
/// Returns `None` when only estimating gas. Stops at the first failure; nothing is retried.
pub async fn deploy(
    env: &impl DeploymentEnvironment,
    config: &DeploymentConfig,
    out: &mut impl Write,
) -> Result<Option<Address>, DeploymentError> {
    let deployer = env.signer_address().await?;
    writeln!(out, "Deploying contracts with account: {deployer}")?;

    let factory = env.contract_factory(&config.contract).await?;
    let args = match &config.constructor_args {
        Some(args) => args.clone(),
        None => vec![deployer.to_string()],
    };
    let request = factory.deploy_request(
        deployer,
        &args,
        config.constructor_value,
        config.max_fee_per_gas_wei,
    )?;

    if config.estimate_gas {
        let estimate = env.estimate(&request).await?;
        print_gas_estimate(&estimate, out)?;
        return Ok(None);
    }

    let pending = env.send(request).await?;
    debug!(@grey, "waiting for tx {} to be mined", pending.tx_hash().debug_lavender());
    let address = pending.deployed().await?;
    writeln!(out, "{} deployed at: {address}", factory.name())?;
    Ok(Some(address))
}

fn print_gas_estimate(estimate: &GasEstimate, out: &mut impl Write) -> Result<(), DeploymentError> {
    writeln!(out, "estimates")?;
    writeln!(out, "deployment tx gas: {}", estimate.gas)?;
    writeln!(
        out,
        "gas price: {} gwei",
        format_units(estimate.gas_price, "gwei")?
    )?;
    writeln!(
        out,
        "deployment tx total cost: {} ETH",
        format_units(estimate.total_cost(), "ether")?
    )?;
    Ok(())
}
