// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::PathBuf;

use alloy::{
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};
use market_tools::core::{
    network::{check_endpoint, Network, NetworkError, LOCALHOST_ENDPOINT},
    signer::{build_wallet, SignerConfig},
};

use crate::utils::convert_gwei_to_wei;

#[derive(Debug, clap::Args)]
pub struct AuthArgs {
    /// File path to a text file containing a hex-encoded private key
    #[arg(long, env = "PRIVATE_KEY_PATH")]
    private_key_path: Option<PathBuf>,
    /// Private key as a hex string. Warning: this exposes your key to shell history
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,
    /// Path to an Ethereum wallet keystore file (e.g. clef)
    #[arg(long)]
    keystore_path: Option<PathBuf>,
    /// Keystore password file
    #[arg(long)]
    keystore_password_path: Option<PathBuf>,
    /// Optional max fee per gas in gwei units.
    #[arg(long)]
    max_fee_per_gas_gwei: Option<String>,
}

impl AuthArgs {
    pub fn signer_config(&self) -> SignerConfig {
        if let Some(key) = &self.private_key {
            SignerConfig::PrivateKey(key.clone())
        } else if let Some(path) = &self.private_key_path {
            SignerConfig::PrivateKeyFile(path.clone())
        } else if let Some(path) = &self.keystore_path {
            SignerConfig::Keystore {
                path: path.clone(),
                password_path: self.keystore_password_path.clone(),
            }
        } else {
            SignerConfig::Unlocked
        }
    }

    pub fn get_max_fee_per_gas_wei(&self) -> eyre::Result<Option<u128>> {
        self.max_fee_per_gas_gwei
            .as_ref()
            .map(|fee_str| convert_gwei_to_wei(fee_str))
            .transpose()
    }
}

#[derive(Debug, clap::Args)]
pub struct ProviderArgs {
    /// RPC endpoint of the chain to deploy to
    #[arg(short, long, env = "ETH_RPC_URL", default_value = LOCALHOST_ENDPOINT)]
    endpoint: String,
    /// Named network to use instead of an endpoint (localhost, hardhat)
    #[arg(long, conflicts_with = "endpoint")]
    network: Option<Network>,
}

impl ProviderArgs {
    pub fn endpoint(&self) -> &str {
        match &self.network {
            Some(network) => network.endpoint(),
            None => &self.endpoint,
        }
    }

    /// Connects to the endpoint, with a wallet for `signer` bound to the node's chain id.
    ///
    /// Without a signer, transactions are left for the node to sign.
    pub async fn build_provider(
        &self,
        signer: Option<PrivateKeySigner>,
    ) -> eyre::Result<DynProvider> {
        let endpoint = self.endpoint();
        let provider = ProviderBuilder::new().connect(endpoint).await?;
        let Some(signer) = signer else {
            return Ok(provider.erased());
        };
        let chain_id = provider.get_chain_id().await?;
        let provider = ProviderBuilder::new()
            .wallet(build_wallet(signer, chain_id))
            .connect(endpoint)
            .await?;
        Ok(provider.erased())
    }

    /// Validates the endpoint without connecting to it.
    pub fn check(&self) -> Result<(), NetworkError> {
        check_endpoint(self.endpoint()).map(|_| ())
    }
}
