// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! The chain, wallet and artifacts a deployment runs against.

use alloy::{
    network::Ethereum,
    primitives::{Address, TxHash, U256},
    providers::{PendingTransactionBuilder, Provider, RootProvider},
    rpc::types::TransactionReceipt,
};

use super::{DeploymentError, DeploymentRequest};
use crate::{
    core::{artifact::ArtifactStore, factory::ContractFactory, signer::SignerError},
    utils::{color::DebugColor, format_gas},
};

/// Gas needed by a deployment and the price it would be paid at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GasEstimate {
    pub gas: u64,
    pub gas_price: u128,
}

impl GasEstimate {
    pub fn total_cost(&self) -> U256 {
        U256::from(self.gas) * U256::from(self.gas_price)
    }
}

/// Everything the deployment driver needs from the outside world.
#[allow(async_fn_in_trait)]
pub trait DeploymentEnvironment {
    type Pending: PendingDeployment;

    /// Address of the account that signs the deployment.
    async fn signer_address(&self) -> Result<Address, DeploymentError>;

    /// Resolves the factory for a compiled contract.
    async fn contract_factory(&self, name: &str) -> Result<ContractFactory, DeploymentError>;

    /// Estimates gas and gas price for the deployment without sending it.
    async fn estimate(&self, request: &DeploymentRequest) -> Result<GasEstimate, DeploymentError>;

    /// Broadcasts the deployment; the returned handle resolves once it is mined.
    async fn send(&self, request: DeploymentRequest) -> Result<Self::Pending, DeploymentError>;
}

/// A broadcast deployment that has not been confirmed yet.
#[allow(async_fn_in_trait)]
pub trait PendingDeployment {
    fn tx_hash(&self) -> TxHash;

    /// Waits until the deployment is mined and returns the new contract's address.
    async fn deployed(self) -> Result<Address, DeploymentError>;
}

/// Deploys through a JSON-RPC node.
///
/// With a local signer the provider must carry the matching wallet. Without one the
/// transaction is signed by the node's first unlocked account.
pub struct RpcEnvironment<P> {
    provider: P,
    signer: Option<Address>,
    artifacts: ArtifactStore,
}

impl<P: Provider> RpcEnvironment<P> {
    pub fn new(provider: P, signer: Option<Address>, artifacts: ArtifactStore) -> Self {
        Self {
            provider,
            signer,
            artifacts,
        }
    }
}

impl<P: Provider> DeploymentEnvironment for RpcEnvironment<P> {
    type Pending = RpcPendingDeployment;

    async fn signer_address(&self) -> Result<Address, DeploymentError> {
        if let Some(signer) = self.signer {
            return Ok(signer);
        }
        let accounts = self.provider.get_accounts().await?;
        let account = accounts.first().copied().ok_or(SignerError::NoAccounts)?;
        debug!(@grey, "signing with unlocked account {}", account.debug_lavender());
        Ok(account)
    }

    async fn contract_factory(&self, name: &str) -> Result<ContractFactory, DeploymentError> {
        Ok(self.artifacts.load(name)?)
    }

    async fn estimate(&self, request: &DeploymentRequest) -> Result<GasEstimate, DeploymentError> {
        let gas = request.estimate_gas(&self.provider).await?;
        let gas_price = request.fee_per_gas(&self.provider).await?;
        Ok(GasEstimate { gas, gas_price })
    }

    async fn send(&self, request: DeploymentRequest) -> Result<Self::Pending, DeploymentError> {
        let pending = request.send(&self.provider).await?;
        Ok(RpcPendingDeployment {
            pending,
            root: self.provider.root().clone(),
        })
    }
}

pub struct RpcPendingDeployment {
    pending: PendingTransactionBuilder<Ethereum>,
    root: RootProvider<Ethereum>,
}

impl PendingDeployment for RpcPendingDeployment {
    fn tx_hash(&self) -> TxHash {
        *self.pending.tx_hash()
    }

    async fn deployed(self) -> Result<Address, DeploymentError> {
        let receipt = self.pending.get_receipt().await?;
        confirm_deployment(&self.root, &receipt).await
    }
}

/// Checks that a mined deployment succeeded and left code at the new address.
async fn confirm_deployment(
    provider: &impl Provider,
    receipt: &TransactionReceipt,
) -> Result<Address, DeploymentError> {
    let tx_hash = receipt.transaction_hash;
    if !receipt.status() {
        return Err(DeploymentError::Reverted { tx_hash });
    }
    let address = receipt
        .contract_address
        .ok_or(DeploymentError::MissingReceiptAddress { tx_hash })?;

    let code = provider.get_code_at(address).await?;
    if code.is_empty() {
        return Err(DeploymentError::NoCode(address));
    }

    debug!(@grey, "gas used: {}", format_gas(receipt.gas_used));
    info!(@grey, "deployment tx hash: {}", tx_hash.debug_lavender());
    Ok(address)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use alloy::{
        primitives::{address, Bytes, U128, U64},
        providers::{mock::Asserter, ProviderBuilder},
    };
    use serde_json::json;

    use super::*;

    const DEPLOYER: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
    const CONTRACT: Address = address!("5fbdb2315678afecb367f032d93f642f64180aa3");
    const TX_HASH: TxHash = TxHash::repeat_byte(0x11);

    fn mocked_provider(asserter: &Asserter) -> impl Provider {
        ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone())
    }

    fn environment(asserter: &Asserter, signer: Option<Address>) -> RpcEnvironment<impl Provider> {
        RpcEnvironment::new(mocked_provider(asserter), signer, ArtifactStore::new("artifacts"))
    }

    fn receipt(success: bool, contract_address: Option<Address>) -> TransactionReceipt {
        serde_json::from_value(json!({
            "type": "0x2",
            "status": if success { "0x1" } else { "0x0" },
            "cumulativeGasUsed": "0x1e8480",
            "logs": [],
            "logsBloom": format!("0x{}", "00".repeat(256)),
            "transactionHash": TX_HASH,
            "transactionIndex": "0x0",
            "blockHash": TxHash::repeat_byte(0x22),
            "blockNumber": "0x1",
            "gasUsed": "0x1e8480",
            "effectiveGasPrice": "0x3b9aca00",
            "from": DEPLOYER,
            "to": null,
            "contractAddress": contract_address,
        }))
        .unwrap()
    }

    fn request(max_fee_per_gas_wei: Option<u128>) -> DeploymentRequest {
        DeploymentRequest::new(
            DEPLOYER,
            Bytes::from_static(&[0x60, 0x80]),
            U256::ZERO,
            max_fee_per_gas_wei,
        )
    }

    #[test]
    fn total_cost_multiplies_gas_and_price() {
        let estimate = GasEstimate {
            gas: 1_500_000,
            gas_price: 2_000_000_000,
        };
        assert_eq!(estimate.total_cost(), U256::from(3_000_000_000_000_000u128));
    }

    #[tokio::test]
    async fn local_signer_needs_no_rpc() {
        let asserter = Asserter::new();
        let env = environment(&asserter, Some(DEPLOYER));
        assert_eq!(env.signer_address().await.unwrap(), DEPLOYER);
        assert!(asserter.read_q().is_empty());
    }

    #[tokio::test]
    async fn uses_first_unlocked_account() {
        let asserter = Asserter::new();
        asserter.push_success(&vec![DEPLOYER, CONTRACT]);
        let env = environment(&asserter, None);
        assert_eq!(env.signer_address().await.unwrap(), DEPLOYER);
    }

    #[tokio::test]
    async fn fails_without_unlocked_accounts() {
        let asserter = Asserter::new();
        asserter.push_success(&Vec::<Address>::new());
        let env = environment(&asserter, None);
        assert!(matches!(
            env.signer_address().await,
            Err(DeploymentError::Signer(SignerError::NoAccounts))
        ));
    }

    #[tokio::test]
    async fn unreachable_node_is_an_rpc_error() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("connection refused");
        let env = environment(&asserter, None);
        assert!(matches!(
            env.signer_address().await,
            Err(DeploymentError::Rpc(_))
        ));
    }

    #[tokio::test]
    async fn loads_factory_from_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let contract_dir = dir.path().join("contracts/PredictionMarket.sol");
        fs::create_dir_all(&contract_dir).unwrap();
        fs::write(
            contract_dir.join("PredictionMarket.json"),
            r#"{"abi":[],"bytecode":"0x6080"}"#,
        )
        .unwrap();

        let env = RpcEnvironment::new(
            mocked_provider(&Asserter::new()),
            Some(DEPLOYER),
            ArtifactStore::new(dir.path()),
        );
        let factory = env.contract_factory("PredictionMarket").await.unwrap();
        assert_eq!(factory.bytecode().as_ref(), &[0x60, 0x80]);
    }

    #[tokio::test]
    async fn estimates_with_node_gas_price() {
        let asserter = Asserter::new();
        asserter.push_success(&U64::from(1_000_000));
        asserter.push_success(&U128::from(2_000_000_000u64));
        let env = environment(&asserter, Some(DEPLOYER));

        let estimate = env.estimate(&request(None)).await.unwrap();
        assert_eq!(
            estimate,
            GasEstimate {
                gas: 1_000_000,
                gas_price: 2_000_000_000,
            }
        );
    }

    #[tokio::test]
    async fn send_returns_broadcast_hash() {
        let asserter = Asserter::new();
        asserter.push_success(&U64::from(1_000_000));
        asserter.push_success(&TX_HASH);
        let env = environment(&asserter, None);

        let pending = env.send(request(Some(1_000_000_000))).await.unwrap();
        assert_eq!(pending.tx_hash(), TX_HASH);
    }

    #[tokio::test]
    async fn send_failure_is_reported() {
        let asserter = Asserter::new();
        asserter.push_success(&U64::from(1_000_000));
        asserter.push_failure_msg("insufficient funds for gas * price + value");
        let env = environment(&asserter, None);

        let err = env.send(request(Some(1))).await.err().unwrap();
        assert!(matches!(err, DeploymentError::Rpc(_)));
        assert!(err.to_string().contains("insufficient funds"));
    }

    #[tokio::test]
    async fn confirms_deployment_with_code() {
        let asserter = Asserter::new();
        asserter.push_success(&Bytes::from_static(&[0x60, 0x80, 0x60, 0x40]));
        let provider = mocked_provider(&asserter);

        let address = confirm_deployment(&provider, &receipt(true, Some(CONTRACT)))
            .await
            .unwrap();
        assert_eq!(address, CONTRACT);
    }

    #[tokio::test]
    async fn reverted_receipt_fails() {
        let asserter = Asserter::new();
        let provider = mocked_provider(&asserter);

        let result = confirm_deployment(&provider, &receipt(false, Some(CONTRACT))).await;
        assert!(matches!(
            result,
            Err(DeploymentError::Reverted { tx_hash }) if tx_hash == TX_HASH
        ));
    }

    #[tokio::test]
    async fn receipt_without_address_fails() {
        let asserter = Asserter::new();
        let provider = mocked_provider(&asserter);

        let result = confirm_deployment(&provider, &receipt(true, None)).await;
        assert!(matches!(
            result,
            Err(DeploymentError::MissingReceiptAddress { .. })
        ));
    }

    #[tokio::test]
    async fn empty_code_fails() {
        let asserter = Asserter::new();
        asserter.push_success(&Bytes::new());
        let provider = mocked_provider(&asserter);

        let result = confirm_deployment(&provider, &receipt(true, Some(CONTRACT))).await;
        assert!(matches!(result, Err(DeploymentError::NoCode(address)) if address == CONTRACT));
    }
}
