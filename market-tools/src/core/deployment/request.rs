// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract-creation transaction requests.

use alloy::{
    network::{Ethereum, TransactionBuilder},
    primitives::{Address, Bytes, U256},
    providers::{PendingTransactionBuilder, Provider},
    rpc::types::TransactionRequest,
};

use super::DeploymentError;
use crate::utils::color::DebugColor;

/// Deployment transaction request for a compiled contract
#[derive(Debug)]
pub struct DeploymentRequest {
    tx: TransactionRequest,
    max_fee_per_gas_wei: Option<u128>,
}

impl DeploymentRequest {
    pub fn new(
        sender: Address,
        initcode: Bytes,
        value: U256,
        max_fee_per_gas_wei: Option<u128>,
    ) -> Self {
        Self {
            tx: TransactionRequest::default()
                .with_from(sender)
                .with_value(value)
                .with_deploy_code(initcode),
            max_fee_per_gas_wei,
        }
    }

    pub fn sender(&self) -> Option<Address> {
        self.tx.from
    }

    /// Creation bytecode with the encoded constructor arguments appended.
    pub fn initcode(&self) -> Option<&Bytes> {
        self.tx.input.input()
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

    /// Broadcasts the transaction without waiting for it to be mined.
    pub async fn send(
        self,
        provider: &impl Provider,
    ) -> Result<PendingTransactionBuilder<Ethereum>, DeploymentError> {
        let tx = self.with_gas_and_fees(provider).await?;
        let pending = provider.send_transaction(tx).await?;
        debug!(@grey, "sent deploy tx: {}", pending.tx_hash().debug_lavender());
        Ok(pending)
    }

    async fn with_gas_and_fees(
        self,
        provider: &impl Provider,
    ) -> Result<TransactionRequest, DeploymentError> {
        let gas = self.estimate_gas(provider).await?;
        let max_fee_per_gas = self.fee_per_gas(provider).await?;

        let mut tx = self.tx;
        tx.gas = Some(gas);
        tx.max_fee_per_gas = Some(max_fee_per_gas);
        tx.max_priority_fee_per_gas = Some(0);
        Ok(tx)
    }
}
