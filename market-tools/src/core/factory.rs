// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract factories: compiled bytecode plus the ABI needed to call its constructor.

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
    json_abi::{JsonAbi, Param, StateMutability},
    primitives::{Address, Bytes, U256},
};

use crate::core::deployment::DeploymentRequest;

#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
    #[error(
        "mismatch number of constructor arguments (want {want:?} ({}); got {got})",
        .want.len()
    )]
    ArgumentCount { want: Vec<String>, got: usize },
    #[error("could not resolve constructor arg {param}: {source}")]
    ResolveArgument {
        param: String,
        source: alloy::dyn_abi::Error,
    },
    #[error("could not parse constructor arg {param} from {arg:?}: {source}")]
    ParseArgument {
        param: String,
        arg: String,
        source: alloy::dyn_abi::Error,
    },
    #[error("failed to encode constructor arguments: {0}")]
    Encode(alloy::dyn_abi::Error),
    #[error("attempting to send Ether to non-payable constructor")]
    NonPayable,
}

/// Packages a compiled contract so that it can be deployed.
#[derive(Clone, Debug)]
pub struct ContractFactory {
    name: String,
    abi: JsonAbi,
    bytecode: Bytes,
}

impl ContractFactory {
    pub fn new(name: impl Into<String>, abi: JsonAbi, bytecode: Bytes) -> Self {
        Self {
            name: name.into(),
            abi,
            bytecode,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creation bytecode, without constructor arguments.
    pub fn bytecode(&self) -> &Bytes {
        &self.bytecode
    }

    /// Constructor parameters, empty when the contract declares no constructor.
    pub fn constructor_inputs(&self) -> &[Param] {
        self.abi
            .constructor()
            .map(|constructor| constructor.inputs.as_slice())
            .unwrap_or_default()
    }

    fn is_payable(&self) -> bool {
        self.abi
            .constructor()
            .is_some_and(|constructor| constructor.state_mutability == StateMutability::Payable)
    }

    /// ABI-encodes the constructor arguments, coercing each string to its parameter's type.
    pub fn encode_constructor(&self, args: &[String], value: U256) -> Result<Vec<u8>, FactoryError> {
        if !value.is_zero() && !self.is_payable() {
            return Err(FactoryError::NonPayable);
        }

        let inputs = self.constructor_inputs();
        if inputs.len() != args.len() {
            return Err(FactoryError::ArgumentCount {
                want: inputs.iter().map(ToString::to_string).collect(),
                got: args.len(),
            });
        }

        let Some(constructor) = self.abi.constructor() else {
            return Ok(Vec::new());
        };

        let mut values = Vec::<DynSolValue>::with_capacity(args.len());
        for (arg, param) in args.iter().zip(inputs) {
            let ty = param.resolve().map_err(|source| FactoryError::ResolveArgument {
                param: param.to_string(),
                source,
            })?;
            let value = ty
                .coerce_str(arg)
                .map_err(|source| FactoryError::ParseArgument {
                    param: param.to_string(),
                    arg: arg.clone(),
                    source,
                })?;
            values.push(value);
        }

        constructor
            .abi_encode_input(&values)
            .map_err(FactoryError::Encode)
    }

    /// Creation bytecode followed by the encoded constructor arguments.
    pub fn initcode(&self, args: &[String], value: U256) -> Result<Bytes, FactoryError> {
        let encoded = self.encode_constructor(args, value)?;
        let mut initcode = Vec::with_capacity(self.bytecode.len() + encoded.len());
        initcode.extend_from_slice(&self.bytecode);
        initcode.extend(encoded);
        Ok(initcode.into())
    }

    /// Builds the contract-creation transaction sent by `sender`.
    pub fn deploy_request(
        &self,
        sender: Address,
        args: &[String],
        value: U256,
        max_fee_per_gas_wei: Option<u128>,
    ) -> Result<DeploymentRequest, FactoryError> {
        let initcode = self.initcode(args, value)?;
        Ok(DeploymentRequest::new(
            sender,
            initcode,
            value,
            max_fee_per_gas_wei,
        ))
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    const OWNER_ABI: &str = r#"[
        {"type":"constructor","stateMutability":"nonpayable","inputs":[{"name":"owner","type":"address","internalType":"address"}]}
    ]"#;

    fn factory(abi: &str) -> ContractFactory {
        let abi: JsonAbi = serde_json::from_str(abi).unwrap();
        ContractFactory::new("PredictionMarket", abi, Bytes::from_static(&[0x60, 0x80]))
    }

    #[test]
    fn appends_encoded_address_to_bytecode() {
        let owner = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
        let initcode = factory(OWNER_ABI)
            .initcode(&[owner.to_string()], U256::ZERO)
            .unwrap();

        assert_eq!(initcode.len(), 2 + 32);
        assert_eq!(&initcode[..2], &[0x60, 0x80]);
        assert_eq!(&initcode[2..14], &[0u8; 12]);
        assert_eq!(&initcode[14..], owner.as_slice());
    }

    #[test]
    fn rejects_wrong_argument_count() {
        let err = factory(OWNER_ABI)
            .encode_constructor(&[], U256::ZERO)
            .unwrap_err();
        assert!(matches!(err, FactoryError::ArgumentCount { got: 0, .. }));
        assert!(err.to_string().contains("address"));
    }

    #[test]
    fn rejects_unparsable_argument() {
        let err = factory(OWNER_ABI)
            .encode_constructor(&["not-an-address".to_string()], U256::ZERO)
            .unwrap_err();
        assert!(matches!(err, FactoryError::ParseArgument { .. }));
    }

    #[test]
    fn rejects_value_for_non_payable_constructor() {
        let owner = Address::ZERO.to_string();
        let err = factory(OWNER_ABI)
            .encode_constructor(&[owner], U256::from(1))
            .unwrap_err();
        assert!(matches!(err, FactoryError::NonPayable));
    }

    #[test]
    fn accepts_value_for_payable_constructor() {
        let abi = r#"[{"type":"constructor","stateMutability":"payable","inputs":[]}]"#;
        let encoded = factory(abi)
            .encode_constructor(&[], U256::from(1))
            .unwrap();
        assert!(encoded.is_empty());
    }

    #[test]
    fn contract_without_constructor_takes_no_arguments() {
        let factory = factory("[]");
        assert!(factory.constructor_inputs().is_empty());
        assert_eq!(
            factory.initcode(&[], U256::ZERO).unwrap(),
            Bytes::from_static(&[0x60, 0x80])
        );
        assert!(factory
            .encode_constructor(&["1".to_string()], U256::ZERO)
            .is_err());
    }
}
