// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Signing identity used to authorize the deployment transaction.

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{
    network::EthereumWallet,
    primitives::FixedBytes,
    signers::{
        local::{LocalSigner, LocalSignerError, PrivateKeySigner},
        Signer,
    },
};

use crate::utils::decode0x;

#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    #[error("node has no unlocked accounts: pass a private key, a private key file or a keystore")]
    NoAccounts,
    #[error("empty private key")]
    EmptyKey,
    #[error("private key must be 32 bytes, got {0}")]
    KeyLength(usize),
    #[error("invalid private key hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{0}")]
    Local(#[from] LocalSignerError),
}

/// Where the deployer's key comes from.
#[derive(Debug, Clone, Default)]
pub enum SignerConfig {
    /// First unlocked account of the node, which signs the transaction itself.
    #[default]
    Unlocked,
    /// Hex-encoded private key, with or without `0x`.
    PrivateKey(String),
    /// Text file containing a hex-encoded private key.
    PrivateKeyFile(PathBuf),
    /// Encrypted JSON keystore, with an optional file holding its password.
    Keystore {
        path: PathBuf,
        password_path: Option<PathBuf>,
    },
}

impl SignerConfig {
    /// Loads the signer without touching the network.
    ///
    /// Returns `None` when signing is left to the node's unlocked account.
    pub fn build_signer(&self) -> Result<Option<PrivateKeySigner>, SignerError> {
        let signer = match self {
            Self::Unlocked => return Ok(None),
            Self::PrivateKey(key) => private_key_signer(key)?,
            Self::PrivateKeyFile(path) => private_key_signer(&read(path)?)?,
            Self::Keystore {
                path,
                password_path,
            } => {
                let password = match password_path {
                    Some(password_path) => read(password_path)?.trim_end().to_string(),
                    None => String::new(),
                };
                LocalSigner::decrypt_keystore(path, password)?
            }
        };
        Ok(Some(signer))
    }
}

/// Builds the wallet, binding the signer to `chain_id` for replay protection.
pub fn build_wallet(signer: PrivateKeySigner, chain_id: u64) -> EthereumWallet {
    EthereumWallet::new(signer.with_chain_id(Some(chain_id)))
}

fn private_key_signer(key: &str) -> Result<PrivateKeySigner, SignerError> {
    if key.trim().is_empty() {
        return Err(SignerError::EmptyKey);
    }
    let bytes = decode0x(key)?;
    if bytes.len() != 32 {
        return Err(SignerError::KeyLength(bytes.len()));
    }
    let key = FixedBytes::<32>::from_slice(&bytes);
    Ok(PrivateKeySigner::from_bytes(&key).map_err(LocalSignerError::from)?)
}

fn read(path: &Path) -> Result<String, SignerError> {
    fs::read_to_string(path).map_err(|source| SignerError::Read {
        path: path.to_path_buf(),
        source,
    })
}
