// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Lookup of compiled contract artifacts.
//!
//! Artifacts are JSON files with (at least) an `abi` and a creation `bytecode`, laid out as
//! `<root>/<source path>/<ContractName>.json`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::json_abi::ContractObject;

use crate::core::factory::ContractFactory;

/// Default directory holding compiled contract artifacts.
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Artifacts produced by the compiler that are not contract artifacts.
const BUILD_INFO_DIR: &str = "build-info";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("artifact for contract {name} not found under {}", .root.display())]
    NotFound { name: String, root: PathBuf },
    #[error(
        "multiple artifacts for contract {name}, use a fully qualified name:\n{}",
        .candidates.iter().map(|p| format!("  {}", p.display())).collect::<Vec<_>>().join("\n")
    )]
    Ambiguous {
        name: String,
        candidates: Vec<PathBuf>,
    },
    #[error("invalid artifact search pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse artifact {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("artifact {} has no abi", .0.display())]
    NoAbi(PathBuf),
    #[error("contract {0} has no bytecode, it may be abstract or an interface")]
    NoBytecode(String),
}

/// Directory of compiled contract artifacts.
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Finds the artifact file for a contract.
    ///
    /// `name` is either a bare contract name, which must be unique across all sources, or a
    /// fully qualified `path/to/Source.sol:Contract` name.
    pub fn find(&self, name: &str) -> Result<PathBuf, ArtifactError> {
        if let Some((source, contract)) = name.rsplit_once(':') {
            let path = self.root.join(source).join(format!("{contract}.json"));
            return if path.is_file() {
                Ok(path)
            } else {
                Err(ArtifactError::NotFound {
                    name: name.to_string(),
                    root: self.root.clone(),
                })
            };
        }

        let pattern = format!(
            "{}/**/{}.json",
            glob::Pattern::escape(&self.root.to_string_lossy()),
            glob::Pattern::escape(name),
        );
        let build_info = self.root.join(BUILD_INFO_DIR);
        let mut candidates: Vec<PathBuf> = glob::glob(&pattern)?
            .filter_map(Result::ok)
            .filter(|path| path.is_file() && !path.starts_with(&build_info))
            .collect();
        candidates.sort();

        match candidates.len() {
            0 => Err(ArtifactError::NotFound {
                name: name.to_string(),
                root: self.root.clone(),
            }),
            1 => Ok(candidates.remove(0)),
            _ => Err(ArtifactError::Ambiguous {
                name: name.to_string(),
                candidates,
            }),
        }
    }

    /// Loads the contract factory for a contract.
    pub fn load(&self, name: &str) -> Result<ContractFactory, ArtifactError> {
        let path = self.find(name)?;
        debug!(@grey, "reading artifact: {}", path.display());
        let json = fs::read_to_string(&path).map_err(|source| ArtifactError::Read {
            path: path.clone(),
            source,
        })?;
        let object: ContractObject =
            serde_json::from_str(&json).map_err(|source| ArtifactError::Parse {
                path: path.clone(),
                source,
            })?;

        let contract_name = name.rsplit_once(':').map_or(name, |(_, contract)| contract);
        let abi = object.abi.ok_or(ArtifactError::NoAbi(path))?;
        let bytecode = object
            .bytecode
            .filter(|code| !code.is_empty())
            .ok_or_else(|| ArtifactError::NoBytecode(contract_name.to_string()))?;
        Ok(ContractFactory::new(contract_name, abi, bytecode))
    }
}
