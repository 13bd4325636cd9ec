// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::str::FromStr;

use reqwest::Url;

use crate::utils::color::Color;

/// Endpoint of a locally running development node.
pub const LOCALHOST_ENDPOINT: &str = "http://localhost:8545";

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("invalid endpoint {}: {}", .0.red(), .1)]
    MalformedUrl(String, String),
    #[error("unsupported endpoint scheme {}, expected http or https", .0.red())]
    UnsupportedScheme(String),
    #[error("unknown network {}, expected one of: localhost, hardhat", .0.red())]
    UnknownNetwork(String),
}

/// Named networks that can stand in for an explicit endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Network {
    /// A node started separately on the local machine.
    Localhost,
    /// The in-process development node of the compilation framework, which listens on the
    /// same port as a localhost node when run standalone.
    Hardhat,
}

impl Network {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Localhost | Self::Hardhat => LOCALHOST_ENDPOINT,
        }
    }
}

impl FromStr for Network {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "localhost" => Ok(Self::Localhost),
            "hardhat" => Ok(Self::Hardhat),
            _ => Err(NetworkError::UnknownNetwork(s.to_string())),
        }
    }
}

/// Validates an RPC endpoint before any connection is attempted.
pub fn check_endpoint(endpoint: &str) -> Result<Url, NetworkError> {
    let url = Url::parse(endpoint)
        .map_err(|err| NetworkError::MalformedUrl(endpoint.to_string(), err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(NetworkError::UnsupportedScheme(scheme.to_string())),
    }
}
