// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Tools for locating compiled contracts and deploying them to an EVM chain.

#[macro_use]
mod macros;

pub mod core;
pub mod ops;
pub mod utils;

pub use crate::core::deployment::{DeploymentConfig, DeploymentError};
