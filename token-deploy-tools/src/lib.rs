// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Tools for deploying token contracts to Ethereum-compatible chains.

#[macro_use]
mod macros;

pub mod core;
pub mod utils;

pub use core::deployment::{deploy, deploy_until, Deployment, DeploymentError, DeploymentOutcome};
