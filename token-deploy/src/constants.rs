// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

/// Compiled contract deployed when `--contract` is not given.
pub const DEFAULT_CONTRACT: &str = "UNICoin";
pub const DEFAULT_TOKEN_NAME: &str = "UFV Coin";
pub const DEFAULT_TOKEN_SYMBOL: &str = "UFV";
/// Initial supply, in whole tokens.
pub const DEFAULT_SUPPLY: &str = "100000";

/// Attempts at reaching the endpoint before giving up, after the first.
pub const DEFAULT_CONNECT_RETRIES: u32 = 3;

pub const NETWORK_ENV: &str = "DEPLOY_NETWORK";
