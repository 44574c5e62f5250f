// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! General purpose utilities.

use alloy::primitives::U256;

use crate::core::supply::format_units;
use color::Color;

pub mod color;

/// Pretty-prints a base-unit token amount alongside its human-readable value.
pub fn format_supply(amount: U256, decimals: u8) -> String {
    format!(
        "{} {}",
        format_units(amount, decimals).mint(),
        format!("({amount} base units)").grey()
    )
}
