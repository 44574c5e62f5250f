// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Token supply arithmetic.
//!
//! Supplies are written by humans in whole tokens (`100000`, `2.5`) and minted by contracts in
//! base units, i.e. scaled by `10^decimals`. All conversions here are exact 256-bit integer
//! arithmetic: a value that cannot be represented is an error, never a rounding.

use alloy::primitives::U256;

/// Decimals used by the vast majority of ERC-20 tokens, and by ether itself.
pub const DEFAULT_DECIMALS: u8 = 18;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SupplyError {
    #[error("supply {amount} scaled by 10^{decimals} does not fit in uint256")]
    Overflow { amount: String, decimals: u8 },
    #[error("invalid supply {text:?}: {reason}")]
    Parse { text: String, reason: &'static str },
}

/// A human-readable supply together with the precision it will be scaled to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supply {
    text: String,
    decimals: u8,
}

impl Supply {
    pub fn new(text: impl Into<String>, decimals: u8) -> Self {
        Self {
            text: text.into(),
            decimals,
        }
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Amount in base units, as passed to the token constructor.
    pub fn base_units(&self) -> Result<U256, SupplyError> {
        parse_supply(&self.text, self.decimals)
    }
}

/// Computes `amount * 10^decimals`.
pub fn scale_supply(amount: U256, decimals: u8) -> Result<U256, SupplyError> {
    let overflow = || SupplyError::Overflow {
        amount: amount.to_string(),
        decimals,
    };
    if amount.is_zero() {
        return Ok(U256::ZERO);
    }
    pow10(decimals)
        .and_then(|factor| amount.checked_mul(factor))
        .ok_or_else(overflow)
}

/// Parses a decimal string such as `"100000"` or `"1.5"` into base units.
pub fn parse_supply(text: &str, decimals: u8) -> Result<U256, SupplyError> {
    let parse_error = |reason| SupplyError::Parse {
        text: text.to_owned(),
        reason,
    };
    let overflow = || SupplyError::Overflow {
        amount: text.trim().to_owned(),
        decimals,
    };

    let trimmed = text.trim();
    let (int, frac) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    if int.is_empty() && frac.is_empty() {
        return Err(parse_error("empty amount"));
    }
    if !int.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(parse_error("not a non-negative decimal number"));
    }

    let frac = frac.trim_end_matches('0');
    if frac.len() > usize::from(decimals) {
        return Err(parse_error("more fractional digits than the token has decimals"));
    }

    let int = match int {
        "" => U256::ZERO,
        digits => U256::from_str_radix(digits, 10).map_err(|_| overflow())?,
    };
    let whole = scale_supply(int, decimals).map_err(|_| overflow())?;
    if frac.is_empty() {
        return Ok(whole);
    }

    // frac.len() <= decimals, so the remaining exponent cannot underflow
    let frac_value = U256::from_str_radix(frac, 10).map_err(|_| overflow())?;
    let frac_units = scale_supply(frac_value, decimals - frac.len() as u8).map_err(|_| overflow())?;
    whole.checked_add(frac_units).ok_or_else(overflow)
}

/// Formats a base-unit amount in whole tokens, without trailing zeros.
pub fn format_units(amount: U256, decimals: u8) -> String {
    let digits = amount.to_string();
    let decimals = usize::from(decimals);
    if decimals == 0 {
        return digits;
    }
    let padded = format!("{digits:0>width$}", width = decimals + 1);
    let (int, frac) = padded.split_at(padded.len() - decimals);
    match frac.trim_end_matches('0') {
        "" => int.to_owned(),
        frac => format!("{int}.{frac}"),
    }
}

fn pow10(exp: u8) -> Option<U256> {
    U256::from(10u8).checked_pow(U256::from(exp))
}
