//! 18-decimal fixed-point conversion
//!
//! On-chain amounts are uint256 values scaled by `10^18`. Calculations run on
//! `Decimal` token units, so values are converted at the source boundary.

use alloy_primitives::U256;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Token decimals used by the PAMM contract
pub const DECIMALS: u32 = 18;

/// Fixed-point conversion errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitsError {
    /// Value does not fit the decimal range
    #[error("Amount out of range: {0}")]
    OutOfRange(U256),
    /// Negative amounts have no fixed-point representation
    #[error("Negative amount: {0}")]
    Negative(Decimal),
    /// Input could not be parsed
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
}

/// Convert a raw fixed-point value to token units
pub fn from_units(raw: U256) -> Result<Decimal, UnitsError> {
    let value: u128 = raw.try_into().map_err(|_| UnitsError::OutOfRange(raw))?;
    let value = i128::try_from(value).map_err(|_| UnitsError::OutOfRange(raw))?;
    Decimal::try_from_i128_with_scale(value, DECIMALS).map_err(|_| UnitsError::OutOfRange(raw))
}

/// Convert token units to a raw fixed-point value
///
/// Digits beyond 18 decimal places are rounded away.
pub fn to_units(amount: Decimal) -> Result<U256, UnitsError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(UnitsError::Negative(amount));
    }
    let rounded = amount.round_dp(DECIMALS);
    let mantissa = u128::try_from(rounded.mantissa()).map_err(|_| UnitsError::Negative(amount))?;
    let shift = DECIMALS - rounded.scale();
    Ok(U256::from(mantissa) * U256::from(10u64).pow(U256::from(shift)))
}

/// Parse a human-readable token amount into fixed-point
pub fn parse_units(s: &str) -> Result<U256, UnitsError> {
    let amount = Decimal::from_str(s.trim()).map_err(|_| UnitsError::InvalidNumber(s.to_string()))?;
    to_units(amount)
}

/// Format a fixed-point value as token units
pub fn format_units(raw: U256) -> String {
    match from_units(raw) {
        Ok(amount) => amount.normalize().to_string(),
        Err(_) => raw.to_string(),
    }
}
