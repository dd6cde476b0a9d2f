//! Boundary validation for calculator inputs

use crate::market::{Market, Pool};
use rust_decimal::Decimal;
use thiserror::Error;

/// Contract misuse rejected before values reach the calculator
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalcError {
    /// A quantity that must be non-negative was negative
    #[error("{field} must be non-negative, got {value}")]
    Negative {
        /// Name of the offending input
        field: &'static str,
        /// Value supplied
        value: Decimal,
    },
}

/// Reject a negative input
pub fn validate_non_negative(field: &'static str, value: Decimal) -> Result<Decimal, CalcError> {
    if value < Decimal::ZERO {
        return Err(CalcError::Negative { field, value });
    }
    Ok(value)
}

/// Reject a pool with negative reserves
pub fn validate_pool(pool: &Pool) -> Result<(), CalcError> {
    validate_non_negative("yes_reserve", pool.yes_reserve)?;
    validate_non_negative("no_reserve", pool.no_reserve)?;
    Ok(())
}

/// Reject a market with a negative pot, supply or reserve
pub fn validate_market(market: &Market) -> Result<(), CalcError> {
    validate_non_negative("pot", market.pot)?;
    validate_non_negative("yes_supply", market.yes_supply)?;
    validate_non_negative("no_supply", market.no_supply)?;
    if let Some(pool) = &market.pool {
        validate_pool(pool)?;
    }
    Ok(())
}
