//! Market value types
//!
//! Read-model snapshots of a PAMM market and its YES/NO pool. Amounts arrive
//! as 18-decimal fixed-point integers and are held here as token units.

pub mod units;

pub use units::{format_units, from_units, parse_units, to_units, UnitsError, DECIMALS};

use alloy_primitives::{keccak256, Address, U256};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Market identifier (uint256 on chain)
pub type MarketId = U256;

/// Outcome side of a binary market
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// YES outcome token
    Yes,
    /// NO outcome token
    No,
}

impl Side {
    /// The other side of the market
    pub fn opposite(self) -> Self {
        match self {
            Side::Yes => Side::No,
            Side::No => Side::Yes,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Yes => write!(f, "YES"),
            Side::No => write!(f, "NO"),
        }
    }
}

/// Constant-product pool reserves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pool {
    /// YES token reserve
    pub yes_reserve: Decimal,
    /// NO token reserve
    pub no_reserve: Decimal,
}

impl Pool {
    /// Create a pool snapshot
    pub fn new(yes_reserve: Decimal, no_reserve: Decimal) -> Self {
        Self {
            yes_reserve,
            no_reserve,
        }
    }

    /// Constant-product invariant `k = yes * no`
    ///
    /// Returns `None` if the product overflows the decimal range.
    pub fn k(&self) -> Option<Decimal> {
        self.yes_reserve.checked_mul(self.no_reserve)
    }

    /// Sum of both reserves, saturating at the decimal range
    pub fn total(&self) -> Decimal {
        self.yes_reserve.saturating_add(self.no_reserve)
    }

    /// Whether both sides hold liquidity
    pub fn is_seeded(&self) -> bool {
        self.yes_reserve > Decimal::ZERO && self.no_reserve > Decimal::ZERO
    }
}

/// A PAMM prediction market snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    /// Market identifier, also the YES token id
    pub id: MarketId,
    /// Question text
    pub description: String,
    /// Resolver address
    pub resolver: Address,
    /// Trading close time
    pub close_time: DateTime<Utc>,
    /// Pot distributed to winners
    pub pot: Decimal,
    /// Circulating YES shares
    pub yes_supply: Decimal,
    /// Circulating NO shares
    pub no_supply: Decimal,
    /// Whether the market has been resolved
    pub resolved: bool,
    /// Winning side, fixed once resolved
    pub outcome: Option<Side>,
    /// Pool reserves, when the read returned them
    pub pool: Option<Pool>,
}

impl Market {
    /// Circulating supply for a side
    pub fn circulating(&self, side: Side) -> Decimal {
        match side {
            Side::Yes => self.yes_supply,
            Side::No => self.no_supply,
        }
    }

    /// Pool reserves, or an empty pool when none were returned
    pub fn pool_or_default(&self) -> Pool {
        self.pool.unwrap_or_default()
    }

    /// Trading is open while unresolved and before close
    pub fn is_trading_open(&self, now: DateTime<Utc>) -> bool {
        !self.resolved && self.close_time > now
    }

    /// ERC-6909 token id for a side
    pub fn token_id(&self, side: Side) -> U256 {
        token_id(self.id, side)
    }
}

/// Token id for a side of a market
///
/// YES uses the market id itself. NO is `keccak256(abi.encodePacked("PMARKET:NO", marketId))`.
pub fn token_id(market_id: MarketId, side: Side) -> U256 {
    match side {
        Side::Yes => market_id,
        Side::No => {
            let mut packed = Vec::with_capacity(10 + 32);
            packed.extend_from_slice(b"PMARKET:NO");
            packed.extend_from_slice(&market_id.to_be_bytes::<32>());
            U256::from_be_bytes(keccak256(&packed).0)
        }
    }
}

/// Parse a market id given as decimal or `0x`-prefixed hex
pub fn parse_market_id(s: &str) -> Result<MarketId, UnitsError> {
    let trimmed = s.trim();
    let parsed = match trimmed.strip_prefix("0x") {
        Some(hex) => U256::from_str_radix(hex, 16),
        None => U256::from_str(trimmed),
    };
    parsed.map_err(|_| UnitsError::InvalidNumber(s.to_string()))
}
