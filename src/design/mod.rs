//! Payout design proposals
//!
//! Three mutually exclusive designs are compared side by side:
//! - V1: interface changes only, payout is the plain pro-rata pot share
//! - V2: time-bucketed pot slices plus a prediction/builder pot split
//! - V3: conviction weighting, stake scaled by entry-time weight
//!
//! The active design is a value handed to each view, never global state.

pub mod bucket;
pub mod builder;
pub mod conviction;

pub use bucket::{bucket_payout, BucketShares};
pub use builder::{ActionBonuses, BuilderActions, PotSplit};
pub use conviction::{conviction_payout, ConvictionPreview, ConvictionTotals, ConvictionWeights};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Design proposal selector
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DesignVersion {
    /// Interface-only changes
    #[default]
    V1,
    /// Payout buckets and builder pot
    V2,
    /// Conviction-weighted payouts
    V3,
}

impl fmt::Display for DesignVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesignVersion::V1 => write!(f, "V1 (UX only)"),
            DesignVersion::V2 => write!(f, "V2 (payout buckets + builder pot)"),
            DesignVersion::V3 => write!(f, "V3 (conviction weighting)"),
        }
    }
}

/// Invalid policy constants
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DesignError {
    /// Percent shares do not add up to 100
    #[error("{what} must sum to 100, got {total}")]
    SharesDoNotSum {
        /// Which split was checked
        what: &'static str,
        /// Actual sum
        total: Decimal,
    },
    /// A share, weight or bonus was negative
    #[error("{what} must be non-negative, got {value}")]
    Negative {
        /// Which constant was checked
        what: &'static str,
        /// Offending value
        value: Decimal,
    },
    /// Conviction weights must fall from early to late and stay positive
    #[error("conviction weights must satisfy early > mid > late > 0, got {early}/{mid}/{late}")]
    WeightsNotDecreasing {
        /// Early weight
        early: Decimal,
        /// Mid weight
        mid: Decimal,
        /// Late weight
        late: Decimal,
    },
}

/// Policy constants for all designs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignPolicy {
    /// V2 bucket shares
    #[serde(default)]
    pub buckets: BucketShares,
    /// V2 prediction/builder pot split
    #[serde(default)]
    pub pot_split: PotSplit,
    /// V2 builder action bonuses
    #[serde(default)]
    pub action_bonuses: ActionBonuses,
    /// V3 conviction weights
    #[serde(default)]
    pub conviction_weights: ConvictionWeights,
}

impl DesignPolicy {
    /// Check every policy constant
    pub fn validate(&self) -> Result<(), DesignError> {
        self.buckets.validate()?;
        self.pot_split.validate()?;
        self.action_bonuses.validate()?;
        self.conviction_weights.validate()?;
        Ok(())
    }
}

pub(crate) fn ensure_non_negative(what: &'static str, value: Decimal) -> Result<(), DesignError> {
    if value < Decimal::ZERO {
        return Err(DesignError::Negative { what, value });
    }
    Ok(())
}
