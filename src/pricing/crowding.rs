//! Crowding classification
//!
//! The pool's larger reserve belongs to the token fewer people bought, so a
//! dominant YES reserve means the NO side is crowded and YES has the higher
//! upside.

use super::arith::fraction_of_sum;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserve share above which one side counts as crowded
pub const DEFAULT_CROWDING_THRESHOLD: Decimal = dec!(0.6);

/// Which side of the market is crowded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrowdedSide {
    /// Most bettors are on YES
    Yes,
    /// Most bettors are on NO
    No,
    /// Neither side dominates
    Balanced,
}

impl fmt::Display for CrowdedSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrowdedSide::Yes => write!(f, "YES"),
            CrowdedSide::No => write!(f, "NO"),
            CrowdedSide::Balanced => write!(f, "BALANCED"),
        }
    }
}

/// Crowding reading for a pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crowding {
    /// Crowded side
    pub side: CrowdedSide,
    /// Larger reserve share over smaller; `None` when one side is empty
    pub ratio: Option<Decimal>,
    /// Human-readable summary
    pub description: String,
}

/// Classify which side is crowded from pool reserves
pub fn classify_crowding(yes_reserve: Decimal, no_reserve: Decimal, threshold: Decimal) -> Crowding {
    let (Some(yes_ratio), Some(no_ratio)) = (
        fraction_of_sum(yes_reserve, no_reserve),
        fraction_of_sum(no_reserve, yes_reserve),
    ) else {
        return Crowding {
            side: CrowdedSide::Balanced,
            ratio: Some(Decimal::ONE),
            description: "Pool not seeded".to_string(),
        };
    };

    if yes_ratio > threshold {
        Crowding {
            side: CrowdedSide::No,
            ratio: checked_ratio(yes_ratio, no_ratio),
            description: "NO side crowded, YES has higher upside".to_string(),
        }
    } else if no_ratio > threshold {
        Crowding {
            side: CrowdedSide::Yes,
            ratio: checked_ratio(no_ratio, yes_ratio),
            description: "YES side crowded, NO has higher upside".to_string(),
        }
    } else {
        Crowding {
            side: CrowdedSide::Balanced,
            ratio: Some(Decimal::ONE),
            description: "Balanced, similar upside both sides".to_string(),
        }
    }
}

fn checked_ratio(major: Decimal, minor: Decimal) -> Option<Decimal> {
    if minor.is_zero() {
        return None;
    }
    major.checked_div(minor)
}
