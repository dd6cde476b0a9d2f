//! V2 prediction/builder pot split
//!
//! Part of the pot goes to correct bettors, the rest to verified coordinators
//! who helped make the outcome happen. Coordinator actions raise a user's
//! builder-pot multiplier.

use super::{ensure_non_negative, DesignError};
use crate::pricing::arith::mul_div;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Percent split between prediction and builder pots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PotSplit {
    /// Share paid to correct bettors
    pub prediction: Decimal,
    /// Share paid to verified builders
    pub builder: Decimal,
}

impl Default for PotSplit {
    fn default() -> Self {
        Self {
            prediction: dec!(70),
            builder: dec!(30),
        }
    }
}

impl PotSplit {
    /// Prediction slice of a pot
    pub fn prediction_pot(&self, pot: Decimal) -> Decimal {
        mul_div(pot, self.prediction, dec!(100))
    }

    /// Builder slice of a pot
    pub fn builder_pot(&self, pot: Decimal) -> Decimal {
        mul_div(pot, self.builder, dec!(100))
    }

    /// Shares must be non-negative and sum to 100
    pub fn validate(&self) -> Result<(), DesignError> {
        ensure_non_negative("prediction pot share", self.prediction)?;
        ensure_non_negative("builder pot share", self.builder)?;
        let total = self.prediction.saturating_add(self.builder);
        if total != dec!(100) {
            return Err(DesignError::SharesDoNotSum {
                what: "pot split",
                total,
            });
        }
        Ok(())
    }
}

/// Coordinator actions a user has completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuilderActions {
    /// Posted about the market
    pub tweeted: bool,
    /// Referred a participant
    pub referred: bool,
    /// Shared the market link
    pub shared: bool,
    /// Completed a builder action
    pub built: bool,
}

/// Percent bonus per completed action, on top of a 100% base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionBonuses {
    pub tweeted: Decimal,
    pub referred: Decimal,
    pub shared: Decimal,
    pub built: Decimal,
}

impl Default for ActionBonuses {
    fn default() -> Self {
        Self {
            tweeted: dec!(25),
            referred: dec!(50),
            shared: dec!(10),
            built: dec!(100),
        }
    }
}

impl ActionBonuses {
    /// Builder multiplier as a percentage (100 = 1x)
    pub fn multiplier_percent(&self, actions: &BuilderActions) -> Decimal {
        let mut mult = dec!(100);
        if actions.tweeted {
            mult = mult.saturating_add(self.tweeted);
        }
        if actions.referred {
            mult = mult.saturating_add(self.referred);
        }
        if actions.shared {
            mult = mult.saturating_add(self.shared);
        }
        if actions.built {
            mult = mult.saturating_add(self.built);
        }
        mult
    }

    /// Bonuses must be non-negative
    pub fn validate(&self) -> Result<(), DesignError> {
        ensure_non_negative("tweet bonus", self.tweeted)?;
        ensure_non_negative("referral bonus", self.referred)?;
        ensure_non_negative("share bonus", self.shared)?;
        ensure_non_negative("builder bonus", self.built)?;
        Ok(())
    }
}
