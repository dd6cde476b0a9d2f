//! V3 conviction-weighted payouts
//!
//! `conviction = stake * w(phase)` and winners split the pot by conviction:
//! `payout = pot * user_conviction / total_winning_conviction`.

use super::DesignError;
use crate::market::Side;
use crate::pricing::arith::{div_mul, mul_div, ratio};
use crate::pricing::{roi_percent, side_odds};
use crate::timing::Phase;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Time weights per entry phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvictionWeights {
    /// Early entry weight
    pub early: Decimal,
    /// Mid entry weight
    pub mid: Decimal,
    /// Late entry weight
    pub late: Decimal,
}

impl Default for ConvictionWeights {
    fn default() -> Self {
        Self {
            early: dec!(1.5),
            mid: dec!(1.0),
            late: dec!(0.6),
        }
    }
}

impl ConvictionWeights {
    /// Weight for a phase; closed markets weigh nothing
    pub fn weight(&self, phase: Phase) -> Decimal {
        match phase {
            Phase::Early => self.early,
            Phase::Mid => self.mid,
            Phase::Late => self.late,
            Phase::Closed => Decimal::ZERO,
        }
    }

    /// Conviction of a stake entered in `phase`
    pub fn conviction(&self, stake: Decimal, phase: Phase) -> Decimal {
        stake.saturating_mul(self.weight(phase))
    }

    /// Stake needed in `phase` to reach `target` conviction
    pub fn matching_stake(&self, target: Decimal, phase: Phase) -> Option<Decimal> {
        let weight = self.weight(phase);
        if weight <= Decimal::ZERO {
            return None;
        }
        Some(ratio(target, weight))
    }

    /// Weights must strictly fall from early to late and stay positive
    pub fn validate(&self) -> Result<(), DesignError> {
        if self.early > self.mid && self.mid > self.late && self.late > Decimal::ZERO {
            return Ok(());
        }
        Err(DesignError::WeightsNotDecreasing {
            early: self.early,
            mid: self.mid,
            late: self.late,
        })
    }
}

/// Pot share by conviction; zero total conviction pays nothing
pub fn conviction_payout(
    pot: Decimal,
    user_conviction: Decimal,
    total_winning_conviction: Decimal,
) -> Decimal {
    if total_winning_conviction <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    mul_div(pot, user_conviction, total_winning_conviction)
}

/// Conviction already committed to each side
///
/// Conviction is stake (a currency amount) times a weight. When per-user
/// stakes are not readable, callers may seed these with circulating share
/// supply instead, which mixes share units into a currency-weighted total and
/// only approximates the real split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConvictionTotals {
    /// Total YES conviction
    pub yes: Decimal,
    /// Total NO conviction
    pub no: Decimal,
}

impl ConvictionTotals {
    /// Conviction on a side
    pub fn side(&self, side: Side) -> Decimal {
        match side {
            Side::Yes => self.yes,
            Side::No => self.no,
        }
    }
}

/// Pre-trade preview of a conviction-weighted stake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvictionPreview {
    /// Weight applied
    pub weight: Decimal,
    /// User's conviction
    pub conviction: Decimal,
    /// Share of the side's conviction after joining, as a percentage
    pub pot_share_percent: Decimal,
    /// Estimated payout on a win
    pub estimated_payout: Decimal,
    /// Return on the stake, if defined
    pub roi_percent: Option<Decimal>,
    /// Share the same stake would have earned early
    pub early_share_percent: Decimal,
    /// Share the same stake would earn late
    pub late_share_percent: Decimal,
    /// Odds of the chosen side
    pub side_odds: Decimal,
}

impl ConvictionPreview {
    /// Preview staking `stake` on `side` during `phase`
    ///
    /// The stake itself joins the pot. Returns `None` for a non-positive stake
    /// or a closed market.
    pub fn compute(
        weights: &ConvictionWeights,
        side: Side,
        stake: Decimal,
        phase: Phase,
        pot: Decimal,
        totals: ConvictionTotals,
        yes_odds: Decimal,
    ) -> Option<Self> {
        if stake <= Decimal::ZERO || phase == Phase::Closed {
            return None;
        }

        let weight = weights.weight(phase);
        let conviction = stake.saturating_mul(weight);
        let others = totals.side(side);
        let new_total = others.saturating_add(conviction);

        let share_with = |own: Decimal| -> Decimal {
            let total = others.saturating_add(own);
            if total <= Decimal::ZERO {
                return Decimal::ZERO;
            }
            div_mul(own, total, dec!(100))
        };

        let pot_share_percent = share_with(conviction);
        let estimated_payout =
            conviction_payout(pot.saturating_add(stake), conviction, new_total);

        Some(Self {
            weight,
            conviction,
            pot_share_percent,
            estimated_payout,
            roi_percent: roi_percent(estimated_payout, stake),
            early_share_percent: share_with(weights.conviction(stake, Phase::Early)),
            late_share_percent: share_with(weights.conviction(stake, Phase::Late)),
            side_odds: side_odds(yes_odds, side),
        })
    }
}
