//! V2 time-bucketed payouts
//!
//! Each entry phase owns a fixed slice of the pot. Winners only compete with
//! others who entered in the same bucket.

use super::{ensure_non_negative, DesignError};
use crate::pricing::arith::{div_mul, mul_div};
use crate::timing::Phase;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Percent of the pot assigned to each entry bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketShares {
    /// Early bucket share
    pub early: Decimal,
    /// Mid bucket share
    pub mid: Decimal,
    /// Late bucket share
    pub late: Decimal,
}

impl Default for BucketShares {
    fn default() -> Self {
        Self {
            early: dec!(50),
            mid: dec!(35),
            late: dec!(15),
        }
    }
}

impl BucketShares {
    /// Percent share for an entry phase; closed entries have no bucket
    pub fn share(&self, phase: Phase) -> Decimal {
        match phase {
            Phase::Early => self.early,
            Phase::Mid => self.mid,
            Phase::Late => self.late,
            Phase::Closed => Decimal::ZERO,
        }
    }

    /// Sum of all bucket shares
    pub fn total(&self) -> Decimal {
        self.early.saturating_add(self.mid).saturating_add(self.late)
    }

    /// Slice of `pot` reserved for `phase` entrants
    pub fn bucket_pot(&self, pot: Decimal, phase: Phase) -> Decimal {
        mul_div(pot, self.share(phase), dec!(100))
    }

    /// Shares must be non-negative and sum to 100
    pub fn validate(&self) -> Result<(), DesignError> {
        ensure_non_negative("early bucket share", self.early)?;
        ensure_non_negative("mid bucket share", self.mid)?;
        ensure_non_negative("late bucket share", self.late)?;
        let total = self.total();
        if total != dec!(100) {
            return Err(DesignError::SharesDoNotSum {
                what: "bucket shares",
                total,
            });
        }
        Ok(())
    }
}

/// Payout within a bucket: `user / total * bucket_pot`
pub fn bucket_payout(
    user_bucket_shares: Decimal,
    total_bucket_shares: Decimal,
    bucket_pot: Decimal,
) -> Decimal {
    if total_bucket_shares <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    div_mul(user_bucket_shares, total_bucket_shares, bucket_pot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shares_sum_to_100() {
        let shares = BucketShares::default();
        assert_eq!(shares.total(), dec!(100));
        assert!(shares.validate().is_ok());
    }

    #[test]
    fn test_bucket_pot() {
        let shares = BucketShares::default();
        let pot = dec!(1000000);
        assert_eq!(shares.bucket_pot(pot, Phase::Early), dec!(500000));
        assert_eq!(shares.bucket_pot(pot, Phase::Mid), dec!(350000));
        assert_eq!(shares.bucket_pot(pot, Phase::Late), dec!(150000));
        assert_eq!(shares.bucket_pot(pot, Phase::Closed), dec!(0));
    }

    #[test]
    fn test_bucket_payout() {
        // 1000 of 10000 late shares split a 150000 late bucket
        assert_eq!(
            bucket_payout(dec!(1000), dec!(10000), dec!(150000)),
            dec!(15000)
        );
        assert_eq!(bucket_payout(dec!(1000), dec!(0), dec!(150000)), dec!(0));
    }

    #[test]
    fn test_extreme_values_saturate() {
        let shares = BucketShares::default();
        let early = shares.bucket_pot(Decimal::MAX, Phase::Early);
        assert!(early < Decimal::MAX);
        assert!(shares.bucket_pot(Decimal::MAX, Phase::Late) < early);
        assert_eq!(bucket_payout(Decimal::MAX, dec!(0.5), Decimal::MAX), Decimal::MAX);

        let inflated = BucketShares {
            early: Decimal::MAX,
            mid: Decimal::MAX,
            late: dec!(0),
        };
        assert!(matches!(
            inflated.validate(),
            Err(DesignError::SharesDoNotSum { .. })
        ));
    }

    #[test]
    fn test_negative_share_rejected() {
        let shares = BucketShares {
            early: dec!(120),
            mid: dec!(-5),
            late: dec!(-15),
        };
        assert!(matches!(
            shares.validate(),
            Err(DesignError::Negative { .. })
        ));
    }
}
