//! Implied odds from constant-product reserves
//!
//! A large NO reserve means NO is plentiful in the pool and YES is scarce, so
//! YES is priced higher: `P(yes) = no / (yes + no)`.

use super::arith::fraction_of_sum;
use crate::market::Side;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Odds returned for an unseeded pool
pub const NEUTRAL_ODDS: Decimal = dec!(50);

/// Implied YES probability as a percentage in `[0, 100]`
///
/// Rounded to two decimal places with banker's rounding, so
/// `implied_odds(y, n) + implied_odds(n, y) == 100` holds exactly.
pub fn implied_odds(yes_reserve: Decimal, no_reserve: Decimal) -> Decimal {
    match fraction_of_sum(no_reserve, yes_reserve) {
        Some(no_share) => no_share.saturating_mul(dec!(100)).round_dp(2),
        None => NEUTRAL_ODDS,
    }
}

/// Percentage odds of the chosen side given the YES odds
pub fn side_odds(yes_odds: Decimal, side: Side) -> Decimal {
    match side {
        Side::Yes => yes_odds,
        Side::No => dec!(100).saturating_sub(yes_odds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_implied_odds_no_dominant() {
        // NO reserve dominance prices YES at 60%
        assert_eq!(implied_odds(dec!(400000), dec!(600000)), dec!(60));
    }

    #[test]
    fn test_implied_odds_empty_pool() {
        assert_eq!(implied_odds(dec!(0), dec!(0)), dec!(50));
    }

    #[test]
    fn test_implied_odds_one_sided() {
        assert_eq!(implied_odds(dec!(0), dec!(10)), dec!(100));
        assert_eq!(implied_odds(dec!(10), dec!(0)), dec!(0));
    }

    #[test]
    fn test_implied_odds_complement_sums_to_100() {
        let cases = [
            (dec!(1), dec!(2)),
            (dec!(1), dec!(7)),
            (dec!(123.456), dec!(789.012)),
            (dec!(3), dec!(3)),
            (dec!(1), dec!(199)),
        ];
        for (yes, no) in cases {
            let sum = implied_odds(yes, no) + implied_odds(no, yes);
            assert_eq!(sum, dec!(100), "reserves ({yes}, {no})");
        }
    }

    #[test]
    fn test_implied_odds_extreme_reserves() {
        assert_eq!(implied_odds(Decimal::MAX, Decimal::MAX), dec!(50));
        assert_eq!(implied_odds(dec!(0), Decimal::MAX), dec!(100));
        assert_eq!(implied_odds(Decimal::MAX, dec!(1)), dec!(0));
    }

    #[test]
    fn test_side_odds() {
        assert_eq!(side_odds(dec!(60), Side::Yes), dec!(60));
        assert_eq!(side_odds(dec!(60), Side::No), dec!(40));
        assert_eq!(side_odds(Decimal::MIN, Side::No), Decimal::MAX);
    }
}
