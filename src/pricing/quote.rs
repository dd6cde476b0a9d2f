//! Buy quote cost breakdown
//!
//! A buy pays two legs: the AMM leg (opposite tokens swapped through the
//! pool) and the pot-contribution leg (fair-value charge paid into the pot).

use super::arith::{mul_div, ratio};
use super::odds::side_odds;
use crate::market::Side;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Pot-contribution rate used when no authoritative rate is known
pub const DEFAULT_CONTRIBUTION_RATE: Decimal = dec!(0.15);

/// Where a quote came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteOrigin {
    /// Contract view function
    Remote,
    /// Local simulation from reserves
    Simulated,
}

/// Cost breakdown for buying `shares_out` of a side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyQuote {
    /// Side being bought
    pub side: Side,
    /// Shares received
    pub shares_out: Decimal,
    /// AMM leg cost
    pub amm_cost: Decimal,
    /// Pot contribution leg cost
    pub pot_contribution: Decimal,
    /// Total input required
    pub total_cost: Decimal,
    /// All-in price per share
    pub effective_price: Decimal,
    /// Quote origin
    pub origin: QuoteOrigin,
}

impl BuyQuote {
    /// Build a quote from its two legs
    ///
    /// Returns `None` when `shares_out` is not positive.
    pub fn from_legs(
        side: Side,
        shares_out: Decimal,
        amm_cost: Decimal,
        pot_contribution: Decimal,
        origin: QuoteOrigin,
    ) -> Option<Self> {
        if shares_out <= Decimal::ZERO {
            return None;
        }
        let total_cost = amm_cost.saturating_add(pot_contribution);
        Some(Self {
            side,
            shares_out,
            amm_cost,
            pot_contribution,
            total_cost,
            effective_price: ratio(total_cost, shares_out),
            origin,
        })
    }

    /// Pot-contribution rate implied by this quote's legs
    pub fn contribution_rate(&self) -> Option<Decimal> {
        if self.amm_cost <= Decimal::ZERO {
            return None;
        }
        self.pot_contribution.checked_div(self.amm_cost)
    }
}

/// Simulate a buy quote from the current YES odds
///
/// `amm_cost = shares * side_odds / 100`, `pot_contribution = amm_cost * rate`.
pub fn simulate_buy_quote(
    side: Side,
    shares_out: Decimal,
    yes_odds: Decimal,
    contribution_rate: Decimal,
) -> Option<BuyQuote> {
    if shares_out <= Decimal::ZERO {
        return None;
    }
    let amm_cost = mul_div(shares_out, side_odds(yes_odds, side), dec!(100));
    let pot_contribution = amm_cost.saturating_mul(contribution_rate);
    BuyQuote::from_legs(
        side,
        shares_out,
        amm_cost,
        pot_contribution,
        QuoteOrigin::Simulated,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulate_yes_quote() {
        let quote = simulate_buy_quote(Side::Yes, dec!(100), dec!(60), dec!(0.15)).unwrap();
        assert_eq!(quote.amm_cost, dec!(60));
        assert_eq!(quote.pot_contribution, dec!(9));
        assert_eq!(quote.total_cost, dec!(69));
        assert_eq!(quote.effective_price, dec!(0.69));
        assert_eq!(quote.origin, QuoteOrigin::Simulated);
    }

    #[test]
    fn test_simulate_no_quote_uses_complement() {
        let quote = simulate_buy_quote(Side::No, dec!(100), dec!(60), dec!(0.15)).unwrap();
        assert_eq!(quote.amm_cost, dec!(40));
        assert_eq!(quote.pot_contribution, dec!(6));
        assert_eq!(quote.total_cost, dec!(46));
    }

    #[test]
    fn test_non_positive_amount_has_no_quote() {
        assert!(simulate_buy_quote(Side::Yes, dec!(0), dec!(60), dec!(0.15)).is_none());
        assert!(simulate_buy_quote(Side::Yes, dec!(-5), dec!(60), dec!(0.15)).is_none());
    }

    #[test]
    fn test_quote_totals_are_consistent() {
        for shares in [dec!(1), dec!(3), dec!(77.7), dec!(12345)] {
            let quote = simulate_buy_quote(Side::Yes, shares, dec!(33.33), dec!(0.15)).unwrap();
            assert_eq!(quote.total_cost, quote.amm_cost + quote.pot_contribution);
            assert_eq!(quote.effective_price, quote.total_cost / shares);
        }
    }

    #[test]
    fn test_huge_amount_saturates() {
        let quote = simulate_buy_quote(Side::Yes, Decimal::MAX, dec!(60), dec!(0.15)).unwrap();
        assert_eq!(quote.amm_cost, Decimal::MAX * dec!(0.6));
        assert!(quote.effective_price > dec!(0.68) && quote.effective_price < dec!(0.7));

        // Both legs together exceed the decimal range
        let quote = simulate_buy_quote(Side::Yes, Decimal::MAX, dec!(100), dec!(0.15)).unwrap();
        assert_eq!(quote.amm_cost, Decimal::MAX);
        assert_eq!(quote.total_cost, Decimal::MAX);
        assert_eq!(quote.effective_price, dec!(1));
    }

    #[test]
    fn test_contribution_rate_from_remote_legs() {
        let quote =
            BuyQuote::from_legs(Side::Yes, dec!(10), dec!(5), dec!(1), QuoteOrigin::Remote)
                .unwrap();
        assert_eq!(quote.contribution_rate(), Some(dec!(0.2)));
        assert_eq!(quote.effective_price, dec!(0.6));
    }

    #[test]
    fn test_contribution_rate_zero_amm_leg() {
        let quote =
            BuyQuote::from_legs(Side::No, dec!(10), dec!(0), dec!(1), QuoteOrigin::Remote)
                .unwrap();
        assert_eq!(quote.contribution_rate(), None);
    }
}
