//! Payout estimation
//!
//! Winners split the pot pro rata by shares held on the winning side.

use super::arith::{div_mul, mul_div};
use super::quote::BuyQuote;
use crate::market::Market;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Proportional share of the pot: `user_shares * pot / circulating`
///
/// Zero circulating supply pays nothing. Results beyond the decimal range
/// saturate.
pub fn estimated_payout(user_shares: Decimal, pot: Decimal, circulating: Decimal) -> Decimal {
    if circulating <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    mul_div(user_shares, pot, circulating)
}

/// Holder's share of the pot as a percentage
pub fn pot_share_percent(user_shares: Decimal, circulating: Decimal) -> Decimal {
    if circulating <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    div_mul(user_shares, circulating, dec!(100))
}

/// Return on investment as a percentage, undefined for zero cost
pub fn roi_percent(payout: Decimal, cost: Decimal) -> Option<Decimal> {
    if cost.is_zero() {
        return None;
    }
    Some(div_mul(payout.saturating_sub(cost), cost, dec!(100)))
}

/// What a buy would pay if its side wins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutPreview {
    /// Estimated payout on a win
    pub estimated_payout: Decimal,
    /// Share of the side's supply after the buy, as a percentage
    pub pot_share_percent: Decimal,
    /// Return on investment, if defined
    pub roi_percent: Option<Decimal>,
    /// Amount lost if the side loses
    pub loss_if_wrong: Decimal,
    /// Pot after the buy's contribution
    pub pot_after: Decimal,
    /// Circulating supply of the side after the buy
    pub circulating_after: Decimal,
}

impl PayoutPreview {
    /// Preview a quote against the market it would trade into
    ///
    /// The quote's shares join the side's circulating supply and its pot leg
    /// joins the pot before the pro-rata split.
    pub fn for_quote(market: &Market, quote: &BuyQuote) -> Self {
        let circulating_after = market.circulating(quote.side).saturating_add(quote.shares_out);
        let pot_after = market.pot.saturating_add(quote.pot_contribution);
        let payout = estimated_payout(quote.shares_out, pot_after, circulating_after);

        Self {
            estimated_payout: payout,
            pot_share_percent: pot_share_percent(quote.shares_out, circulating_after),
            roi_percent: roi_percent(payout, quote.total_cost),
            loss_if_wrong: quote.total_cost,
            pot_after,
            circulating_after,
        }
    }
}
