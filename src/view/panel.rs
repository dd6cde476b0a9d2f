//! Design-specific payout panels

use crate::design::{bucket_payout, BuilderActions, ConvictionPreview, DesignPolicy};
use crate::market::Market;
use crate::pricing::{roi_percent, BuyQuote, PayoutPreview};
use crate::timing::Phase;
use rust_decimal::Decimal;
use serde::Serialize;

/// Payout panel shown next to a quote
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "design", content = "panel", rename_all = "lowercase")]
pub enum PayoutPanel {
    /// V1: pro-rata share of the whole pot
    Proportional(PayoutPreview),
    /// V2: entry bucket and builder pot
    Bucketed(BucketPanel),
    /// V3: conviction-weighted share; `None` once the market is closed
    Conviction(Option<ConvictionPreview>),
}

/// V2 payout under entry buckets with a builder pot carved out
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketPanel {
    /// Bucket the buy would enter
    pub phase: Phase,
    /// Bucket's share of the prediction pot, in percent
    pub bucket_share_percent: Decimal,
    /// Prediction pot after the split
    pub prediction_pot: Decimal,
    /// Builder pot after the split
    pub builder_pot: Decimal,
    /// Pot slice of the entry bucket
    pub bucket_pot: Decimal,
    /// Estimated payout on a win
    pub estimated_payout: Decimal,
    /// Return on the buy, if defined
    pub roi_percent: Option<Decimal>,
    /// Builder reward multiplier in percent
    pub builder_multiplier_percent: Decimal,
}

impl BucketPanel {
    /// Compute the V2 panel for `quote` entering during `phase`
    ///
    /// Per-bucket share totals are not readable on chain, so the side's
    /// circulating supply after the buy stands in for the bucket total.
    pub fn compute(
        policy: &DesignPolicy,
        market: &Market,
        quote: &BuyQuote,
        phase: Phase,
        actions: &BuilderActions,
    ) -> Self {
        let pot_after = market.pot.saturating_add(quote.pot_contribution);
        let prediction_pot = policy.pot_split.prediction_pot(pot_after);
        let bucket_pot = policy.buckets.bucket_pot(prediction_pot, phase);
        let circulating_after = market.circulating(quote.side).saturating_add(quote.shares_out);
        let payout = bucket_payout(quote.shares_out, circulating_after, bucket_pot);

        Self {
            phase,
            bucket_share_percent: policy.buckets.share(phase),
            prediction_pot,
            builder_pot: policy.pot_split.builder_pot(pot_after),
            bucket_pot,
            estimated_payout: payout,
            roi_percent: roi_percent(payout, quote.total_cost),
            builder_multiplier_percent: policy.action_bonuses.multiplier_percent(actions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::{Pool, Side};
    use crate::pricing::QuoteOrigin;
    use alloy_primitives::{Address, U256};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn market() -> Market {
        Market {
            id: U256::from(1u64),
            description: "q".to_string(),
            resolver: Address::ZERO,
            close_time: Utc::now(),
            pot: dec!(999910),
            yes_supply: dec!(499900),
            no_supply: dec!(300000),
            resolved: false,
            outcome: None,
            pool: Some(Pool::new(dec!(400000), dec!(600000))),
        }
    }

    #[test]
    fn test_bucket_panel_early_entry() {
        // Pot becomes 1,000,000 and YES supply 500,000 after the buy
        let quote = BuyQuote::from_legs(Side::Yes, dec!(100), dec!(60), dec!(90), QuoteOrigin::Remote)
            .unwrap();
        let actions = BuilderActions {
            tweeted: true,
            built: true,
            ..Default::default()
        };
        let panel = BucketPanel::compute(
            &DesignPolicy::default(),
            &market(),
            &quote,
            Phase::Early,
            &actions,
        );

        assert_eq!(panel.prediction_pot, dec!(700000));
        assert_eq!(panel.builder_pot, dec!(300000));
        assert_eq!(panel.bucket_pot, dec!(350000));
        assert_eq!(panel.bucket_share_percent, dec!(50));
        assert_eq!(panel.estimated_payout, dec!(70));
        assert_eq!(panel.builder_multiplier_percent, dec!(225));
    }

    #[test]
    fn test_bucket_panel_closed_pays_nothing() {
        let quote = BuyQuote::from_legs(Side::No, dec!(100), dec!(40), dec!(6), QuoteOrigin::Simulated)
            .unwrap();
        let panel = BucketPanel::compute(
            &DesignPolicy::default(),
            &market(),
            &quote,
            Phase::Closed,
            &BuilderActions::default(),
        );
        assert_eq!(panel.bucket_pot, dec!(0));
        assert_eq!(panel.estimated_payout, dec!(0));
        assert_eq!(panel.roi_percent, Some(dec!(-100)));
        assert_eq!(panel.builder_multiplier_percent, dec!(100));
    }
}
