//! Market views
//!
//! A `MarketView` turns raw market reads into everything the dashboard shows:
//! odds, countdown, crowding and the payout panel of its design version. The
//! version is injected per view, so several views can coexist.

mod panel;
mod position;
mod snapshot;
mod watcher;

pub use panel::{BucketPanel, PayoutPanel};
pub use position::{load_position, SidePosition, UserPosition};
pub use snapshot::MarketSnapshot;
pub use watcher::{MarketWatcher, WatchIntervals, WatchTarget};

use crate::design::{BuilderActions, ConvictionPreview, ConvictionTotals, DesignPolicy, DesignVersion};
use crate::market::Market;
use crate::pricing::crowding::DEFAULT_CROWDING_THRESHOLD;
use crate::pricing::odds::NEUTRAL_ODDS;
use crate::pricing::{classify_crowding, implied_odds, BuyQuote, PayoutPreview};
use crate::timing::{
    EntryLimits, OrderError, PhaseThresholds, TimeRemaining, DEFAULT_MARKET_DURATION_SECS,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Policy inputs shared by every view
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSettings {
    /// Market duration used for phase classification
    pub total_duration_secs: u64,
    /// Phase boundaries
    pub thresholds: PhaseThresholds,
    /// Reserve ratio above which a side counts as crowded
    pub crowding_threshold: Decimal,
    /// Order size caps
    pub entry_limits: EntryLimits,
    /// Design constants
    pub policy: DesignPolicy,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            total_duration_secs: DEFAULT_MARKET_DURATION_SECS,
            thresholds: PhaseThresholds::default(),
            crowding_threshold: DEFAULT_CROWDING_THRESHOLD,
            entry_limits: EntryLimits::default(),
            policy: DesignPolicy::default(),
        }
    }
}

/// Renders markets under one design version
#[derive(Debug, Clone)]
pub struct MarketView {
    design: DesignVersion,
    settings: ViewSettings,
    builder_actions: BuilderActions,
}

impl MarketView {
    /// Create a view for `design`
    pub fn new(design: DesignVersion, settings: ViewSettings) -> Self {
        Self {
            design,
            settings,
            builder_actions: BuilderActions::default(),
        }
    }

    /// Builder actions counted toward the V2 multiplier
    pub fn with_builder_actions(mut self, actions: BuilderActions) -> Self {
        self.builder_actions = actions;
        self
    }

    /// Design version of this view
    pub fn design(&self) -> DesignVersion {
        self.design
    }

    /// View settings
    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    /// Derive a snapshot of `market` at `now`
    ///
    /// Odds stay neutral until both reserves are funded.
    pub fn snapshot(&self, market: Market, now: DateTime<Utc>) -> MarketSnapshot {
        let pool = market.pool_or_default();
        let odds = if pool.is_seeded() {
            implied_odds(pool.yes_reserve, pool.no_reserve)
        } else {
            NEUTRAL_ODDS
        };
        let crowding = classify_crowding(
            pool.yes_reserve,
            pool.no_reserve,
            self.settings.crowding_threshold,
        );

        let mut snapshot = MarketSnapshot {
            market,
            implied_odds: odds,
            time_remaining: TimeRemaining::from_seconds(
                0,
                self.settings.total_duration_secs,
                &self.settings.thresholds,
            ),
            crowding,
            trading_open: false,
            max_order: Decimal::ZERO,
            fetched_at: now,
        };
        self.tick(&mut snapshot, now);
        snapshot
    }

    /// Advance the clock-dependent fields of `snapshot` to `now`
    pub fn tick(&self, snapshot: &mut MarketSnapshot, now: DateTime<Utc>) {
        let settings = &self.settings;
        snapshot.time_remaining = if snapshot.market.resolved {
            TimeRemaining::from_seconds(0, settings.total_duration_secs, &settings.thresholds)
        } else {
            TimeRemaining::until(
                snapshot.market.close_time,
                now,
                settings.total_duration_secs,
                &settings.thresholds,
            )
        };
        snapshot.trading_open = snapshot.market.is_trading_open(now);
        snapshot.max_order = settings
            .entry_limits
            .max_order_size(snapshot.time_remaining.total_seconds);
    }

    /// Check an order against the current entry limits
    pub fn check_order(&self, snapshot: &MarketSnapshot, shares: Decimal) -> Result<(), OrderError> {
        self.settings
            .entry_limits
            .check_order_size(shares, snapshot.time_remaining.total_seconds)
    }

    /// Payout panel for `quote` under this view's design
    pub fn payout_panel(&self, snapshot: &MarketSnapshot, quote: &BuyQuote) -> PayoutPanel {
        let market = &snapshot.market;
        let policy = &self.settings.policy;

        match self.design {
            DesignVersion::V1 => PayoutPanel::Proportional(PayoutPreview::for_quote(market, quote)),
            DesignVersion::V2 => PayoutPanel::Bucketed(BucketPanel::compute(
                policy,
                market,
                quote,
                snapshot.phase(),
                &self.builder_actions,
            )),
            DesignVersion::V3 => {
                // Share supply stands in for committed conviction; units differ
                let totals = ConvictionTotals {
                    yes: market.yes_supply,
                    no: market.no_supply,
                };
                PayoutPanel::Conviction(ConvictionPreview::compute(
                    &policy.conviction_weights,
                    quote.side,
                    quote.total_cost,
                    snapshot.phase(),
                    market.pot,
                    totals,
                    snapshot.implied_odds,
                ))
            }
        }
    }
}

/// First unresolved market that has not yet closed
pub fn active_market(markets: &[Market], now: DateTime<Utc>) -> Option<&Market> {
    markets.iter().find(|m| m.is_trading_open(now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::{Pool, Side};
    use crate::pricing::{simulate_buy_quote, CrowdedSide};
    use crate::timing::Phase;
    use alloy_primitives::{Address, U256};
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn market(close_in_secs: i64, now: DateTime<Utc>) -> Market {
        Market {
            id: U256::from(7u64),
            description: "Will it ship?".to_string(),
            resolver: Address::ZERO,
            close_time: now + Duration::seconds(close_in_secs),
            pot: dec!(1000000),
            yes_supply: dec!(500000),
            no_supply: dec!(300000),
            resolved: false,
            outcome: None,
            pool: Some(Pool::new(dec!(400000), dec!(600000))),
        }
    }

    fn view(design: DesignVersion) -> MarketView {
        MarketView::new(design, ViewSettings::default())
    }

    #[test]
    fn test_snapshot_derives_odds_and_phase() {
        let now = Utc::now();
        let snapshot = view(DesignVersion::V1).snapshot(market(7 * 3600, now), now);
        assert_eq!(snapshot.implied_odds, dec!(60));
        assert_eq!(snapshot.phase(), Phase::Early);
        assert!(snapshot.trading_open);
        assert_eq!(snapshot.max_order, dec!(10000));
        assert_eq!(snapshot.crowding.side, CrowdedSide::Balanced);
    }

    #[test]
    fn test_unseeded_pool_is_neutral() {
        let now = Utc::now();
        let mut m = market(3600, now);
        m.pool = Some(Pool::new(dec!(0), dec!(1000)));
        let snapshot = view(DesignVersion::V1).snapshot(m, now);
        assert_eq!(snapshot.implied_odds, dec!(50));
    }

    #[test]
    fn test_late_snapshot_caps_orders() {
        let now = Utc::now();
        let v = view(DesignVersion::V1);
        let snapshot = v.snapshot(market(3600, now), now);
        assert_eq!(snapshot.phase(), Phase::Late);
        assert_eq!(snapshot.max_order, dec!(500));
        assert!(v.check_order(&snapshot, dec!(501)).is_err());
        assert!(v.check_order(&snapshot, dec!(500)).is_ok());
    }

    #[test]
    fn test_resolved_market_is_closed() {
        let now = Utc::now();
        let mut m = market(3600, now);
        m.resolved = true;
        m.outcome = Some(Side::Yes);
        let snapshot = view(DesignVersion::V1).snapshot(m, now);
        assert_eq!(snapshot.phase(), Phase::Closed);
        assert!(!snapshot.trading_open);
    }

    #[test]
    fn test_tick_advances_countdown() {
        let now = Utc::now();
        let v = view(DesignVersion::V1);
        let mut snapshot = v.snapshot(market(3600, now), now);
        v.tick(&mut snapshot, now + Duration::seconds(3600));
        assert_eq!(snapshot.time_remaining.total_seconds, 0);
        assert_eq!(snapshot.phase(), Phase::Closed);
        assert!(!snapshot.trading_open);
    }

    #[test]
    fn test_panel_follows_design_version() {
        let now = Utc::now();
        let m = market(7 * 3600, now);
        let quote = simulate_buy_quote(Side::Yes, dec!(100), dec!(60), dec!(0.15)).unwrap();

        for (design, expected) in [
            (DesignVersion::V1, "proportional"),
            (DesignVersion::V2, "bucketed"),
            (DesignVersion::V3, "conviction"),
        ] {
            let v = view(design);
            let snapshot = v.snapshot(m.clone(), now);
            let panel = v.payout_panel(&snapshot, &quote);
            let kind = match panel {
                PayoutPanel::Proportional(_) => "proportional",
                PayoutPanel::Bucketed(_) => "bucketed",
                PayoutPanel::Conviction(_) => "conviction",
            };
            assert_eq!(kind, expected);
        }
    }

    #[test]
    fn test_v1_panel_matches_preview() {
        let now = Utc::now();
        let v = view(DesignVersion::V1);
        let snapshot = v.snapshot(market(7 * 3600, now), now);
        let quote = simulate_buy_quote(Side::Yes, dec!(100), dec!(60), dec!(0.15)).unwrap();
        match v.payout_panel(&snapshot, &quote) {
            PayoutPanel::Proportional(preview) => {
                assert_eq!(preview, PayoutPreview::for_quote(&snapshot.market, &quote));
            }
            other => panic!("unexpected panel {other:?}"),
        }
    }

    #[test]
    fn test_active_market_skips_closed_and_resolved() {
        let now = Utc::now();
        let mut resolved = market(3600, now);
        resolved.resolved = true;
        let expired = market(-10, now);
        let mut open = market(3600, now);
        open.id = U256::from(9u64);

        let markets = vec![resolved, expired, open];
        assert_eq!(active_market(&markets, now).map(|m| m.id), Some(U256::from(9u64)));
        assert!(active_market(&markets[..2], now).is_none());
    }
}
