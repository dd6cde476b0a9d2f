//! Derived market snapshot

use crate::market::{Market, Side};
use crate::pricing::{side_odds, Crowding};
use crate::timing::{Phase, TimeRemaining};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Everything displayed for one market at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSnapshot {
    /// Market as last read
    pub market: Market,
    /// YES implied odds in percent
    pub implied_odds: Decimal,
    /// Countdown and phase
    pub time_remaining: TimeRemaining,
    /// Reserve imbalance
    pub crowding: Crowding,
    /// Whether trades are accepted
    pub trading_open: bool,
    /// Largest order allowed right now
    pub max_order: Decimal,
    /// When the market was read
    pub fetched_at: DateTime<Utc>,
}

impl MarketSnapshot {
    /// Current phase
    pub fn phase(&self) -> Phase {
        self.time_remaining.phase()
    }

    /// Odds of `side` in percent
    pub fn side_odds(&self, side: Side) -> Decimal {
        side_odds(self.implied_odds, side)
    }

    /// Market price of one `side` share
    pub fn share_price(&self, side: Side) -> Decimal {
        self.side_odds(side) / Decimal::ONE_HUNDRED
    }
}
