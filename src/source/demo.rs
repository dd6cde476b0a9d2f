//! Fixed demo dataset
//!
//! Stands in for the live contract when it cannot be reached.

use super::{MarketSource, SourceError};
use crate::market::{Market, MarketId, Pool, Side};
use crate::pricing::{implied_odds, simulate_buy_quote, BuyQuote};
use crate::timing::DEFAULT_MARKET_DURATION_SECS;
use alloy_primitives::{address, Address, U256};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const DEMO_MARKET_ID: &str = "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";

const DEMO_RESOLVER: Address = address!("7efd20565D24f6bf5F01e4E514D330cd4cEfB471");

/// Demo market source backed by a fixed snapshot
#[derive(Debug, Clone)]
pub struct DemoSource {
    market: Market,
    contribution_rate: Decimal,
}

impl DemoSource {
    /// Demo market closing `DEFAULT_MARKET_DURATION_SECS` from now
    pub fn new(contribution_rate: Decimal) -> Self {
        Self::with_duration(contribution_rate, DEFAULT_MARKET_DURATION_SECS)
    }

    /// Demo market closing `duration_secs` from now
    pub fn with_duration(contribution_rate: Decimal, duration_secs: u64) -> Self {
        let market = Market {
            id: U256::from_str_radix(DEMO_MARKET_ID, 16).unwrap_or(U256::from(1u64)),
            description: "WILL @BLKNOIZ06 MENTION $HST AND/OR @HYPERSTITIONS IN THE NEXT 8 HOURS?"
                .to_string(),
            resolver: DEMO_RESOLVER,
            close_time: close_after(duration_secs),
            pot: dec!(1000000),
            yes_supply: dec!(500000),
            no_supply: dec!(300000),
            resolved: false,
            outcome: None,
            pool: Some(Pool::new(dec!(400000), dec!(600000))),
        };
        Self {
            market,
            contribution_rate,
        }
    }

    /// The demo market snapshot
    pub fn demo_market(&self) -> &Market {
        &self.market
    }
}

/// Now plus `duration_secs`, pinned to the latest representable time
fn close_after(duration_secs: u64) -> DateTime<Utc> {
    i64::try_from(duration_secs)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|d| Utc::now().checked_add_signed(d))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[async_trait]
impl MarketSource for DemoSource {
    fn name(&self) -> &'static str {
        "demo"
    }

    async fn market_count(&self) -> Result<u64, SourceError> {
        Ok(1)
    }

    async fn market(&self, _id: MarketId) -> Result<Option<Market>, SourceError> {
        Ok(Some(self.market.clone()))
    }

    async fn markets(&self, start: u64, count: u64) -> Result<Vec<Market>, SourceError> {
        if start == 0 && count > 0 {
            Ok(vec![self.market.clone()])
        } else {
            Ok(vec![])
        }
    }

    async fn pool(&self, _id: MarketId) -> Result<Option<Pool>, SourceError> {
        Ok(self.market.pool)
    }

    async fn quote_buy(
        &self,
        _id: MarketId,
        side: Side,
        shares_out: Decimal,
    ) -> Result<BuyQuote, SourceError> {
        let pool = self.market.pool_or_default();
        let odds = implied_odds(pool.yes_reserve, pool.no_reserve);
        simulate_buy_quote(side, shares_out, odds, self.contribution_rate)
            .ok_or(SourceError::NonPositiveAmount)
    }

    async fn balance_of(&self, _owner: Address, _token_id: U256) -> Result<Decimal, SourceError> {
        Ok(Decimal::ZERO)
    }
}
