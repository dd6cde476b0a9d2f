//! Two-tier data source
//!
//! Every read goes to the primary first. A failed primary read is logged,
//! counted, and answered by the fallback instead.

use super::{MarketSource, SourceError};
use crate::market::{Market, MarketId, Pool, Side};
use crate::pricing::BuyQuote;
use crate::telemetry::{increment, CounterMetric};
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Primary source with a fallback tier
pub struct FallbackSource<P, F> {
    primary: P,
    fallback: F,
}

impl<P: MarketSource, F: MarketSource> FallbackSource<P, F> {
    /// Pair a primary source with its fallback
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    /// Primary tier
    pub fn primary(&self) -> &P {
        &self.primary
    }

    /// Fallback tier
    pub fn fallback(&self) -> &F {
        &self.fallback
    }

    fn degrade(&self, operation: &'static str, error: &SourceError) {
        tracing::warn!(
            operation,
            primary = self.primary.name(),
            fallback = self.fallback.name(),
            error = %error,
            "Primary source failed, using fallback"
        );
        increment(CounterMetric::SourceFallback, operation);
    }
}

#[async_trait]
impl<P: MarketSource, F: MarketSource> MarketSource for FallbackSource<P, F> {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn market_count(&self) -> Result<u64, SourceError> {
        match self.primary.market_count().await {
            Ok(count) => Ok(count),
            Err(e) => {
                self.degrade("market_count", &e);
                self.fallback.market_count().await
            }
        }
    }

    async fn market(&self, id: MarketId) -> Result<Option<Market>, SourceError> {
        match self.primary.market(id).await {
            Ok(market) => Ok(market),
            Err(e) => {
                self.degrade("market", &e);
                self.fallback.market(id).await
            }
        }
    }

    async fn markets(&self, start: u64, count: u64) -> Result<Vec<Market>, SourceError> {
        match self.primary.markets(start, count).await {
            Ok(markets) => Ok(markets),
            Err(e) => {
                self.degrade("markets", &e);
                self.fallback.markets(start, count).await
            }
        }
    }

    async fn pool(&self, id: MarketId) -> Result<Option<Pool>, SourceError> {
        match self.primary.pool(id).await {
            Ok(pool) => Ok(pool),
            Err(e) => {
                self.degrade("pool", &e);
                self.fallback.pool(id).await
            }
        }
    }

    async fn quote_buy(
        &self,
        id: MarketId,
        side: Side,
        shares_out: Decimal,
    ) -> Result<BuyQuote, SourceError> {
        match self.primary.quote_buy(id, side, shares_out).await {
            Ok(quote) => Ok(quote),
            Err(SourceError::NonPositiveAmount) => Err(SourceError::NonPositiveAmount),
            Err(e) => {
                self.degrade("quote_buy", &e);
                self.fallback.quote_buy(id, side, shares_out).await
            }
        }
    }

    async fn balance_of(&self, owner: Address, token_id: U256) -> Result<Decimal, SourceError> {
        match self.primary.balance_of(owner, token_id).await {
            Ok(balance) => Ok(balance),
            Err(e) => {
                self.degrade("balance_of", &e);
                self.fallback.balance_of(owner, token_id).await
            }
        }
    }

    async fn trading_open(&self, id: MarketId) -> Result<bool, SourceError> {
        match self.primary.trading_open(id).await {
            Ok(open) => Ok(open),
            Err(e) => {
                self.degrade("trading_open", &e);
                self.fallback.trading_open(id).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::DemoSource;
    use rust_decimal_macros::dec;

    struct FailingSource;

    #[async_trait]
    impl MarketSource for FailingSource {
        fn name(&self) -> &'static str {
            "failing"
        }
        async fn market_count(&self) -> Result<u64, SourceError> {
            Err(SourceError::Unavailable("failing"))
        }
        async fn market(&self, _id: MarketId) -> Result<Option<Market>, SourceError> {
            Err(SourceError::Unavailable("failing"))
        }
        async fn markets(&self, _start: u64, _count: u64) -> Result<Vec<Market>, SourceError> {
            Err(SourceError::Unavailable("failing"))
        }
        async fn pool(&self, _id: MarketId) -> Result<Option<Pool>, SourceError> {
            Err(SourceError::Unavailable("failing"))
        }
        async fn quote_buy(
            &self,
            _id: MarketId,
            _side: Side,
            _shares_out: Decimal,
        ) -> Result<BuyQuote, SourceError> {
            Err(SourceError::Unavailable("failing"))
        }
        async fn balance_of(&self, _owner: Address, _token_id: U256) -> Result<Decimal, SourceError> {
            Err(SourceError::Unavailable("failing"))
        }
    }

    #[tokio::test]
    async fn test_failed_primary_uses_fallback() {
        let source = FallbackSource::new(FailingSource, DemoSource::new(dec!(0.15)));
        let market = source.market(U256::from(9u64)).await.unwrap();
        assert!(market.is_some());
        assert_eq!(source.market_count().await.unwrap(), 1);
        assert_eq!(source.markets(0, 20).await.unwrap().len(), 1);
        assert!(source.pool(U256::ZERO).await.unwrap().is_some());
        assert_eq!(
            source.balance_of(Address::ZERO, U256::ZERO).await.unwrap(),
            dec!(0)
        );
        assert!(source.trading_open(U256::ZERO).await.unwrap());
    }

    #[tokio::test]
    async fn test_healthy_primary_is_preferred() {
        let primary = DemoSource::new(dec!(0.15));
        let expected = primary.demo_market().clone();
        let source = FallbackSource::new(primary, FailingSource);
        let market = source.market(expected.id).await.unwrap().unwrap();
        assert_eq!(market, expected);
    }

    #[tokio::test]
    async fn test_quote_fallback() {
        let source = FallbackSource::new(FailingSource, DemoSource::new(dec!(0.15)));
        let quote = source
            .quote_buy(U256::ZERO, Side::No, dec!(100))
            .await
            .unwrap();
        assert_eq!(quote.total_cost, dec!(46));
    }

    #[tokio::test]
    async fn test_both_tiers_failing_surfaces_error() {
        let source = FallbackSource::new(FailingSource, FailingSource);
        assert!(source.market_count().await.is_err());
    }
}
