//! Market data sources
//!
//! Read-only access to market metadata, pool reserves, quotes and balances.
//! `FallbackSource` pairs a live source with a fallback so callers never see a
//! failed read, and `QuoteService` treats remote quotes as best effort.

mod demo;
mod fallback;
mod pamm;
mod quote;
mod types;

pub use demo::DemoSource;
pub use fallback::FallbackSource;
pub use pamm::{PammClient, PammConfig, MONAD_TESTNET_RPC, PAMM_ADDRESS};
pub use quote::QuoteService;
pub use types::SourceError;

use crate::market::{Market, MarketId, Pool, Side};
use crate::pricing::BuyQuote;
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

/// Trait for market data source implementations
#[async_trait]
pub trait MarketSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;
    /// Number of markets
    async fn market_count(&self) -> Result<u64, SourceError>;
    /// Single market by id, `None` if it does not exist
    async fn market(&self, id: MarketId) -> Result<Option<Market>, SourceError>;
    /// Page of markets starting at `start`
    async fn markets(&self, start: u64, count: u64) -> Result<Vec<Market>, SourceError>;
    /// Pool reserves for a market
    async fn pool(&self, id: MarketId) -> Result<Option<Pool>, SourceError>;
    /// Authoritative buy quote for `shares_out` of `side`
    async fn quote_buy(
        &self,
        id: MarketId,
        side: Side,
        shares_out: Decimal,
    ) -> Result<BuyQuote, SourceError>;
    /// Token balance of `owner`
    async fn balance_of(&self, owner: Address, token_id: U256) -> Result<Decimal, SourceError>;

    /// Whether the market accepts trades
    ///
    /// Defaults to the local check on the market's close time.
    async fn trading_open(&self, id: MarketId) -> Result<bool, SourceError> {
        Ok(self
            .market(id)
            .await?
            .is_some_and(|m| m.is_trading_open(Utc::now())))
    }
}

#[async_trait]
impl<T: MarketSource + ?Sized> MarketSource for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn market_count(&self) -> Result<u64, SourceError> {
        (**self).market_count().await
    }

    async fn market(&self, id: MarketId) -> Result<Option<Market>, SourceError> {
        (**self).market(id).await
    }

    async fn markets(&self, start: u64, count: u64) -> Result<Vec<Market>, SourceError> {
        (**self).markets(start, count).await
    }

    async fn pool(&self, id: MarketId) -> Result<Option<Pool>, SourceError> {
        (**self).pool(id).await
    }

    async fn quote_buy(
        &self,
        id: MarketId,
        side: Side,
        shares_out: Decimal,
    ) -> Result<BuyQuote, SourceError> {
        (**self).quote_buy(id, side, shares_out).await
    }

    async fn balance_of(&self, owner: Address, token_id: U256) -> Result<Decimal, SourceError> {
        (**self).balance_of(owner, token_id).await
    }

    async fn trading_open(&self, id: MarketId) -> Result<bool, SourceError> {
        (**self).trading_open(id).await
    }
}
