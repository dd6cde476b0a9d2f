//! Best-effort buy quotes
//!
//! The contract's quote is authoritative. When it cannot be read the quote is
//! simulated from reserves, using the last contribution rate observed in a
//! remote quote and the configured rate only if none has been seen.

use super::MarketSource;
use crate::market::{Market, Side};
use crate::pricing::{implied_odds, simulate_buy_quote, BuyQuote};
use crate::telemetry::{increment, CounterMetric};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Quote provider with local simulation fallback
pub struct QuoteService<S> {
    source: Arc<S>,
    fallback_rate: Decimal,
    observed_rate: RwLock<Option<Decimal>>,
}

impl<S: MarketSource> QuoteService<S> {
    /// Create a quote service over `source`
    pub fn new(source: Arc<S>, fallback_rate: Decimal) -> Self {
        Self {
            source,
            fallback_rate,
            observed_rate: RwLock::new(None),
        }
    }

    /// Contribution rate used for simulated quotes
    pub async fn contribution_rate(&self) -> Decimal {
        self.observed_rate.read().await.unwrap_or(self.fallback_rate)
    }

    /// Quote buying `shares_out` of `side` in `market`
    ///
    /// Non-positive amounts produce no quote. Never fails otherwise.
    pub async fn quote_buy(&self, market: &Market, side: Side, shares_out: Decimal) -> Option<BuyQuote> {
        if shares_out <= Decimal::ZERO {
            return None;
        }

        match self.source.quote_buy(market.id, side, shares_out).await {
            Ok(quote) => {
                if let Some(rate) = quote.contribution_rate() {
                    *self.observed_rate.write().await = Some(rate);
                }
                Some(quote)
            }
            Err(e) => {
                tracing::warn!(
                    market = %market.id,
                    side = %side,
                    source = self.source.name(),
                    error = %e,
                    "Remote quote failed, simulating locally"
                );
                increment(CounterMetric::SimulatedQuote, "quote_buy");
                let pool = market.pool_or_default();
                let odds = implied_odds(pool.yes_reserve, pool.no_reserve);
                let rate = self.contribution_rate().await;
                simulate_buy_quote(side, shares_out, odds, rate)
            }
        }
    }
}
