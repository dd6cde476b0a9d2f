//! Live market watcher
//!
//! Up to three jobs share one snapshot: a list scan that picks the active
//! market, a market refresh that re-reads the picked market, and a fast
//! countdown that only advances the clock.

use super::{active_market, MarketSnapshot, MarketView};
use crate::market::{Market, MarketId};
use crate::refresh::PeriodicJob;
use crate::source::MarketSource;
use crate::telemetry::{increment, set_gauge, CounterMetric, GaugeMetric};
use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Which market to follow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchTarget {
    /// A fixed market
    Market(MarketId),
    /// Whichever market is active in the first `page_size` listed
    Active {
        /// Markets to scan per refresh
        page_size: u64,
    },
}

/// Refresh cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchIntervals {
    /// Re-read of the followed market
    pub market: Duration,
    /// Re-scan of the market list for the active market
    pub list: Duration,
    /// Countdown tick
    pub countdown: Duration,
}

impl Default for WatchIntervals {
    fn default() -> Self {
        Self {
            market: Duration::from_secs(10),
            list: Duration::from_secs(30),
            countdown: Duration::from_secs(1),
        }
    }
}

type SharedSnapshot = Arc<RwLock<Option<MarketSnapshot>>>;

/// Keeps a market snapshot current until stopped
pub struct MarketWatcher {
    state: SharedSnapshot,
    list: Option<PeriodicJob>,
    refresh: PeriodicJob,
    countdown: PeriodicJob,
}

impl MarketWatcher {
    /// Start watching `target` through `source`
    pub fn spawn<S: MarketSource + 'static>(
        source: Arc<S>,
        view: Arc<MarketView>,
        target: WatchTarget,
        intervals: WatchIntervals,
    ) -> Self {
        let state: SharedSnapshot = Arc::new(RwLock::new(None));
        let followed: Arc<RwLock<Option<MarketId>>> = Arc::new(RwLock::new(match target {
            WatchTarget::Market(id) => Some(id),
            WatchTarget::Active { .. } => None,
        }));

        let list = match target {
            WatchTarget::Market(_) => None,
            WatchTarget::Active { page_size } => {
                let source = source.clone();
                let view = view.clone();
                let state = state.clone();
                let followed = followed.clone();
                Some(PeriodicJob::spawn("market_list", intervals.list, move || {
                    let source = source.clone();
                    let view = view.clone();
                    let state = state.clone();
                    let followed = followed.clone();
                    async move {
                        let markets = match source.markets(0, page_size).await {
                            Ok(markets) => markets,
                            Err(e) => {
                                tracing::warn!(source = source.name(), error = %e, "Market list refresh failed");
                                increment(CounterMetric::RefreshFailure, "market_list");
                                return;
                            }
                        };
                        match active_market(&markets, Utc::now()) {
                            Some(market) => {
                                let previous = followed.write().await.replace(market.id);
                                if previous != Some(market.id) {
                                    tracing::info!(market = %market.id, "Following active market");
                                }
                                publish(&view, &state, market.clone()).await;
                            }
                            None => {
                                *followed.write().await = None;
                                tracing::warn!(source = source.name(), "No market to watch");
                                increment(CounterMetric::RefreshFailure, "market_list");
                            }
                        }
                    }
                }))
            }
        };

        let refresh = {
            let state = state.clone();
            let view = view.clone();
            PeriodicJob::spawn("market_refresh", intervals.market, move || {
                let source = source.clone();
                let view = view.clone();
                let state = state.clone();
                let followed = followed.clone();
                async move {
                    // Active mode waits for the list scan to pick a market
                    let Some(id) = *followed.read().await else {
                        return;
                    };
                    match source.market(id).await {
                        Ok(Some(market)) => publish(&view, &state, market).await,
                        Ok(None) => {
                            tracing::warn!(source = source.name(), market = %id, "Market not found");
                            increment(CounterMetric::RefreshFailure, "market_refresh");
                        }
                        Err(e) => {
                            tracing::warn!(source = source.name(), error = %e, "Market refresh failed");
                            increment(CounterMetric::RefreshFailure, "market_refresh");
                        }
                    }
                }
            })
        };

        let countdown = {
            let state = state.clone();
            PeriodicJob::spawn("countdown", intervals.countdown, move || {
                let view = view.clone();
                let state = state.clone();
                async move {
                    if let Some(snapshot) = state.write().await.as_mut() {
                        view.tick(snapshot, Utc::now());
                        set_gauge(
                            GaugeMetric::PercentRemaining,
                            snapshot
                                .time_remaining
                                .reading
                                .percent_remaining
                                .to_f64()
                                .unwrap_or_default(),
                        );
                    }
                }
            })
        };

        Self {
            state,
            list,
            refresh,
            countdown,
        }
    }

    /// Latest snapshot, if a refresh has succeeded
    pub async fn latest(&self) -> Option<MarketSnapshot> {
        self.state.read().await.clone()
    }

    /// Whether every job is still running
    pub fn is_running(&self) -> bool {
        self.list.as_ref().map_or(true, PeriodicJob::is_running)
            && self.refresh.is_running()
            && self.countdown.is_running()
    }

    /// Stop all jobs
    pub async fn stop(self) {
        if let Some(list) = self.list {
            list.stop().await;
        }
        self.refresh.stop().await;
        self.countdown.stop().await;
        tracing::info!("Market watcher stopped");
    }
}

async fn publish(view: &MarketView, state: &SharedSnapshot, market: Market) {
    let snapshot = view.snapshot(market, Utc::now());
    publish_gauges(&snapshot);
    tracing::debug!(
        market = %snapshot.market.id,
        odds = %snapshot.implied_odds,
        phase = %snapshot.phase(),
        "Market refreshed"
    );
    *state.write().await = Some(snapshot);
}

fn publish_gauges(snapshot: &MarketSnapshot) {
    set_gauge(
        GaugeMetric::ImpliedOdds,
        snapshot.implied_odds.to_f64().unwrap_or_default(),
    );
    set_gauge(
        GaugeMetric::PercentRemaining,
        snapshot
            .time_remaining
            .reading
            .percent_remaining
            .to_f64()
            .unwrap_or_default(),
    );
    set_gauge(GaugeMetric::Pot, snapshot.market.pot.to_f64().unwrap_or_default());
}
