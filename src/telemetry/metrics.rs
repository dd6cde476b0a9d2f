//! Prometheus metrics
//!
//! Thin wrappers over the `metrics` facade. Without an installed recorder the
//! calls are no-ops.

use metrics::{counter, gauge, histogram};
use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Remote data source request
    SourceRequest,
}

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Primary source read answered by the fallback
    SourceFallback,
    /// Quote computed locally after a remote failure
    SimulatedQuote,
    /// Periodic refresh that could not load its market
    RefreshFailure,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Watched market YES implied odds
    ImpliedOdds,
    /// Watched market percent of duration remaining
    PercentRemaining,
    /// Watched market pot
    Pot,
}

impl LatencyMetric {
    fn name(self) -> &'static str {
        match self {
            LatencyMetric::SourceRequest => "pamm_source_request_latency_ms",
        }
    }
}

impl CounterMetric {
    fn name(self) -> &'static str {
        match self {
            CounterMetric::SourceFallback => "pamm_source_fallback_total",
            CounterMetric::SimulatedQuote => "pamm_quote_simulated_total",
            CounterMetric::RefreshFailure => "pamm_refresh_failure_total",
        }
    }
}

impl GaugeMetric {
    fn name(self) -> &'static str {
        match self {
            GaugeMetric::ImpliedOdds => "pamm_implied_odds_pct",
            GaugeMetric::PercentRemaining => "pamm_percent_remaining",
            GaugeMetric::Pot => "pamm_pot",
        }
    }
}

/// Record a latency measurement for `operation`
pub fn record_latency(metric: LatencyMetric, operation: &'static str, duration: Duration) {
    let ms = duration.as_secs_f64() * 1000.0;
    tracing::trace!(metric = metric.name(), operation, value_ms = ms, "Recording latency");
    histogram!(metric.name(), "operation" => operation).record(ms);
}

/// Increment a counter for `operation`
pub fn increment(metric: CounterMetric, operation: &'static str) {
    counter!(metric.name(), "operation" => operation).increment(1);
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    tracing::trace!(metric = metric.name(), value, "Setting gauge");
    gauge!(metric.name()).set(value);
}
