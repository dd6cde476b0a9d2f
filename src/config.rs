//! Configuration types for pamm-calc

use crate::design::{DesignError, DesignPolicy, DesignVersion};
use crate::pricing::crowding::DEFAULT_CROWDING_THRESHOLD;
use crate::pricing::quote::DEFAULT_CONTRIBUTION_RATE;
use crate::source::{PammConfig, MONAD_TESTNET_RPC, PAMM_ADDRESS};
use crate::telemetry::LogFormat;
use crate::timing::{EntryLimits, PhaseThresholds, DEFAULT_MARKET_DURATION_SECS};
use crate::view::{ViewSettings, WatchIntervals};
use alloy_primitives::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub design: DesignConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Invalid configuration values
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Design policy constants are inconsistent
    #[error("design policy: {0}")]
    Design(#[from] DesignError),
    /// Market duration must be positive
    #[error("timing.market_duration_secs must be positive")]
    ZeroDuration,
    /// A refresh interval must be positive
    #[error("refresh.{0} must be positive")]
    ZeroInterval(&'static str),
    /// Phase thresholds out of order or range
    #[error("phase thresholds must satisfy 0 <= mid_above < early_above <= 100")]
    Thresholds,
    /// A rate or ratio is outside its range
    #[error("{field} must be in [0, 1], got {value}")]
    OutOfRange {
        /// Offending field
        field: &'static str,
        /// Offending value
        value: Decimal,
    },
    /// The contract address is the zero address
    #[error("source.contract must not be the zero address")]
    ZeroContract,
}

/// Data source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// JSON-RPC endpoint
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// PAMM contract address
    #[serde(default = "default_contract")]
    pub contract: Address,

    /// Request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Skip the live contract and serve demo data only
    #[serde(default)]
    pub offline: bool,
}

fn default_rpc_url() -> String {
    MONAD_TESTNET_RPC.to_string()
}
fn default_contract() -> Address {
    PAMM_ADDRESS
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            contract: default_contract(),
            timeout_secs: default_timeout_secs(),
            offline: false,
        }
    }
}

impl SourceConfig {
    /// Client settings for the PAMM source
    pub fn pamm(&self) -> PammConfig {
        PammConfig {
            rpc_url: self.rpc_url.clone(),
            contract: self.contract,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Pricing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Pot contribution rate used when no remote quote has been seen
    #[serde(default = "default_contribution_rate")]
    pub contribution_rate: Decimal,

    /// Reserve ratio above which a side is crowded
    #[serde(default = "default_crowding_threshold")]
    pub crowding_threshold: Decimal,
}

fn default_contribution_rate() -> Decimal {
    DEFAULT_CONTRIBUTION_RATE
}
fn default_crowding_threshold() -> Decimal {
    DEFAULT_CROWDING_THRESHOLD
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            contribution_rate: default_contribution_rate(),
            crowding_threshold: default_crowding_threshold(),
        }
    }
}

/// Time phase configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Total market duration (seconds)
    #[serde(default = "default_market_duration")]
    pub market_duration_secs: u64,

    /// Phase boundaries in percent remaining
    #[serde(default)]
    pub thresholds: PhaseThresholds,

    /// Order size caps
    #[serde(default)]
    pub entry_limits: EntryLimits,
}

fn default_market_duration() -> u64 {
    DEFAULT_MARKET_DURATION_SECS
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            market_duration_secs: default_market_duration(),
            thresholds: PhaseThresholds::default(),
            entry_limits: EntryLimits::default(),
        }
    }
}

/// Design selection and policy constants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignConfig {
    /// Design version used when none is given on the command line
    #[serde(default)]
    pub version: DesignVersion,

    #[serde(flatten)]
    pub policy: DesignPolicy,
}

/// Refresh cadence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Single market refresh (seconds)
    #[serde(default = "default_market_secs")]
    pub market_secs: u64,

    /// Market list refresh (seconds)
    #[serde(default = "default_list_secs")]
    pub list_secs: u64,

    /// Countdown tick (milliseconds)
    #[serde(default = "default_countdown_ms")]
    pub countdown_ms: u64,

    /// Markets scanned when looking for the active one
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_market_secs() -> u64 {
    10
}
fn default_list_secs() -> u64 {
    30
}
fn default_countdown_ms() -> u64 {
    1000
}
fn default_page_size() -> u64 {
    50
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            market_secs: default_market_secs(),
            list_secs: default_list_secs(),
            countdown_ms: default_countdown_ms(),
            page_size: default_page_size(),
        }
    }
}

impl RefreshConfig {
    /// Watcher intervals
    pub fn intervals(&self) -> WatchIntervals {
        WatchIntervals {
            market: Duration::from_secs(self.market_secs),
            list: Duration::from_secs(self.list_secs),
            countdown: Duration::from_millis(self.countdown_ms),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Prometheus listener port; no exporter when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,

    /// Default log filter, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            metrics_port: None,
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.design.policy.validate()?;

        if self.timing.market_duration_secs == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        let t = &self.timing.thresholds;
        if t.mid_above < Decimal::ZERO
            || t.mid_above >= t.early_above
            || t.early_above > Decimal::ONE_HUNDRED
        {
            return Err(ConfigError::Thresholds);
        }

        for (field, value) in [
            ("pricing.contribution_rate", self.pricing.contribution_rate),
            ("pricing.crowding_threshold", self.pricing.crowding_threshold),
        ] {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }

        for (field, value) in [
            ("market_secs", self.refresh.market_secs),
            ("list_secs", self.refresh.list_secs),
            ("countdown_ms", self.refresh.countdown_ms),
            ("page_size", self.refresh.page_size),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroInterval(field));
            }
        }

        if self.source.contract == Address::ZERO {
            return Err(ConfigError::ZeroContract);
        }

        Ok(())
    }

    /// Settings for market views
    pub fn view_settings(&self) -> ViewSettings {
        ViewSettings {
            total_duration_secs: self.timing.market_duration_secs,
            thresholds: self.timing.thresholds,
            crowding_threshold: self.pricing.crowding_threshold,
            entry_limits: self.timing.entry_limits,
            policy: self.design.policy.clone(),
        }
    }
}
