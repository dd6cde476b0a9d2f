//! CLI interface for pamm-calc
//!
//! Provides subcommands for:
//! - `odds`, `payout`, `phase`, `conviction`: offline calculators
//! - `quote`: buy quote with the design's payout panel
//! - `market`, `markets`: market snapshots from the contract
//! - `watch`: live refresh until Ctrl-C
//! - `config`: show the effective configuration

mod calc;
mod market;
mod watch;

pub use calc::{ConvictionArgs, OddsArgs, PayoutArgs, PhaseArgs};
pub use market::{MarketArgs, MarketsArgs, QuoteArgs};
pub use watch::WatchArgs;

use crate::config::Config;
use crate::source::{DemoSource, FallbackSource, MarketSource, PammClient};
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "pamm-calc")]
#[command(about = "Pricing and payout calculator for PAMM prediction markets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Implied odds and crowding from pool reserves
    Odds(OddsArgs),
    /// Quote a buy and preview its payout
    Quote(QuoteArgs),
    /// Pro-rata payout for a share holding
    Payout(PayoutArgs),
    /// Countdown phase for a time remaining
    Phase(PhaseArgs),
    /// Conviction weight for a stake
    Conviction(ConvictionArgs),
    /// Snapshot of one market
    Market(MarketArgs),
    /// List markets
    Markets(MarketsArgs),
    /// Follow a market until Ctrl-C
    Watch(WatchArgs),
    /// Show configuration
    Config,
}

/// Live contract with demo fallback, or demo data only when offline
pub(crate) fn open_source(config: &Config, offline: bool) -> anyhow::Result<Box<dyn MarketSource>> {
    let demo = DemoSource::with_duration(
        config.pricing.contribution_rate,
        config.timing.market_duration_secs,
    );
    if offline || config.source.offline {
        tracing::info!("Using demo market data");
        return Ok(Box::new(demo));
    }
    let client = PammClient::with_config(config.source.pamm())?;
    Ok(Box::new(FallbackSource::new(client, demo)))
}

/// Print `value` as pretty JSON
pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
