//! Market commands backed by a data source

use super::{open_source, print_json};
use crate::config::Config;
use crate::design::DesignVersion;
use crate::market::{parse_market_id, Market, MarketId, Side};
use crate::pricing::BuyQuote;
use crate::source::{MarketSource, QuoteService};
use crate::view::{active_market, load_position, MarketSnapshot, MarketView, PayoutPanel, UserPosition};
use alloy_primitives::Address;
use anyhow::Context;
use chrono::Utc;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Market id, decimal or 0x hex (defaults to the active market)
    #[arg(long, value_parser = parse_market_id)]
    pub market: Option<MarketId>,

    /// Side to buy
    #[arg(long, value_enum)]
    pub side: Side,

    /// Shares to buy
    #[arg(long)]
    pub shares: Decimal,

    /// Design version for the payout panel (defaults to config)
    #[arg(long, value_enum)]
    pub version: Option<DesignVersion>,

    /// Use demo data instead of the contract
    #[arg(long)]
    pub offline: bool,
}

#[derive(Serialize)]
struct QuoteOut {
    quote: BuyQuote,
    panel: PayoutPanel,
    order_error: Option<String>,
}

impl QuoteArgs {
    pub async fn execute(&self, config: &Config, json: bool) -> anyhow::Result<()> {
        let source = Arc::new(open_source(config, self.offline)?);
        let market = resolve_market(source.as_ref(), self.market, config.refresh.page_size).await?;
        let view = MarketView::new(
            self.version.unwrap_or(config.design.version),
            config.view_settings(),
        );
        let snapshot = view.snapshot(market, Utc::now());

        let quotes = QuoteService::new(source, config.pricing.contribution_rate);
        let quote = quotes
            .quote_buy(&snapshot.market, self.side, self.shares)
            .await
            .context("shares must be positive")?;
        let order_error = view.check_order(&snapshot, self.shares).err().map(|e| e.to_string());
        let panel = view.payout_panel(&snapshot, &quote);

        if json {
            return print_json(&QuoteOut {
                quote,
                panel,
                order_error,
            });
        }

        print_quote(&quote);
        print_panel(&panel);
        if let Some(err) = order_error {
            println!("Warning: {}", err);
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct MarketArgs {
    /// Market id, decimal or 0x hex (defaults to the active market)
    #[arg(long, value_parser = parse_market_id)]
    pub market: Option<MarketId>,

    /// Design version (defaults to config)
    #[arg(long, value_enum)]
    pub version: Option<DesignVersion>,

    /// Show this account's position
    #[arg(long)]
    pub owner: Option<Address>,

    /// Preview a YES and NO buy of this many shares
    #[arg(long)]
    pub stake: Option<Decimal>,

    /// Use demo data instead of the contract
    #[arg(long)]
    pub offline: bool,
}

#[derive(Serialize)]
struct MarketOut {
    design: DesignVersion,
    snapshot: MarketSnapshot,
    position: Option<UserPosition>,
    previews: Vec<(BuyQuote, PayoutPanel)>,
}

impl MarketArgs {
    pub async fn execute(&self, config: &Config, json: bool) -> anyhow::Result<()> {
        let source = Arc::new(open_source(config, self.offline)?);
        let market = resolve_market(source.as_ref(), self.market, config.refresh.page_size).await?;
        let design = self.version.unwrap_or(config.design.version);
        let view = MarketView::new(design, config.view_settings());
        let snapshot = view.snapshot(market, Utc::now());

        let position = match load_position(source.as_ref(), &snapshot.market, self.owner).await {
            Ok(position) => position,
            Err(e) => {
                tracing::warn!(error = %e, "Could not load position");
                None
            }
        };

        let mut previews = Vec::new();
        if let Some(stake) = self.stake {
            let quotes = QuoteService::new(source.clone(), config.pricing.contribution_rate);
            for side in [Side::Yes, Side::No] {
                if let Some(quote) = quotes.quote_buy(&snapshot.market, side, stake).await {
                    let panel = view.payout_panel(&snapshot, &quote);
                    previews.push((quote, panel));
                }
            }
        }

        if json {
            return print_json(&MarketOut {
                design,
                snapshot,
                position,
                previews,
            });
        }

        println!("Design: {}", design);
        print_snapshot(&snapshot);
        if let Some(position) = &position {
            print_position(position);
        }
        for (quote, panel) in &previews {
            println!();
            print_quote(quote);
            print_panel(panel);
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct MarketsArgs {
    /// First market index
    #[arg(long, default_value_t = 0)]
    pub start: u64,

    /// Markets to list
    #[arg(long, default_value_t = 20)]
    pub count: u64,

    /// Use demo data instead of the contract
    #[arg(long)]
    pub offline: bool,
}

impl MarketsArgs {
    pub async fn execute(&self, config: &Config, json: bool) -> anyhow::Result<()> {
        let source = open_source(config, self.offline)?;
        let markets = source.markets(self.start, self.count).await?;
        let view = MarketView::new(config.design.version, config.view_settings());
        let now = Utc::now();
        let snapshots: Vec<MarketSnapshot> =
            markets.into_iter().map(|m| view.snapshot(m, now)).collect();

        if json {
            return print_json(&snapshots);
        }

        if snapshots.is_empty() {
            println!("No markets");
        }
        for s in &snapshots {
            println!(
                "{:#x}  YES {:>6}%  {:>8}  {:<6}  {}",
                s.market.id,
                s.implied_odds,
                s.time_remaining.countdown(),
                s.phase(),
                s.market.description
            );
        }
        Ok(())
    }
}

/// Load `id`, or the active market when no id is given
pub(crate) async fn resolve_market<S: MarketSource + ?Sized>(
    source: &S,
    id: Option<MarketId>,
    page_size: u64,
) -> anyhow::Result<Market> {
    match id {
        Some(id) => source
            .market(id)
            .await?
            .with_context(|| format!("market {:#x} not found", id)),
        None => {
            let markets = source.markets(0, page_size).await?;
            active_market(&markets, Utc::now())
                .cloned()
                .context("no active market")
        }
    }
}

pub(crate) fn print_snapshot(s: &MarketSnapshot) {
    println!("Market {:#x}", s.market.id);
    println!("  {}", s.market.description);
    println!(
        "  Odds: YES {}% / NO {}%",
        s.implied_odds,
        s.side_odds(Side::No)
    );
    println!("  Pot: {}", s.market.pot.round_dp(4));
    println!(
        "  Supply: YES {} / NO {}",
        s.market.yes_supply.round_dp(4),
        s.market.no_supply.round_dp(4)
    );
    println!(
        "  Closes in {} ({}, {}% remaining)",
        s.time_remaining.countdown(),
        s.phase(),
        s.time_remaining.reading.percent_remaining.round_dp(2)
    );
    println!("  Crowding: {}", s.crowding.description);
    if s.market.resolved {
        match s.market.outcome {
            Some(side) => println!("  Resolved: {} won", side),
            None => println!("  Resolved"),
        }
    } else if s.trading_open {
        println!("  Trading open, max order {} shares", s.max_order);
    } else {
        println!("  Trading closed");
    }
}

fn print_position(p: &UserPosition) {
    println!("Position of {}", p.owner);
    for side in [Side::Yes, Side::No] {
        let pos = p.side(side);
        println!(
            "  {}: {} shares, {}% of side, payout {}",
            side,
            pos.balance.round_dp(4),
            pos.pot_share_percent.round_dp(2),
            pos.estimated_payout.round_dp(4)
        );
    }
}

fn print_quote(q: &BuyQuote) {
    println!("Buy {} {} ({:?} quote)", q.shares_out, q.side, q.origin);
    println!("  AMM cost:          {}", q.amm_cost.round_dp(6));
    println!("  Pot contribution:  {}", q.pot_contribution.round_dp(6));
    println!("  Total cost:        {}", q.total_cost.round_dp(6));
    println!("  Effective price:   {}", q.effective_price.round_dp(6));
}

fn print_roi(roi: Option<Decimal>) {
    match roi {
        Some(roi) => println!("  ROI:               {}%", roi.round_dp(2)),
        None => println!("  ROI:               undefined"),
    }
}

fn print_panel(panel: &PayoutPanel) {
    match panel {
        PayoutPanel::Proportional(p) => {
            println!("  Est. payout:       {}", p.estimated_payout.round_dp(6));
            println!("  Pot share:         {}%", p.pot_share_percent.round_dp(4));
            print_roi(p.roi_percent);
            println!("  Loss if wrong:     {}", p.loss_if_wrong.round_dp(6));
        }
        PayoutPanel::Bucketed(b) => {
            println!(
                "  Bucket:            {} ({}% of prediction pot)",
                b.phase, b.bucket_share_percent
            );
            println!("  Bucket pot:        {}", b.bucket_pot.round_dp(4));
            println!("  Builder pot:       {}", b.builder_pot.round_dp(4));
            println!("  Est. payout:       {}", b.estimated_payout.round_dp(6));
            print_roi(b.roi_percent);
        }
        PayoutPanel::Conviction(Some(c)) => {
            println!("  Weight:            {}x", c.weight);
            println!("  Conviction:        {}", c.conviction.round_dp(6));
            println!("  Pot share:         {}%", c.pot_share_percent.round_dp(4));
            println!("  Est. payout:       {}", c.estimated_payout.round_dp(6));
            print_roi(c.roi_percent);
            println!(
                "  Same stake early:  {}%, late: {}%",
                c.early_share_percent.round_dp(4),
                c.late_share_percent.round_dp(4)
            );
        }
        PayoutPanel::Conviction(None) => println!("  Market closed, no conviction payout"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::DemoSource;
    use alloy_primitives::U256;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_resolve_explicit_and_active() {
        let source = DemoSource::new(dec!(0.15));
        let expected = source.demo_market().id;
        let by_id = resolve_market(&source, Some(U256::from(5u64)), 10).await.unwrap();
        assert_eq!(by_id.id, expected);
        let active = resolve_market(&source, None, 10).await.unwrap();
        assert_eq!(active.id, expected);
    }

    #[tokio::test]
    async fn test_resolve_fails_without_active_market() {
        let source = DemoSource::with_duration(dec!(0.15), 0);
        assert!(resolve_market(&source, None, 10).await.is_err());
    }

    #[tokio::test]
    async fn test_offline_commands_run() {
        let config = Config::default();
        QuoteArgs {
            market: None,
            side: Side::Yes,
            shares: dec!(100),
            version: Some(DesignVersion::V2),
            offline: true,
        }
        .execute(&config, true)
        .await
        .unwrap();

        MarketArgs {
            market: None,
            version: Some(DesignVersion::V3),
            owner: Some(Address::ZERO),
            stake: Some(dec!(50)),
            offline: true,
        }
        .execute(&config, false)
        .await
        .unwrap();

        MarketsArgs {
            start: 0,
            count: 5,
            offline: true,
        }
        .execute(&config, false)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_quote_rejects_zero_shares() {
        let args = QuoteArgs {
            market: None,
            side: Side::No,
            shares: dec!(0),
            version: None,
            offline: true,
        };
        assert!(args.execute(&Config::default(), false).await.is_err());
    }
}
