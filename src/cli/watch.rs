//! Watch command implementation

use super::market::print_snapshot;
use super::{open_source, print_json};
use crate::config::Config;
use crate::design::DesignVersion;
use crate::market::{parse_market_id, MarketId};
use crate::view::{MarketView, MarketWatcher, WatchTarget};
use clap::Args;
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Market id, decimal or 0x hex (defaults to the active market)
    #[arg(long, value_parser = parse_market_id)]
    pub market: Option<MarketId>,

    /// Design version (defaults to config)
    #[arg(long, value_enum)]
    pub version: Option<DesignVersion>,

    /// Use demo data instead of the contract
    #[arg(long)]
    pub offline: bool,
}

impl WatchArgs {
    pub async fn execute(&self, config: &Config, json: bool) -> anyhow::Result<()> {
        let source = Arc::new(open_source(config, self.offline)?);
        let view = Arc::new(MarketView::new(
            self.version.unwrap_or(config.design.version),
            config.view_settings(),
        ));
        let target = match self.market {
            Some(id) => WatchTarget::Market(id),
            None => WatchTarget::Active {
                page_size: config.refresh.page_size,
            },
        };
        let intervals = config.refresh.intervals();

        tracing::info!(?target, design = %view.design(), "Watching market");
        let watcher = MarketWatcher::spawn(source, view, target, intervals);

        let mut display = tokio::time::interval(intervals.countdown.max(Duration::from_millis(100)));
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Received Ctrl-C, shutting down");
                    break;
                }

                _ = display.tick() => {
                    let Some(snapshot) = watcher.latest().await else {
                        continue;
                    };
                    if json {
                        print_json(&snapshot)?;
                    } else {
                        println!();
                        print_snapshot(&snapshot);
                    }
                }
            }
        }

        watcher.stop().await;
        Ok(())
    }
}
