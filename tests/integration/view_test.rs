//! Integration tests for market views and the watcher

use pamm_calc::design::DesignVersion;
use pamm_calc::market::Side;
use pamm_calc::source::{DemoSource, QuoteService};
use pamm_calc::timing::Phase;
use pamm_calc::view::{
    MarketView, MarketWatcher, PayoutPanel, ViewSettings, WatchIntervals, WatchTarget,
};
use chrono::Utc;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_views_with_different_designs_coexist() {
    let source = Arc::new(DemoSource::new(dec!(0.15)));
    let market = source.demo_market().clone();
    let quotes = QuoteService::new(source.clone(), dec!(0.15));
    let quote = quotes.quote_buy(&market, Side::Yes, dec!(100)).await.unwrap();

    let v2 = MarketView::new(DesignVersion::V2, ViewSettings::default());
    let v3 = MarketView::new(DesignVersion::V3, ViewSettings::default());
    let now = Utc::now();

    let s2 = v2.snapshot(market.clone(), now);
    let s3 = v3.snapshot(market, now);
    assert_eq!(s2.phase(), Phase::Early);

    match v2.payout_panel(&s2, &quote) {
        PayoutPanel::Bucketed(panel) => assert_eq!(panel.bucket_share_percent, dec!(50)),
        other => panic!("expected bucket panel, got {other:?}"),
    }
    match v3.payout_panel(&s3, &quote) {
        PayoutPanel::Conviction(Some(preview)) => {
            assert_eq!(preview.weight, dec!(1.5));
            assert_eq!(preview.side_odds, dec!(60));
        }
        other => panic!("expected conviction panel, got {other:?}"),
    }
}

#[tokio::test]
async fn test_watcher_stops_cleanly() {
    let source = Arc::new(DemoSource::new(dec!(0.15)));
    let view = Arc::new(MarketView::new(DesignVersion::V1, ViewSettings::default()));
    let watcher = MarketWatcher::spawn(
        source,
        view,
        WatchTarget::Active { page_size: 10 },
        WatchIntervals {
            market: Duration::from_millis(10),
            list: Duration::from_millis(10),
            countdown: Duration::from_millis(5),
        },
    );

    tokio::time::sleep(Duration::from_millis(50)).await;
    let snapshot = watcher.latest().await.unwrap();
    assert!(snapshot.trading_open);
    assert_eq!(snapshot.implied_odds, dec!(60));
    watcher.stop().await;
}
