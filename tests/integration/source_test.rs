//! Integration tests for data sources and quote fallback

use pamm_calc::market::Side;
use pamm_calc::pricing::QuoteOrigin;
use pamm_calc::source::{DemoSource, FallbackSource, MarketSource, PammClient, PammConfig, QuoteService};
use alloy_primitives::U256;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

/// PAMM client pointed at a port nothing listens on
fn unreachable_client() -> PammClient {
    PammClient::with_config(PammConfig {
        rpc_url: "http://127.0.0.1:9".to_string(),
        timeout: Duration::from_millis(500),
        ..PammConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_unreachable_contract_falls_back_to_demo() {
    let source = FallbackSource::new(unreachable_client(), DemoSource::new(dec!(0.15)));

    let market = assert_ok!(source.market(U256::from(1u64)).await).unwrap();
    assert_eq!(market.pot, dec!(1000000));
    assert_eq!(assert_ok!(source.markets(0, 10).await).len(), 1);
    assert!(assert_ok!(source.trading_open(market.id).await));
}

#[tokio::test]
async fn test_quote_service_simulates_when_contract_is_down() {
    let source = Arc::new(unreachable_client());
    let demo = DemoSource::new(dec!(0.15));
    let service = QuoteService::new(source, dec!(0.15));

    let quote = service
        .quote_buy(demo.demo_market(), Side::No, dec!(100))
        .await
        .unwrap();
    assert_eq!(quote.origin, QuoteOrigin::Simulated);
    assert_eq!(quote.amm_cost, dec!(40));
    assert_eq!(quote.total_cost, dec!(46));
    assert!(service.quote_buy(demo.demo_market(), Side::No, dec!(0)).await.is_none());
}

#[tokio::test]
async fn test_unreachable_contract_surfaces_error_without_fallback() {
    let client = unreachable_client();
    assert_err!(client.market_count().await);
}
