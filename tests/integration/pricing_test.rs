//! Integration tests for odds, quotes and payouts

use pamm_calc::market::{Market, Pool, Side};
use pamm_calc::pricing::{
    estimated_payout, implied_odds, pot_share_percent, roi_percent, simulate_buy_quote,
    validate_market, PayoutPreview,
};
use pamm_calc::timing::{classify_phase, Phase, PhaseThresholds};
use alloy_primitives::{Address, U256};
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_odds_are_complementary() {
    let reserves = [
        (dec!(400000), dec!(600000)),
        (dec!(1), dec!(2)),
        (dec!(333), dec!(667)),
        (dec!(0.5), dec!(1234.5678)),
    ];
    for (yes, no) in reserves {
        assert_eq!(implied_odds(yes, no) + implied_odds(no, yes), dec!(100));
    }
    assert_eq!(implied_odds(dec!(400000), dec!(600000)), dec!(60));
    assert_eq!(implied_odds(dec!(0), dec!(0)), dec!(50));
}

#[test]
fn test_quote_legs_add_up() {
    for side in [Side::Yes, Side::No] {
        let quote = simulate_buy_quote(side, dec!(1234), dec!(37.5), dec!(0.15)).unwrap();
        assert_eq!(quote.total_cost, quote.amm_cost + quote.pot_contribution);
        assert_eq!(quote.effective_price, quote.total_cost / quote.shares_out);
    }
    assert!(simulate_buy_quote(Side::Yes, dec!(-1), dec!(50), dec!(0.15)).is_none());
}

#[test]
fn test_payout_example() {
    assert_eq!(estimated_payout(dec!(1500), dec!(1000000), dec!(500000)), dec!(3000));
    assert_eq!(pot_share_percent(dec!(1500), dec!(500000)), dec!(0.3));
    assert_eq!(estimated_payout(dec!(1500), dec!(1000000), Decimal::ZERO), Decimal::ZERO);
    assert_eq!(roi_percent(dec!(3000), Decimal::ZERO), None);
}

#[test]
fn test_zero_remaining_is_closed() {
    let reading = classify_phase(0, 28800, &PhaseThresholds::default());
    assert_eq!(reading.phase, Phase::Closed);
    assert_eq!(reading.percent_remaining, Decimal::ZERO);
}

#[test]
fn test_preview_and_validation() {
    let market = Market {
        id: U256::from(1u64),
        description: "q".to_string(),
        resolver: Address::ZERO,
        close_time: Utc::now(),
        pot: dec!(1000000),
        yes_supply: dec!(500000),
        no_supply: dec!(300000),
        resolved: false,
        outcome: None,
        pool: Some(Pool::new(dec!(400000), dec!(600000))),
    };
    assert!(validate_market(&market).is_ok());

    let quote = simulate_buy_quote(Side::Yes, dec!(100), dec!(60), dec!(0.15)).unwrap();
    let preview = PayoutPreview::for_quote(&market, &quote);
    assert_eq!(preview.pot_after, dec!(1000009));
    assert_eq!(preview.circulating_after, dec!(500100));
    assert_eq!(preview.loss_if_wrong, dec!(69));

    let mut bad = market.clone();
    bad.pot = dec!(-1);
    assert!(validate_market(&bad).is_err());
}
