//! Integration tests for the payout designs

use pamm_calc::design::{BucketShares, ConvictionWeights, DesignPolicy};
use pamm_calc::timing::Phase;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_conviction_ordering() {
    let weights = ConvictionWeights::default();
    let stake = dec!(100);
    let early = weights.conviction(stake, Phase::Early);
    let mid = weights.conviction(stake, Phase::Mid);
    let late = weights.conviction(stake, Phase::Late);
    let closed = weights.conviction(stake, Phase::Closed);

    assert!(early > mid && mid > late && late > closed);
    assert_eq!(closed, Decimal::ZERO);
    assert_eq!(early, dec!(150));
    assert_eq!(late, dec!(60));
    assert_eq!(weights.matching_stake(dec!(150), Phase::Late), Some(dec!(250)));
}

#[test]
fn test_bucket_shares_sum_to_100() {
    let shares = BucketShares::default();
    let total: Decimal = [Phase::Early, Phase::Mid, Phase::Late]
        .into_iter()
        .map(|p| shares.share(p))
        .sum();
    assert_eq!(total, dec!(100));
    assert!(DesignPolicy::default().validate().is_ok());
}
