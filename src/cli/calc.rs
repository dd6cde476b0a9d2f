//! Offline calculator commands

use super::print_json;
use crate::config::Config;
use crate::market::Pool;
use crate::pricing::{
    classify_crowding, estimated_payout, implied_odds, pot_share_percent, roi_percent,
    validate_non_negative, validate_pool,
};
use crate::timing::{Phase, TimeRemaining};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct OddsArgs {
    /// YES reserve
    #[arg(long)]
    pub yes_reserve: Decimal,

    /// NO reserve
    #[arg(long)]
    pub no_reserve: Decimal,
}

impl OddsArgs {
    pub fn execute(&self, config: &Config, json: bool) -> anyhow::Result<()> {
        let pool = Pool::new(self.yes_reserve, self.no_reserve);
        validate_pool(&pool)?;

        let yes = implied_odds(pool.yes_reserve, pool.no_reserve);
        let crowding = classify_crowding(
            pool.yes_reserve,
            pool.no_reserve,
            config.pricing.crowding_threshold,
        );

        if json {
            #[derive(Serialize)]
            struct Out<'a> {
                yes_odds: Decimal,
                no_odds: Decimal,
                crowding: &'a crate::pricing::Crowding,
            }
            return print_json(&Out {
                yes_odds: yes,
                no_odds: Decimal::ONE_HUNDRED - yes,
                crowding: &crowding,
            });
        }

        println!("YES: {}%", yes);
        println!("NO:  {}%", Decimal::ONE_HUNDRED - yes);
        println!("Crowding: {}", crowding.description);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct PayoutArgs {
    /// Shares held
    #[arg(long)]
    pub shares: Decimal,

    /// Pot size
    #[arg(long)]
    pub pot: Decimal,

    /// Circulating supply of the side
    #[arg(long)]
    pub supply: Decimal,

    /// Cost paid, for ROI
    #[arg(long)]
    pub cost: Option<Decimal>,
}

#[derive(Serialize)]
struct PayoutOut {
    estimated_payout: Decimal,
    pot_share_percent: Decimal,
    roi_percent: Option<Decimal>,
}

impl PayoutArgs {
    pub fn execute(&self, json: bool) -> anyhow::Result<()> {
        let shares = validate_non_negative("shares", self.shares)?;
        let pot = validate_non_negative("pot", self.pot)?;
        let supply = validate_non_negative("supply", self.supply)?;

        let payout = estimated_payout(shares, pot, supply);
        let out = PayoutOut {
            estimated_payout: payout,
            pot_share_percent: pot_share_percent(shares, supply),
            roi_percent: self.cost.and_then(|cost| roi_percent(payout, cost)),
        };

        if json {
            return print_json(&out);
        }

        println!("Estimated payout: {}", out.estimated_payout.round_dp(6));
        println!("Pot share: {}%", out.pot_share_percent.round_dp(4));
        match (self.cost, out.roi_percent) {
            (Some(_), Some(roi)) => println!("ROI: {}%", roi.round_dp(2)),
            (Some(_), None) => println!("ROI: undefined for zero cost"),
            (None, _) => {}
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct PhaseArgs {
    /// Seconds until close
    #[arg(long)]
    pub remaining: u64,

    /// Total market duration in seconds (defaults to config)
    #[arg(long)]
    pub duration: Option<u64>,
}

impl PhaseArgs {
    pub fn execute(&self, config: &Config, json: bool) -> anyhow::Result<()> {
        let duration = self.duration.unwrap_or(config.timing.market_duration_secs);
        let remaining =
            TimeRemaining::from_seconds(self.remaining, duration, &config.timing.thresholds);
        let max_order = config.timing.entry_limits.max_order_size(self.remaining);

        if json {
            #[derive(Serialize)]
            struct Out {
                time_remaining: TimeRemaining,
                max_order: Decimal,
            }
            return print_json(&Out {
                time_remaining: remaining,
                max_order,
            });
        }

        println!("Countdown: {}", remaining.countdown());
        println!(
            "Phase: {} ({}% remaining)",
            remaining.phase(),
            remaining.reading.percent_remaining.round_dp(2)
        );
        println!("Max order: {} shares", max_order);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ConvictionArgs {
    /// Stake amount
    #[arg(long)]
    pub stake: Decimal,

    /// Entry phase
    #[arg(long, value_enum)]
    pub phase: Phase,

    /// Conviction to match in every open phase
    #[arg(long)]
    pub target: Option<Decimal>,
}

#[derive(Serialize)]
struct MatchingStake {
    phase: Phase,
    stake: Option<Decimal>,
}

impl ConvictionArgs {
    pub fn execute(&self, config: &Config, json: bool) -> anyhow::Result<()> {
        let stake = validate_non_negative("stake", self.stake)?;
        let weights = &config.design.policy.conviction_weights;
        let weight = weights.weight(self.phase);
        let conviction = weights.conviction(stake, self.phase);

        let matching: Vec<MatchingStake> = match self.target {
            Some(target) => Phase::OPEN
                .iter()
                .map(|&phase| MatchingStake {
                    phase,
                    stake: weights.matching_stake(target, phase),
                })
                .collect(),
            None => Vec::new(),
        };

        if json {
            #[derive(Serialize)]
            struct Out {
                weight: Decimal,
                conviction: Decimal,
                matching: Vec<MatchingStake>,
            }
            return print_json(&Out {
                weight,
                conviction,
                matching,
            });
        }

        println!("Weight: {}x", weight);
        println!("Conviction: {}", conviction);
        for m in &matching {
            match m.stake {
                Some(stake) => println!("  {} stake for same conviction: {}", m.phase, stake.round_dp(6)),
                None => println!("  {}: no stake reaches it", m.phase),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_odds_rejects_negative_reserve() {
        let args = OddsArgs {
            yes_reserve: dec!(-1),
            no_reserve: dec!(10),
        };
        assert!(args.execute(&Config::default(), false).is_err());
    }

    #[test]
    fn test_payout_rejects_negative_supply() {
        let args = PayoutArgs {
            shares: dec!(10),
            pot: dec!(100),
            supply: dec!(-5),
            cost: None,
        };
        assert!(args.execute(true).is_err());
    }

    #[test]
    fn test_calculators_run() {
        let config = Config::default();
        OddsArgs {
            yes_reserve: dec!(400000),
            no_reserve: dec!(600000),
        }
        .execute(&config, true)
        .unwrap();
        PhaseArgs {
            remaining: 0,
            duration: None,
        }
        .execute(&config, false)
        .unwrap();
        ConvictionArgs {
            stake: dec!(100),
            phase: Phase::Early,
            target: Some(dec!(150)),
        }
        .execute(&config, false)
        .unwrap();
    }
}
