//! Time phase classification
//!
//! A market's life is split into early, mid and late thirds by the share of
//! its duration still remaining. Phase drives both the V2 payout bucket and the
//! V3 conviction weight.

mod limits;

pub use limits::{EntryLimits, OrderError};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default market duration (8 hours)
pub const DEFAULT_MARKET_DURATION_SECS: u64 = 8 * 3600;

/// Market phase by time remaining
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// More than two thirds remaining
    Early,
    /// Between one and two thirds remaining
    Mid,
    /// Final third
    Late,
    /// Trading closed
    Closed,
}

impl Phase {
    /// Open phases in chronological order
    pub const OPEN: [Phase; 3] = [Phase::Early, Phase::Mid, Phase::Late];
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Early => "early",
            Phase::Mid => "mid",
            Phase::Late => "late",
            Phase::Closed => "closed",
        };
        f.write_str(label)
    }
}

/// Percent-remaining cutoffs between phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseThresholds {
    /// Above this percentage remaining the market is early
    pub early_above: Decimal,
    /// Above this percentage remaining the market is mid
    pub mid_above: Decimal,
}

impl Default for PhaseThresholds {
    fn default() -> Self {
        Self {
            early_above: dec!(66),
            mid_above: dec!(33),
        }
    }
}

/// Phase together with the percentage of duration remaining
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseReading {
    /// Classified phase
    pub phase: Phase,
    /// Percentage of total duration remaining, capped at 100
    pub percent_remaining: Decimal,
}

/// Classify the phase from seconds remaining and total market duration
///
/// Zero remaining is always closed. A zero duration treats any open market as
/// fully remaining.
pub fn classify_phase(
    seconds_remaining: u64,
    total_duration_secs: u64,
    thresholds: &PhaseThresholds,
) -> PhaseReading {
    if seconds_remaining == 0 {
        return PhaseReading {
            phase: Phase::Closed,
            percent_remaining: Decimal::ZERO,
        };
    }

    let percent_remaining = if total_duration_secs == 0 {
        dec!(100)
    } else {
        (Decimal::from(seconds_remaining) / Decimal::from(total_duration_secs) * dec!(100))
            .min(dec!(100))
    };

    let phase = if percent_remaining > thresholds.early_above {
        Phase::Early
    } else if percent_remaining > thresholds.mid_above {
        Phase::Mid
    } else {
        Phase::Late
    };

    PhaseReading {
        phase,
        percent_remaining,
    }
}

/// Countdown to market close
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRemaining {
    /// Total seconds until close
    pub total_seconds: u64,
    /// Whole hours remaining
    pub hours: u64,
    /// Minutes past the hour
    pub minutes: u64,
    /// Seconds past the minute
    pub seconds: u64,
    /// Phase reading
    pub reading: PhaseReading,
}

impl TimeRemaining {
    /// Time remaining from `now` until `close_time`
    pub fn until(
        close_time: DateTime<Utc>,
        now: DateTime<Utc>,
        total_duration_secs: u64,
        thresholds: &PhaseThresholds,
    ) -> Self {
        let remaining = (close_time - now).num_seconds().max(0) as u64;
        Self::from_seconds(remaining, total_duration_secs, thresholds)
    }

    /// Time remaining from a raw second count
    pub fn from_seconds(
        remaining: u64,
        total_duration_secs: u64,
        thresholds: &PhaseThresholds,
    ) -> Self {
        Self {
            total_seconds: remaining,
            hours: remaining / 3600,
            minutes: (remaining % 3600) / 60,
            seconds: remaining % 60,
            reading: classify_phase(remaining, total_duration_secs, thresholds),
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.reading.phase
    }

    /// Countdown formatted as `HH:MM:SS`
    pub fn countdown(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn classify(remaining: u64) -> PhaseReading {
        classify_phase(
            remaining,
            DEFAULT_MARKET_DURATION_SECS,
            &PhaseThresholds::default(),
        )
    }

    #[test]
    fn test_zero_remaining_is_closed() {
        let reading = classify(0);
        assert_eq!(reading.phase, Phase::Closed);
        assert_eq!(reading.percent_remaining, dec!(0));
    }

    #[test]
    fn test_phase_boundaries() {
        // 8h market: 100% early
        assert_eq!(classify(8 * 3600).phase, Phase::Early);
        // 6h = 75%
        assert_eq!(classify(6 * 3600).phase, Phase::Early);
        // 4h = 50%
        assert_eq!(classify(4 * 3600).phase, Phase::Mid);
        // 2h = 25%
        assert_eq!(classify(2 * 3600).phase, Phase::Late);
        // 1 second left is still late, not closed
        assert_eq!(classify(1).phase, Phase::Late);
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        // Exactly 66% is mid, exactly 33% is late
        let thresholds = PhaseThresholds::default();
        assert_eq!(classify_phase(66, 100, &thresholds).phase, Phase::Mid);
        assert_eq!(classify_phase(33, 100, &thresholds).phase, Phase::Late);
        assert_eq!(classify_phase(67, 100, &thresholds).phase, Phase::Early);
    }

    #[test]
    fn test_percent_remaining_capped() {
        let reading = classify(16 * 3600);
        assert_eq!(reading.percent_remaining, dec!(100));
        assert_eq!(reading.phase, Phase::Early);
    }

    #[test]
    fn test_duration_is_a_parameter() {
        // 1h left of a 24h market is late, of a 90min market is mid
        let thresholds = PhaseThresholds::default();
        assert_eq!(classify_phase(3600, 24 * 3600, &thresholds).phase, Phase::Late);
        assert_eq!(classify_phase(3600, 5400, &thresholds).phase, Phase::Early);
        assert_eq!(classify_phase(2700, 5400, &thresholds).phase, Phase::Mid);
    }

    #[test]
    fn test_zero_duration() {
        let reading = classify_phase(10, 0, &PhaseThresholds::default());
        assert_eq!(reading.phase, Phase::Early);
        assert_eq!(reading.percent_remaining, dec!(100));
    }

    #[test]
    fn test_time_remaining_breakdown() {
        let now = Utc::now();
        let close = now + Duration::seconds(3 * 3600 + 25 * 60 + 7);
        let remaining = TimeRemaining::until(
            close,
            now,
            DEFAULT_MARKET_DURATION_SECS,
            &PhaseThresholds::default(),
        );
        assert_eq!(remaining.hours, 3);
        assert_eq!(remaining.minutes, 25);
        assert_eq!(remaining.seconds, 7);
        assert_eq!(remaining.countdown(), "03:25:07");
        assert_eq!(remaining.phase(), Phase::Mid);
    }

    #[test]
    fn test_time_remaining_after_close() {
        let now = Utc::now();
        let remaining = TimeRemaining::until(
            now - Duration::minutes(5),
            now,
            DEFAULT_MARKET_DURATION_SECS,
            &PhaseThresholds::default(),
        );
        assert_eq!(remaining.total_seconds, 0);
        assert_eq!(remaining.phase(), Phase::Closed);
    }
}
