//! Late-entry order caps

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Order size rejections
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// Requested shares exceed the cap for the current window
    #[error("Order of {requested} shares exceeds cap of {max}")]
    TooLarge {
        /// Requested shares
        requested: Decimal,
        /// Cap in force
        max: Decimal,
    },
}

/// Order size caps, tightened near close
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryLimits {
    /// Seconds before close when the late cap applies
    pub late_window_secs: u64,
    /// Max order size inside the late window
    pub late_max_order: Decimal,
    /// Max order size otherwise
    pub max_order: Decimal,
}

impl Default for EntryLimits {
    fn default() -> Self {
        Self {
            late_window_secs: 2 * 3600,
            late_max_order: dec!(500),
            max_order: dec!(10000),
        }
    }
}

impl EntryLimits {
    /// Whether `seconds_remaining` falls in the late-entry window
    pub fn is_late_entry(&self, seconds_remaining: u64) -> bool {
        seconds_remaining < self.late_window_secs
    }

    /// Max order size for the time remaining
    pub fn max_order_size(&self, seconds_remaining: u64) -> Decimal {
        if self.is_late_entry(seconds_remaining) {
            self.late_max_order
        } else {
            self.max_order
        }
    }

    /// Reject orders above the cap in force
    pub fn check_order_size(&self, shares: Decimal, seconds_remaining: u64) -> Result<(), OrderError> {
        let max = self.max_order_size(seconds_remaining);
        if shares > max {
            return Err(OrderError::TooLarge {
                requested: shares,
                max,
            });
        }
        Ok(())
    }
}
