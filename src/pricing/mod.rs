//! Pricing module
//!
//! Implied odds, buy quote breakdown, payout estimation and crowding
//! classification. Everything here is a pure function of its inputs.

pub(crate) mod arith;
pub mod crowding;
pub mod odds;
pub mod payout;
pub mod quote;
mod types;

pub use crowding::{classify_crowding, CrowdedSide, Crowding};
pub use odds::{implied_odds, side_odds};
pub use payout::{estimated_payout, pot_share_percent, roi_percent, PayoutPreview};
pub use quote::{simulate_buy_quote, BuyQuote, QuoteOrigin};
pub use types::{validate_market, validate_non_negative, validate_pool, CalcError};
