//! pamm-calc: pricing and payout calculator for PAMM prediction markets
//!
//! This library provides the core components for:
//! - Implied odds, buy quotes and payout estimation
//! - Time phases, entry limits and conviction weighting
//! - Bucketed and builder-pot payout designs (V1/V2/V3)
//! - Read-only PAMM contract access with demo fallback
//! - Cancellable periodic refresh and live market views
//! - Structured logging and Prometheus metrics

pub mod cli;
pub mod config;
pub mod design;
pub mod market;
pub mod pricing;
pub mod refresh;
pub mod source;
pub mod telemetry;
pub mod timing;
pub mod view;

