//! Integration tests for pamm-calc

mod config_test;
mod design_test;
mod pricing_test;
mod source_test;
mod view_test;
