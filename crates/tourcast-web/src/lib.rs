//! tourcast-web — HTTP surface for the Comparable box-office estimator.
//! Provides:
//!   - default parameter lookup
//!   - calculation with caller overrides
//!   - the fixed walkthrough demo
//!   - model-assisted metric estimation
//!   - health and contact endpoints

pub mod router;
pub mod handlers;
pub mod state;
pub mod error;
