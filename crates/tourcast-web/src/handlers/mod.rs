//! HTTP handlers for all API routes.

pub mod system;
pub mod params;
pub mod calculate;
pub mod demo;
pub mod ai_estimate;
