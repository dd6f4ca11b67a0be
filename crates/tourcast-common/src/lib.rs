//! tourcast-common — Shared error types used across the Tourcast crates.

pub mod error;

pub use error::ApiError;
