//! tourcast-estimator — "Comparable" box-office estimation engine.
//!
//! Pipeline: max normalisation → demand index D → live conversion LC →
//! combined index F → ratio calibration against benchmark artists →
//! city-tier premium.

pub mod metrics;
pub mod weights;
pub mod normalise;
pub mod conversion;
pub mod benchmark;
pub mod premium;
pub mod params;
pub mod document;
pub mod estimator;
pub mod demo;

pub use estimator::{ComparableEstimator, EstimateError, EstimationResult};
pub use metrics::MetricSet;
pub use params::EstimatorParams;
pub use document::ParamsOverride;
