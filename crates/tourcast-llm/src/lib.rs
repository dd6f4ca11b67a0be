//! tourcast-llm — Language-model collaborator.
//! Infers an artist's engagement metrics from their name through an
//! OpenAI-compatible chat completion endpoint.

pub mod backend;
pub mod audit;
pub mod metrics_estimator;

pub use backend::{LlmBackend, LlmError, OpenAiCompatibleBackend};
pub use metrics_estimator::MetricsEstimator;
