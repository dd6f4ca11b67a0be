//! Shared application state for the web server.

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tourcast_config::Config;
use tourcast_estimator::EstimatorParams;
use tourcast_llm::{MetricsEstimator, OpenAiCompatibleBackend};
use tracing::{info, warn};

/// Shared state injected into every Axum handler. Read-only after startup.
pub struct AppState {
    /// Built-in (or file-provided) parameters; `GET /api/params/default`.
    pub params: EstimatorParams,
    /// Tier used when a request names none.
    pub default_tier: String,
    pub static_dir: String,
    /// `None` when no API key is configured.
    pub metrics_estimator: Option<MetricsEstimator>,
}

impl AppState {
    pub fn new(params: EstimatorParams) -> Self {
        Self {
            params,
            default_tier: "tier1".to_string(),
            static_dir: "static".to_string(),
            metrics_estimator: None,
        }
    }

    pub fn with_metrics_estimator(mut self, estimator: MetricsEstimator) -> Self {
        self.metrics_estimator = Some(estimator);
        self
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let params = config.load_params()?;
        let mut state = Self::new(params);
        state.default_tier = config.estimator.default_tier.clone();
        state.static_dir = config.server.static_dir.clone();

        match &config.llm.api_key {
            Some(key) => {
                let backend = OpenAiCompatibleBackend::new(
                    config.llm.base_url.clone(),
                    config.llm.model.clone(),
                    SecretString::from(key.expose_secret().to_owned()),
                    Duration::from_secs(config.llm.timeout_secs),
                )?;
                info!(model = %config.llm.model, base_url = %config.llm.base_url, "model-assisted estimation enabled");
                state = state.with_metrics_estimator(MetricsEstimator::new(Arc::new(backend)));
            }
            None => warn!("OPENAI_API_KEY not set; /api/ai/estimate will report the service as unconfigured"),
        }
        Ok(state)
    }
}

pub type SharedState = Arc<AppState>;
