//! Model-assisted estimation: infer metrics from an artist name, then calculate.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tourcast_common::ApiError;
use tourcast_estimator::{ComparableEstimator, EstimationResult, MetricSet};
use tourcast_llm::LlmError;
use tracing::info;

use crate::error::{from_estimate, from_json_rejection, from_llm};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiEstimateRequest {
    pub artist_name: Option<String>,
    pub target_tier: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AiEstimateResponse {
    pub success: bool,
    pub artist: String,
    pub model: String,
    pub metrics: MetricSet,
    pub result: EstimationResult,
}

/// POST /api/ai/estimate
pub async fn ai_estimate(
    State(state): State<SharedState>,
    body: Result<Json<AiEstimateRequest>, JsonRejection>,
) -> Result<Json<AiEstimateResponse>, ApiError> {
    let Json(req) = body.map_err(from_json_rejection)?;

    let artist = req
        .artist_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::BadRequest("missing artist name".to_string()))?;
    let target_tier = req.target_tier.unwrap_or_else(|| state.default_tier.clone());

    let estimator = state
        .metrics_estimator
        .as_ref()
        .ok_or_else(|| from_llm(LlmError::MissingCredentials))?;
    let metrics = estimator.estimate(&artist).await.map_err(from_llm)?;

    let result = ComparableEstimator::new(state.params.clone())
        .estimate(&metrics, &target_tier)
        .map_err(from_estimate)?;

    info!(artist = %artist, neutral = result.output.neutral.value, "model-assisted estimate served");

    Ok(Json(AiEstimateResponse {
        success: true,
        model: estimator.model_id().to_string(),
        artist,
        metrics,
        result,
    }))
}
