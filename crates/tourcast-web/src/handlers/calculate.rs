//! Calculation API — runs the Comparable estimator on caller-supplied metrics.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tourcast_common::ApiError;
use tourcast_estimator::{
    ComparableEstimator, EstimationResult, EstimatorParams, MetricSet, ParamsOverride,
};
use tracing::info;

use crate::error::{from_estimate, from_json_rejection};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    pub artist_data: Option<MetricSet>,
    pub custom_params: Option<ParamsOverride>,
    pub target_tier: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateInput {
    pub artist_data: MetricSet,
    pub params: EstimatorParams,
    pub target_tier: String,
}

#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub success: bool,
    pub input: CalculateInput,
    pub result: EstimationResult,
}

/// POST /api/calculate
pub async fn calculate(
    State(state): State<SharedState>,
    body: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<Json<CalculateResponse>, ApiError> {
    let Json(req) = body.map_err(from_json_rejection)?;

    let artist_data = req
        .artist_data
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError::BadRequest("missing artist data".to_string()))?;
    let target_tier = req.target_tier.unwrap_or_else(|| state.default_tier.clone());
    let params = match req.custom_params {
        Some(patch) => state.params.with_overrides(patch),
        None => state.params.clone(),
    };

    let result = ComparableEstimator::new(params.clone())
        .estimate(&artist_data, &target_tier)
        .map_err(from_estimate)?;

    info!(
        tier = %result.applied_tier,
        neutral = result.output.neutral.value,
        "calculation served"
    );

    Ok(Json(CalculateResponse {
        success: true,
        input: CalculateInput { artist_data, params, target_tier },
        result,
    }))
}
