//! Fixed demonstration run.

use axum::{extract::State, Json};
use serde::Serialize;
use tourcast_common::ApiError;
use tourcast_estimator::demo::{run_demo, DemoReport};

use crate::error::from_estimate;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct DemoResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: DemoReport,
}

/// GET /api/demo — fixed walkthrough against the active default parameters.
pub async fn demo(State(state): State<SharedState>) -> Result<Json<DemoResponse>, ApiError> {
    let report = run_demo(&state.params).map_err(from_estimate)?;
    Ok(Json(DemoResponse { success: true, report }))
}
