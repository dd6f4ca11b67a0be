//! Parameter introspection.

use axum::{extract::State, Json};
use tourcast_estimator::EstimatorParams;

use crate::state::SharedState;

/// GET /api/params/default — the active default parameters verbatim.
pub async fn default_params(State(state): State<SharedState>) -> Json<EstimatorParams> {
    Json(state.params.clone())
}
