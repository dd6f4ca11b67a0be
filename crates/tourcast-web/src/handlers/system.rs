//! Health check and contact form.

use axum::{extract::rejection::JsonRejection, Json};
use serde::Serialize;
use serde_json::Value;
use tourcast_common::ApiError;
use tracing::info;
use uuid::Uuid;

use crate::error::from_json_rejection;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub timestamp: String,
}

/// GET /api/health
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactAck {
    pub success: bool,
    pub message: &'static str,
    pub reference: Uuid,
}

/// POST /api/contact — investor enquiries are only logged.
pub async fn contact(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ContactAck>, ApiError> {
    let Json(enquiry) = body.map_err(from_json_rejection)?;
    let reference = Uuid::new_v4();
    info!(%reference, %enquiry, "contact enquiry received");
    Ok(Json(ContactAck {
        success: true,
        message: "Thank you for your interest!",
        reference,
    }))
}
