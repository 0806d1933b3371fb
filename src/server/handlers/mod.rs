//! HTTP handlers for the relay.

pub mod print;
pub mod printer;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::error::RelayError;

/// `{"message": ...}` body for successful operations.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// `{"error": ...}` response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: "Not found".to_string(),
        }
    }
}

/// Every relay failure, including a bad request body, is a 500.
impl From<RelayError> for ApiError {
    fn from(e: RelayError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Handle GET /health.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "service": "printer-service" }))
}

/// Fallback for unknown paths and unsupported methods.
pub async fn not_found() -> ApiError {
    ApiError::not_found()
}
