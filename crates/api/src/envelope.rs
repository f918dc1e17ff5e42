//! The shared response envelope and service-to-HTTP error mapping.
//!
//! Every response, success or failure, is `{success, data|error, timestamp}`.
//! In production mode 5xx messages are replaced with a generic string so
//! internals never leak; 4xx messages stay specific to aid the client.

use std::sync::OnceLock;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use orchestrator::ServiceError;
use serde::Serialize;
use tracing::error;

static PRODUCTION: OnceLock<bool> = OnceLock::new();

/// Record the deployment mode. Called once at startup, before serving.
pub fn set_production(production: bool) {
    let _ = PRODUCTION.set(production);
}

fn is_production() -> bool {
    *PRODUCTION.get().unwrap_or(&false)
}

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// A successful envelope around any serializable payload.
pub fn success<T: Serialize>(data: T) -> Response {
    Json(serde_json::json!({
        "success": true,
        "data": data,
        "timestamp": timestamp(),
    }))
    .into_response()
}

/// An error ready to render as an envelope.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let status = match &err {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Calculation(_) | ServiceError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = if self.status.is_server_error() {
            error!(status = %self.status, message = %self.message, "request failed");
            if is_production() {
                "Internal server error".to_string()
            } else {
                self.message
            }
        } else {
            self.message
        };

        let body = Json(serde_json::json!({
            "success": false,
            "error": message,
            "timestamp": timestamp(),
        }));
        (self.status, body).into_response()
    }
}
