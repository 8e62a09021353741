// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The model credential is not configured. Only model routes fail.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The model call failed (network, auth, quota, or model side).
    #[error("AI Error: {0}")]
    Generation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Message for the quota-exceeded case, when the model says how long to wait.
    pub const QUOTA_EXCEEDED: &'static str =
        "AI service quota exceeded. Please wait a moment and try again.";

    /// True for failures that come from the model gateway.
    pub fn is_generation_error(&self) -> bool {
        matches!(self, AppError::Generation(_))
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Configuration(msg) => {
                tracing::error!(error = %msg, "Model gateway not configured");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "configuration_error",
                    Some(msg.clone()),
                )
            }
            AppError::Generation(msg) => {
                tracing::warn!(error = %msg, "Generation failed");
                (StatusCode::BAD_GATEWAY, "generation_error", Some(msg.clone()))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
