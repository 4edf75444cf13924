// Copyright (c) 2025 Taleforge
// SPDX-License-Identifier: BUSL-1.1
//! Mapping of pipeline errors onto HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Structured error body returned by every endpoint on failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub status: String,
    pub code: String,
    pub message: String,
}

/// Error caught at the request-handling boundary.
///
/// Pipeline errors convert via `From<GenerationError>`: 400 for invalid
/// input, 429 for provider throttling, 500 for everything else. No partial
/// result is ever returned alongside one of these.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: "not_found",
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        let status = match &err {
            GenerationError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            GenerationError::UpstreamThrottled(_) => StatusCode::TOO_MANY_REQUESTS,
            GenerationError::UpstreamMalformed(_)
            | GenerationError::UpstreamUnavailable(_)
            | GenerationError::PersistenceFailure(_)
            | GenerationError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            status: "error".to_string(),
            code: self.code.to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
