//! Error handling for the API gateway

use axum::{
    extract::{rejection::JsonRejection, Request},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use common::error::Error;
use serde::{Deserialize, Serialize};

use crate::api::response::request_id;

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error information
    pub error: ErrorInfo,
    /// Request ID for tracing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Detailed error information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Error code (string identifier for the error type)
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Common error: {0}")]
    Common(#[from] common::error::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    /// HTTP status, error code and optional details for this error
    fn classify(&self) -> (StatusCode, &'static str, Option<serde_json::Value>) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request", None),
            ApiError::Common(e) => match e {
                // Client errors (4xx)
                Error::AccountNotFound(_) => (StatusCode::NOT_FOUND, "account_not_found", None),
                Error::ValidationError(_) => (StatusCode::BAD_REQUEST, "validation_error", None),

                // Server errors (5xx)
                Error::Cancelled(_) => (StatusCode::SERVICE_UNAVAILABLE, "cancelled", None),
                Error::ConfigurationError(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "configuration_error",
                    None,
                ),
                Error::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None),
                Error::Database { source, .. } => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    Some(serde_json::json!({
                        "db_error": source.to_string(),
                        "code": source.as_database_error().and_then(|dbe| dbe.code().map(|c| c.to_string())),
                    })),
                ),
            },
        }
    }

    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        self.classify().0
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, details) = self.classify();

        // Runs inside the request span, which already carries the request ID
        if status.is_server_error() {
            tracing::error!("API Error: {:?}", &self);
        } else {
            tracing::debug!("API Error: {:?}", &self);
        }

        let info = ErrorInfo {
            code: code.to_string(),
            message: self.to_string(),
            details,
        };

        // `attach_request_id` rebuilds the body from this extension once the
        // request ID is known
        let mut response = (
            status,
            Json(ErrorResponse {
                error: info.clone(),
                request_id: None,
            }),
        )
            .into_response();
        response.extensions_mut().insert(info);
        response
    }
}

/// Middleware filling `request_id` in error bodies from the `x-request-id` header
pub async fn attach_request_id(request: Request, next: Next) -> Response {
    let request_id = request_id(request.headers());
    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<ErrorInfo>() {
        Some(error) if request_id.is_some() => {
            (response.status(), Json(ErrorResponse { error, request_id })).into_response()
        }
        _ => response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Common(Error::AccountNotFound("x".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Common(Error::ValidationError("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Common(Error::Cancelled("x".into())).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::Common(Error::Internal("x".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
    }
}
