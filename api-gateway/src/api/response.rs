//! Standardized API response formats
//!
//! Every successful body is wrapped as `{"data": ..., "meta": {...}}` so clients
//! can rely on a single envelope for single records and collections alike.

use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Header carrying the per-request ID set by the request-id middleware
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Response envelope for single resources
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// The response data
    pub data: T,
    /// Optional metadata about the response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMetadata>,
}

/// Response envelope for collections
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiListResponse<T> {
    /// The list of items
    pub data: Vec<T>,
    /// Optional metadata about the response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMetadata>,
}

/// Additional metadata about the response
#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseMetadata {
    /// Request ID for tracking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Number of items in a collection response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

/// Request ID assigned to the current request, if any
pub fn request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl<T: Serialize> IntoResponse for ApiListResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl<T> ApiResponse<T> {
    /// Create a new API response with just data
    pub fn new(data: T) -> Self {
        Self { data, meta: None }
    }

    /// Attach the request ID, when there is one
    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        if request_id.is_some() {
            self.meta = Some(ResponseMetadata {
                request_id,
                count: None,
            });
        }
        self
    }
}

impl<T> ApiListResponse<T> {
    /// Create a new list response; the item count is always reported
    pub fn new(data: Vec<T>, request_id: Option<String>) -> Self {
        let count = data.len();
        Self {
            data,
            meta: Some(ResponseMetadata {
                request_id,
                count: Some(count),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_request_id_from_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_id(&headers), None);

        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("abc-123"));
        assert_eq!(request_id(&headers).as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_envelopes_serialize() {
        let single = serde_json::to_value(ApiResponse::new(1)).unwrap();
        assert_eq!(single, serde_json::json!({ "data": 1 }));

        let list = serde_json::to_value(ApiListResponse::new(vec![1, 2], Some("r1".to_string()))).unwrap();
        assert_eq!(
            list,
            serde_json::json!({ "data": [1, 2], "meta": { "request_id": "r1", "count": 2 } })
        );
    }
}
