//! HTTP route handlers

pub mod geometry;
pub mod input;
pub mod snapshot;
pub mod status;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use skirmish_core::CoreError;

/// Core error rendered as a JSON body with a matching status code
pub struct ApiError(CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CoreError::Geometry(_) | CoreError::State(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CoreError::NoSuchAction { .. } | CoreError::NoButton | CoreError::UnknownHex(_) => {
                StatusCode::BAD_REQUEST
            }
        };
        tracing::warn!(%status, error = %self.0, "request rejected");
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
