/**
 * Error Conversion
 *
 * Turns a `BackendError` into a JSON response:
 *
 * ```json
 * { "error": "Validation failed", "status": 400, "errors": { "email": "..." } }
 * ```
 */

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status.as_u16(), self);
        }

        let mut body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });
        if let Some(errors) = self.field_errors() {
            body["errors"] = serde_json::to_value(errors).unwrap_or_default();
        }

        (status, Json(body)).into_response()
    }
}

// Bodies that parse but miss the request shape report 400, not 422.
impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection.status() {
            StatusCode::UNPROCESSABLE_ENTITY => StatusCode::BAD_REQUEST,
            status => status,
        };
        Self::handler(status, rejection.body_text())
    }
}

impl From<QueryRejection> for BackendError {
    fn from(rejection: QueryRejection) -> Self {
        Self::handler(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for BackendError {
    fn from(rejection: PathRejection) -> Self {
        Self::handler(rejection.status(), rejection.body_text())
    }
}
