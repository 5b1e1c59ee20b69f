//! Request extractors
//!
//! Drop-in replacements for axum's `Json`, `Query` and `Path` whose
//! rejections are `BackendError`, so a malformed body, query string or path
//! segment gets the same JSON error body as every other failure.

use axum::extract::{FromRequest, FromRequestParts};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::backend::error::BackendError;

/// JSON body extractor and response
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(BackendError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[derive(Debug, Clone, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(BackendError))]
pub struct Query<T>(pub T);

#[derive(Debug, Clone, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(BackendError))]
pub struct Path<T>(pub T);
