//! Responses produced by the routing layer itself.
//!
//! Only unmatched or undecodable paths are answered here; every matched
//! request is answered by its route handler.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::routing::NotFound;

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'static str,
    path: &'a str,
}

/// 404 response for a path no route matched.
pub fn not_found(err: &NotFound) -> Response {
    let body = ErrorBody {
        error: "not_found",
        path: &err.path,
    };
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

/// 400 response for a path whose percent-decoding is not valid UTF-8.
pub fn bad_path(path: &str) -> Response {
    let body = ErrorBody {
        error: "invalid_path",
        path,
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

impl IntoResponse for NotFound {
    fn into_response(self) -> Response {
        not_found(&self)
    }
}
