//! Request ID handling.
//!
//! # Responsibilities
//! - Assign a UUID v4 request ID to requests that arrive without one
//! - Copy the request ID onto the response
//! - Expose the ID to handlers and log lines
//!
//! # Design Decisions
//! - A client-supplied `x-request-id` is kept as-is
//! - Request ID added as the outermost layer so every span sees it

use axum::http::{HeaderName, Request};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

/// Header carrying the request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Layer that generates a request ID when the client did not send one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid)
}

/// Layer that echoes the request ID back in the response headers.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(X_REQUEST_ID)
}

/// The request ID of `req`, if present and valid UTF-8.
pub fn request_id<B>(req: &Request<B>) -> Option<&str> {
    req.headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
}
