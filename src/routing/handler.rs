//! Handler interface for matched routes.
//!
//! Handlers are resolved once, when a route is registered. Dispatch calls
//! the stored trait object directly; there is no lookup by name per request.

use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use futures_util::future::BoxFuture;

/// Something that turns a matched request into a response.
pub trait RouteHandler: Send + Sync + 'static {
    fn handle(&self, req: Request<Body>) -> BoxFuture<'static, Response>;
}

/// Shared handle to a route handler.
pub type SharedHandler = Arc<dyn RouteHandler>;

impl<F, Fut> RouteHandler for F
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn handle(&self, req: Request<Body>) -> BoxFuture<'static, Response> {
        Box::pin(self(req))
    }
}

/// Wrap a handler value into a [`SharedHandler`].
pub fn shared<H: RouteHandler>(handler: H) -> SharedHandler {
    Arc::new(handler)
}
