//! Echo handler.
//!
//! Answers every matched request with a JSON description of the match.
//! Used by the bundled server binary until real notification handlers are
//! plugged in, and by the tests.

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
    Json,
};
use futures_util::future::BoxFuture;
use serde::Serialize;

use crate::http::request::request_id;
use crate::notifications::{Endpoint, NotificationHandlers};
use crate::routing::{shared, MatchedRoute, RouteHandler};

/// Body returned by [`EchoHandler`].
#[derive(Debug, Serialize)]
pub struct EchoBody {
    pub endpoint: Endpoint,
    pub route: String,
    pub method: String,
    pub path: String,
    pub remaining_path: String,
    pub request_id: Option<String>,
}

/// Handler that echoes the matched route back to the caller.
#[derive(Debug, Clone, Copy)]
pub struct EchoHandler {
    endpoint: Endpoint,
}

impl EchoHandler {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }
}

impl RouteHandler for EchoHandler {
    fn handle(&self, req: Request<Body>) -> BoxFuture<'static, Response> {
        let matched = req.extensions().get::<MatchedRoute>().cloned();
        let body = EchoBody {
            endpoint: self.endpoint,
            route: matched.as_ref().map(|m| m.name.clone()).unwrap_or_default(),
            method: req.method().to_string(),
            path: req.uri().path().to_string(),
            remaining_path: matched.map(|m| m.remaining_path).unwrap_or_default(),
            request_id: request_id(&req).map(str::to_string),
        };
        Box::pin(async move { Json(body).into_response() })
    }
}

/// Echo handlers for all three notification endpoints.
pub fn echo_handlers() -> NotificationHandlers {
    NotificationHandlers {
        subscribe: shared(EchoHandler::new(Endpoint::Subscribe)),
        test: shared(EchoHandler::new(Endpoint::Test)),
        list: shared(EchoHandler::new(Endpoint::List)),
    }
}
