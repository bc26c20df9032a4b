//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with a single dispatch fallback
//! - Wire up middleware (request ID, tracing, timeout, limits)
//! - Bind server to listener
//! - Dispatch requests through the route table
//! - Observability (metrics, correlation IDs)

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServiceConfig;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::response;
use crate::notifications::{build_route_table, NotificationHandlers};
use crate::observability::metrics;
use crate::routing::{ConfigurationError, MatchedRoute, RouteTable};

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<RouteTable>,
}

/// HTTP server for the notification routes.
pub struct HttpServer {
    router: Router,
    table: Arc<RouteTable>,
    config: ServiceConfig,
}

impl HttpServer {
    /// Build the route table from `config` and wrap it in a server.
    ///
    /// Fails if the configured routes do not form a valid table.
    pub fn new(
        config: ServiceConfig,
        handlers: &NotificationHandlers,
    ) -> Result<Self, ConfigurationError> {
        let table = build_route_table(&config, handlers)?;
        Ok(Self::with_table(config, table))
    }

    /// Serve an already-built route table.
    pub fn with_table(config: ServiceConfig, table: RouteTable) -> Self {
        let table = Arc::new(table);
        let state = AppState {
            table: table.clone(),
        };
        let router = Self::build_router(&config, state);
        Self {
            router,
            table,
            config,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(ConcurrencyLimitLayer::new(config.listener.max_connections))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mount = %self.table.mount(),
            routes = self.table.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The route table this server dispatches through.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The underlying router, for in-process testing.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Resolve the request path and hand the request to the matched route's handler.
async fn dispatch(State(state): State<AppState>, mut request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&request).unwrap_or("unknown").to_string();

    // Routes match the decoded path, so `sub%73cribe/` is `subscribe/`.
    let path = match urlencoding::decode(request.uri().path()) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => {
            tracing::warn!(request_id = %request_id, path = %request.uri().path(), "Path is not valid UTF-8");
            metrics::record_request("none", 400, start_time);
            return response::bad_path(request.uri().path());
        }
    };

    let (route_name, handler) = match state.table.resolve(&path) {
        Ok(m) => {
            request.extensions_mut().insert(MatchedRoute::from(&m));
            (m.route.name.clone(), m.route.handler.clone())
        }
        Err(not_found) => {
            tracing::warn!(request_id = %request_id, path = %path, "No route matched");
            metrics::record_not_found(start_time);
            return response::not_found(&not_found);
        }
    };

    tracing::debug!(
        request_id = %request_id,
        method = %request.method(),
        path = %path,
        route = %route_name,
        "Dispatching request"
    );

    let response = handler.handle(request).await;
    metrics::record_request(&route_name, response.status().as_u16(), start_time);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::echo::echo_handlers;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    fn router() -> Router {
        HttpServer::new(ServiceConfig::default(), &echo_handlers())
            .unwrap()
            .into_router()
    }

    async fn call(path: &str) -> (StatusCode, serde_json::Value) {
        let response = router()
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_dispatch_to_matched_route() {
        let (status, body) = call("/notifications/subscribe/extra").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["route"], "notifications_subscribe");
        assert_eq!(body["endpoint"], "subscribe");
        assert_eq!(body["remaining_path"], "subscribe/extra");

        let (_, body) = call("/notifications/pretest/").await;
        assert_eq!(body["route"], "notifications_test");

        let (_, body) = call("/notifications/").await;
        assert_eq!(body["route"], "notifications_get");
        assert_eq!(body["endpoint"], "list");
    }

    #[tokio::test]
    async fn test_unmatched_path_is_404() {
        let (status, body) = call("/notifications/unknown/path").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["path"], "/notifications/unknown/path");

        let (status, _) = call("/elsewhere/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_percent_encoded_path_is_decoded() {
        let (status, body) = call("/notifications/sub%73cribe/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["route"], "notifications_subscribe");
        assert_eq!(body["remaining_path"], "subscribe/");

        let (_, body) = call("/notifications/pre%74est/").await;
        assert_eq!(body["route"], "notifications_test");

        let (_, body) = call("/%6Eotifications/").await;
        assert_eq!(body["route"], "notifications_get");
    }

    #[tokio::test]
    async fn test_invalid_utf8_path_is_400() {
        let (status, body) = call("/notifications/%FF/").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_path");
    }

    #[tokio::test]
    async fn test_request_id_generated_and_propagated() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/notifications/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.headers().contains_key("x-request-id"));

        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/notifications/test/")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()["x-request-id"], "req-42");
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let mut config = ServiceConfig::default();
        let dup = config.routes[0].clone();
        config.routes.push(dup);
        assert!(matches!(
            HttpServer::new(config, &echo_handlers()),
            Err(ConfigurationError::DuplicateName(_))
        ));
    }
}
