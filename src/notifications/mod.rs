//! Notification endpoints.
//!
//! The notification subsystem exposes three endpoints under its mount path:
//!
//! | Remaining path           | Name                      | Endpoint    |
//! |--------------------------|---------------------------|-------------|
//! | starts with `subscribe/` | `notifications_subscribe` | `Subscribe` |
//! | ends with `test/`        | `notifications_test`      | `Test`      |
//! | empty                    | `notifications_get`       | `List`      |
//!
//! The subscribe pattern is anchored at the start only and the test pattern
//! at the end only. Both are kept that way: `subscribe/extra` and `pretest/`
//! are accepted.

use serde::{Deserialize, Serialize};

use crate::config::{RouteConfig, ServiceConfig};
use crate::routing::{ConfigurationError, Pattern, RouteTable, SharedHandler};

pub const SUBSCRIBE: &str = "notifications_subscribe";
pub const TEST: &str = "notifications_test";
pub const GET: &str = "notifications_get";

/// The capability a route needs from its handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    /// Accept subscription requests.
    Subscribe,
    /// Trigger a test notification.
    Test,
    /// List notifications.
    List,
}

impl Endpoint {
    pub const ALL: [Endpoint; 3] = [Endpoint::Subscribe, Endpoint::Test, Endpoint::List];

    /// Route name this endpoint is registered under by default.
    pub fn route_name(self) -> &'static str {
        match self {
            Endpoint::Subscribe => SUBSCRIBE,
            Endpoint::Test => TEST,
            Endpoint::List => GET,
        }
    }

    pub fn default_pattern(self) -> Pattern {
        match self {
            Endpoint::Subscribe => Pattern::prefix("subscribe/"),
            Endpoint::Test => Pattern::suffix("test/"),
            Endpoint::List => Pattern::exact(""),
        }
    }
}

/// The default route list, in match order.
pub fn default_routes() -> Vec<RouteConfig> {
    Endpoint::ALL
        .into_iter()
        .map(|endpoint| RouteConfig {
            name: endpoint.route_name().to_string(),
            pattern: endpoint.default_pattern(),
            endpoint,
        })
        .collect()
}

/// One handler per notification endpoint, supplied by the embedding application.
#[derive(Clone)]
pub struct NotificationHandlers {
    pub subscribe: SharedHandler,
    pub test: SharedHandler,
    pub list: SharedHandler,
}

impl NotificationHandlers {
    pub fn for_endpoint(&self, endpoint: Endpoint) -> SharedHandler {
        match endpoint {
            Endpoint::Subscribe => self.subscribe.clone(),
            Endpoint::Test => self.test.clone(),
            Endpoint::List => self.list.clone(),
        }
    }
}

/// Build the route table for `config`, binding each route to its endpoint handler.
pub fn build_route_table(
    config: &ServiceConfig,
    handlers: &NotificationHandlers,
) -> Result<RouteTable, ConfigurationError> {
    let mut builder = RouteTable::builder().mount(config.mount_path.as_str())?;
    for route in &config.routes {
        builder = builder.register(
            route.pattern.clone(),
            handlers.for_endpoint(route.endpoint),
            route.name.as_str(),
        )?;
    }

    let table = builder.build();
    tracing::info!(
        mount = %table.mount(),
        routes = table.len(),
        "Route table built"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::echo::echo_handlers;

    fn names(table: &RouteTable) -> Vec<&str> {
        table.routes().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_default_routes_order() {
        let routes = default_routes();
        let patterns: Vec<String> = routes.iter().map(|r| r.pattern.to_string()).collect();
        assert_eq!(patterns, ["^subscribe/", "test/$", "^$"]);
        assert_eq!(routes[0].name, SUBSCRIBE);
        assert_eq!(routes[1].name, TEST);
        assert_eq!(routes[2].name, GET);
    }

    #[test]
    fn test_build_default_table() {
        let table = build_route_table(&ServiceConfig::default(), &echo_handlers()).unwrap();
        assert_eq!(names(&table), [SUBSCRIBE, TEST, GET]);
        assert_eq!(table.mount(), "/notifications/");

        let cases = [
            ("/notifications/subscribe/", SUBSCRIBE),
            ("/notifications/subscribe/extra", SUBSCRIBE),
            ("/notifications/test/", TEST),
            ("/notifications/pretest/", TEST),
            ("/notifications/", GET),
        ];
        for (path, expected) in cases {
            assert_eq!(table.resolve(path).unwrap().route.name, expected, "path {path}");
        }
        assert!(table.resolve("/notifications/unknown/path").is_err());
    }

    #[test]
    fn test_build_rejects_duplicates() {
        let mut config = ServiceConfig::default();
        config.routes.push(RouteConfig {
            name: GET.to_string(),
            pattern: Pattern::exact("all/"),
            endpoint: Endpoint::List,
        });
        let err = build_route_table(&config, &echo_handlers()).unwrap_err();
        assert_eq!(err, ConfigurationError::DuplicateName(GET.to_string()));
    }
}
