//! Notification route table and HTTP dispatch.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod notifications;
pub mod observability;
pub mod routing;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Pattern, RouteTable};
