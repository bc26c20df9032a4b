//! Routing error types.

use thiserror::Error;

/// No route matched the request path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no route matches path '{path}'")]
pub struct NotFound {
    pub path: String,
}

/// Errors raised while building a route table. Any of these is fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Two routes registered under the same name.
    #[error("duplicate route name '{0}'")]
    DuplicateName(String),

    /// Route registered with an empty name.
    #[error("route name must not be empty")]
    EmptyName,

    /// Pattern text could not be parsed.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Mount path is not of the form `/` or `/segment/.../`.
    #[error("invalid mount path '{0}': must start and end with '/'")]
    InvalidMount(String),
}

/// Errors from reverse lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReverseError {
    /// No route is registered under this name.
    #[error("no route named '{name}'")]
    RouteNotFound { name: String },

    /// Parameters were supplied that the route's pattern cannot consume.
    #[error("route '{name}' takes no parameters, got: {}", .params.join(", "))]
    UnexpectedParams { name: String, params: Vec<String> },
}
