//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Detect duplicate or empty route names
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("mount_path '{0}' must start and end with '/'")]
    InvalidMountPath(String),

    #[error("no routes configured")]
    NoRoutes,

    #[error("route #{0} has an empty name")]
    EmptyRouteName(usize),

    #[error("duplicate route name '{0}'")]
    DuplicateRouteName(String),

    #[error("invalid {field} '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // Request paths always start with '/', so an empty mount would leave
    // start-anchored and empty patterns unreachable.
    let mount = &config.mount_path;
    if !(mount.starts_with('/') && mount.ends_with('/')) {
        errors.push(ValidationError::InvalidMountPath(mount.clone()));
    }

    if config.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }

    let mut seen = HashSet::new();
    for (idx, route) in config.routes.iter().enumerate() {
        if route.name.is_empty() {
            errors.push(ValidationError::EmptyRouteName(idx));
        } else if !seen.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRouteName(route.name.clone()));
        }
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::Zero("listener.max_connections"));
    }
    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::Zero("limits.max_body_bytes"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;
    use crate::notifications::Endpoint;
    use crate::routing::Pattern;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ServiceConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ServiceConfig::default();
        config.mount_path = "notifications".into();
        config.timeouts.request_secs = 0;
        config.listener.bind_address = "not an address".into();
        config.routes.push(RouteConfig {
            name: "notifications_get".into(),
            pattern: Pattern::exact("all/"),
            endpoint: Endpoint::List,
        });
        config.routes.push(RouteConfig {
            name: String::new(),
            pattern: Pattern::exact("none/"),
            endpoint: Endpoint::List,
        });

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::InvalidMountPath("notifications".into())));
        assert!(errors.contains(&ValidationError::Zero("timeouts.request_secs")));
        assert!(errors.contains(&ValidationError::DuplicateRouteName("notifications_get".into())));
        assert!(errors.contains(&ValidationError::EmptyRouteName(4)));
    }

    #[test]
    fn test_empty_routes_rejected() {
        let mut config = ServiceConfig::default();
        config.routes.clear();
        assert_eq!(validate_config(&config), Err(vec![ValidationError::NoRoutes]));
    }

    #[test]
    fn test_mount_path_must_be_rooted() {
        for mount in ["", "notifications/", "/notifications"] {
            let mut config = ServiceConfig::default();
            config.mount_path = mount.into();
            assert_eq!(
                validate_config(&config),
                Err(vec![ValidationError::InvalidMountPath(mount.into())]),
                "mount {:?}",
                mount
            );
        }

        let mut config = ServiceConfig::default();
        config.mount_path = "/".into();
        assert_eq!(validate_config(&config), Ok(()));
    }
}
