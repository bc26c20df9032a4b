//! Route lookup and reverse lookup.
//!
//! # Responsibilities
//! - Store routes in registration order
//! - Look up the first route matching a path
//! - Rebuild a path from a route name
//!
//! # Design Decisions
//! - Immutable after `build()` (shared via Arc, no locks)
//! - O(n) ordered scan, first match wins
//! - O(1) name lookup for reverse via HashMap index
//! - Explicit NotFound rather than a silent default route

use std::collections::HashMap;
use std::fmt;

use crate::routing::error::{ConfigurationError, NotFound, ReverseError};
use crate::routing::handler::SharedHandler;
use crate::routing::matcher::Pattern;

/// A (pattern, handler, name) association.
#[derive(Clone)]
pub struct Route {
    pub name: String,
    pub pattern: Pattern,
    pub handler: SharedHandler,
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

/// Result of a successful lookup.
#[derive(Debug, Clone)]
pub struct RouteMatch<'t> {
    pub route: &'t Route,
    /// Path left after the mount prefix was stripped.
    pub remaining_path: String,
}

/// Owned summary of a match, stored in request extensions for handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRoute {
    pub name: String,
    pub remaining_path: String,
}

impl From<&RouteMatch<'_>> for MatchedRoute {
    fn from(m: &RouteMatch<'_>) -> Self {
        Self {
            name: m.route.name.clone(),
            remaining_path: m.remaining_path.clone(),
        }
    }
}

/// Ordered, immutable route table.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    mount: String,
    routes: Vec<Route>,
    by_name: HashMap<String, usize>,
}

impl RouteTable {
    /// Start building a table.
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// Find the first route matching `path`.
    ///
    /// When the table has a mount prefix, paths outside it never match.
    pub fn resolve(&self, path: &str) -> Result<RouteMatch<'_>, NotFound> {
        let not_found = || NotFound {
            path: path.to_string(),
        };

        let remaining = path.strip_prefix(self.mount.as_str()).ok_or_else(not_found)?;

        self.routes
            .iter()
            .find(|route| route.pattern.matches(remaining))
            .map(|route| RouteMatch {
                route,
                remaining_path: remaining.to_string(),
            })
            .ok_or_else(not_found)
    }

    /// Build the path for a named route.
    ///
    /// Patterns carry no placeholders, so any parameter is an error.
    pub fn url_for(&self, name: &str, params: &[(&str, &str)]) -> Result<String, ReverseError> {
        let route = self.get(name).ok_or_else(|| ReverseError::RouteNotFound {
            name: name.to_string(),
        })?;

        if !params.is_empty() {
            return Err(ReverseError::UnexpectedParams {
                name: name.to_string(),
                params: params.iter().map(|(k, _)| k.to_string()).collect(),
            });
        }

        Ok(format!("{}{}", self.mount, route.pattern.reverse()))
    }

    /// Look up a route by name.
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.by_name.get(name).map(|&idx| &self.routes[idx])
    }

    /// Routes in match order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn mount(&self) -> &str {
        &self.mount
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Builder for [`RouteTable`]. Registration errors surface immediately.
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    table: RouteTable,
}

impl RouteTableBuilder {
    /// Serve the table under `mount` (e.g. `/notifications/`).
    pub fn mount(mut self, mount: impl Into<String>) -> Result<Self, ConfigurationError> {
        let mount = mount.into();
        if !mount.is_empty() && !(mount.starts_with('/') && mount.ends_with('/')) {
            return Err(ConfigurationError::InvalidMount(mount));
        }
        self.table.mount = mount;
        Ok(self)
    }

    /// Append a route. Fails if `name` is empty or already registered.
    pub fn register(
        mut self,
        pattern: Pattern,
        handler: SharedHandler,
        name: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigurationError::EmptyName);
        }
        if self.table.by_name.contains_key(&name) {
            return Err(ConfigurationError::DuplicateName(name));
        }

        tracing::debug!(route = %name, pattern = %pattern, "Registered route");

        self.table.by_name.insert(name.clone(), self.table.routes.len());
        self.table.routes.push(Route {
            name,
            pattern,
            handler,
        });
        Ok(self)
    }

    pub fn build(self) -> RouteTable {
        self.table
    }
}
