//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → router.rs (strip mount, ordered lookup)
//!     → matcher.rs (evaluate anchored pattern)
//!     → Return: RouteMatch or NotFound
//!
//! Reverse lookup:
//!     route name → router.rs (name index) → mount + pattern literal
//!
//! Table construction (at startup):
//!     (pattern, handler, name)[]
//!     → register in order, reject duplicate names
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Table built at startup, immutable at runtime
//! - No regex (anchored literals only)
//! - Deterministic: same input always matches same route
//! - First match wins (registration order)

pub mod error;
pub mod handler;
pub mod matcher;
pub mod router;

pub use error::{ConfigurationError, NotFound, ReverseError};
pub use handler::{shared, RouteHandler, SharedHandler};
pub use matcher::Pattern;
pub use router::{MatchedRoute, Route, RouteMatch, RouteTable, RouteTableBuilder};
