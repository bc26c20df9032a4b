//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign/propagate request ID)
//!     → routing layer resolves path → route handler
//!     → response.rs (404 for unmatched paths)
//!     → Send to client
//! ```

pub mod echo;
pub mod request;
pub mod response;
pub mod server;

pub use echo::{echo_handlers, EchoHandler};
pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
