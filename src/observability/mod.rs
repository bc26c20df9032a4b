//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatch and startup produce:
//!     → logging.rs (structured log events, request ID on every line)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, text or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;
