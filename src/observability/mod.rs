//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handlers and grain activations produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters, gauges, histograms via `metrics`)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the trace span of every request
//! - Metric calls are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
