//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Silo → bind listener → spawn HTTP server
//!
//! Shutdown (shutdown.rs):
//!     Signal received → stop accepting → drain requests → stop silo → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: silo first, listener last (traffic only when ready)
//! - Ordered shutdown: HTTP drains before grains deactivate

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use signals::shutdown_signal;
pub use startup::{start, RunningHost};
