//! Hello silo: an HTTP API in front of an in-process grain host.
//!
//! ```text
//! GET /Hello?Greeting=Hi
//!     → http (axum)  → silo (activation directory)  → HelloGrain
//!     ← "Client said: 'Hi', so HelloGrain says: Hello!"
//! ```

pub mod config;
pub mod grains;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod silo;

pub use config::HostConfig;
pub use grains::{Grain, GrainError, HelloGrain};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use silo::{GrainRef, Silo};
