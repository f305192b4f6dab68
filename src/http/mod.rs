//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, bind + validate greeting)
//!     → hello.rs (call HelloGrain through the silo)
//!     → response.rs (plain text reply or mapped error)
//!     → Send to client
//! ```

pub mod docs;
pub mod hello;
pub mod request;
pub mod response;
pub mod server;

pub use request::{HelloRequest, UuidRequestId, X_REQUEST_ID};
pub use response::{ApiError, HelloResponse, ProblemDetails};
pub use server::{AppState, HttpServer};
