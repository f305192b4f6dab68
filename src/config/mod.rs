//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, env overrides)
//!     → validation.rs (semantic checks)
//!     → HostConfig (validated, immutable)
//!     → handed to the silo and the HTTP server at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError};
pub use schema::{
    ApiDocsConfig, CorsConfig, HostConfig, ListenerConfig, LogFormat, ObservabilityConfig,
    SecurityConfig, SiloConfig, TimeoutConfig,
};
pub use validation::ValidationError;
