//! Grain definitions.
//!
//! A grain is an addressable unit of computation. The silo owns the
//! activations; this module only describes what a grain is and the one
//! grain the host serves.

pub mod error;
pub mod grain;
pub mod hello;

pub use error::GrainError;
pub use grain::{Grain, GrainId, GrainKey};
pub use hello::{format_greeting, HelloGrain, SayHello, HELLO_GRAIN_KEY};
