//! The grain contract and grain identity.

use std::fmt;

use async_trait::async_trait;

use crate::grains::error::GrainError;

/// Integer key addressing one activation of a grain type.
pub type GrainKey = i64;

/// Identity of an activation: grain type plus key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GrainId {
    pub type_name: &'static str,
    pub key: GrainKey,
}

impl GrainId {
    pub fn new<G: Grain>(key: GrainKey) -> Self {
        Self {
            type_name: G::TYPE_NAME,
            key,
        }
    }
}

impl fmt::Display for GrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.type_name, self.key)
    }
}

/// A turn-based unit of computation hosted by a silo.
///
/// The silo creates at most one activation per [`GrainId`] and delivers
/// requests to it one at a time, so `handle` never runs concurrently with
/// itself for the same activation.
#[async_trait]
pub trait Grain: Sized + Send + 'static {
    type Request: Send + 'static;
    type Response: Send + 'static;

    /// Name used in grain identities, logs and metrics labels.
    const TYPE_NAME: &'static str;

    /// Create the activation for `key`.
    async fn activate(key: GrainKey) -> Result<Self, GrainError>;

    /// Process one request.
    async fn handle(&mut self, request: Self::Request) -> Result<Self::Response, GrainError>;

    /// Called once when the activation stops.
    async fn deactivate(&mut self) {}
}
