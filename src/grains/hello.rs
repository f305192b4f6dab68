//! The hello grain: echoes a greeting back through a fixed template.

use async_trait::async_trait;

use crate::grains::error::GrainError;
use crate::grains::grain::{Grain, GrainKey};

/// The constant key the host addresses the hello grain with.
pub const HELLO_GRAIN_KEY: GrainKey = 0;

/// Request carrying the caller's greeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SayHello(pub String);

/// Apply the response template to a greeting.
pub fn format_greeting(greeting: &str) -> String {
    format!("Client said: '{greeting}', so HelloGrain says: Hello!")
}

#[derive(Debug)]
pub struct HelloGrain {
    key: GrainKey,
}

#[async_trait]
impl Grain for HelloGrain {
    type Request = SayHello;
    type Response = String;

    const TYPE_NAME: &'static str = "HelloGrain";

    async fn activate(key: GrainKey) -> Result<Self, GrainError> {
        tracing::debug!(key, "HelloGrain activated");
        Ok(Self { key })
    }

    async fn handle(&mut self, request: SayHello) -> Result<String, GrainError> {
        let SayHello(greeting) = request;
        tracing::info!(key = self.key, greeting = %greeting, "SayHello received");
        Ok(format_greeting(&greeting))
    }

    async fn deactivate(&mut self) {
        tracing::debug!(key = self.key, "HelloGrain deactivated");
    }
}
