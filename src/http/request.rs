//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) unless the client sent one
//! - Bind the greeting query parameter into a validated `HelloRequest`
//!
//! # Design Decisions
//! - Query keys match case-insensitively; the first `greeting` key wins
//! - A greeting that is empty or only whitespace counts as missing
//! - The greeting is forwarded verbatim (no trimming)

use axum::http::{HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::http::response::ProblemDetails;

/// Header carrying the request correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Query parameter (and problem field name) carrying the greeting.
pub const GREETING_FIELD: &str = "Greeting";

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Validated greeting request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelloRequest {
    pub greeting: String,
}

impl HelloRequest {
    /// Bind from decoded query pairs.
    pub fn from_query(pairs: &[(String, String)]) -> Result<Self, ProblemDetails> {
        let greeting = pairs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(GREETING_FIELD))
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.trim().is_empty());

        match greeting {
            Some(greeting) => Ok(Self {
                greeting: greeting.to_string(),
            }),
            None => Err(ProblemDetails::required_field(GREETING_FIELD)),
        }
    }
}
