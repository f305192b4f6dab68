//! Response shapes and error mapping.
//!
//! # Design Decisions
//! - Validation failures use RFC 9457 problem details with per-field errors
//! - Grain failures are logged and returned as short plain-text bodies
//! - Stopped silo maps to 503, call timeout to 504, anything else to 500

use std::collections::BTreeMap;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::grains::GrainError;

pub const PROBLEM_JSON: &str = "application/problem+json";

/// Greeting reply relayed to the client as plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelloResponse {
    pub message: String,
}

impl IntoResponse for HelloResponse {
    fn into_response(self) -> Response {
        self.message.into_response()
    }
}

/// Validation problem body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub status: u16,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ProblemDetails {
    /// Problem for a single missing required field.
    pub fn required_field(field: &str) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(
            field.to_string(),
            vec![format!("The {field} field is required.")],
        );
        Self {
            kind: "https://tools.ietf.org/html/rfc9110#section-15.5.1".to_string(),
            title: "One or more validation errors occurred.".to_string(),
            status: StatusCode::BAD_REQUEST.as_u16(),
            errors,
        }
    }
}

/// Errors surfaced by API handlers.
#[derive(Debug)]
pub enum ApiError {
    Validation(ProblemDetails),
    Grain(GrainError),
}

impl From<ProblemDetails> for ApiError {
    fn from(problem: ProblemDetails) -> Self {
        ApiError::Validation(problem)
    }
}

impl From<GrainError> for ApiError {
    fn from(e: GrainError) -> Self {
        ApiError::Grain(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(problem) => {
                tracing::debug!(errors = ?problem.errors, "Request failed validation");
                let status =
                    StatusCode::from_u16(problem.status).unwrap_or(StatusCode::BAD_REQUEST);
                (status, [(header::CONTENT_TYPE, PROBLEM_JSON)], Json(problem)).into_response()
            }
            ApiError::Grain(e) => {
                tracing::error!(error = %e, "Grain call failed");
                let (status, body) = match e {
                    GrainError::SiloStopped => {
                        (StatusCode::SERVICE_UNAVAILABLE, "Silo is shutting down")
                    }
                    GrainError::Timeout { .. } => {
                        (StatusCode::GATEWAY_TIMEOUT, "Grain did not reply in time")
                    }
                    GrainError::MailboxClosed(_) | GrainError::Rejected(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "Grain call failed")
                    }
                };
                (status, body).into_response()
            }
        }
    }
}
