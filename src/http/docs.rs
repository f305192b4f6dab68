//! API documentation and health endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::http::request::GREETING_FIELD;
use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub cluster_id: String,
    pub service_id: String,
    pub activations: usize,
}

/// `GET /health`: 200 while serving, 503 once the silo is stopping.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let stopped = state.silo.is_stopped();
    let silo_config = state.silo.config();
    let body = HealthStatus {
        status: if stopped { "stopping" } else { "ok" },
        version: env!("CARGO_PKG_VERSION"),
        cluster_id: silo_config.cluster_id.clone(),
        service_id: silo_config.service_id.clone(),
        activations: state.silo.activation_count(),
    };
    let code = if stopped {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    (code, Json(body))
}

/// `GET /openapi.json`
pub async fn openapi(State(state): State<AppState>) -> Json<Value> {
    Json(openapi_document(&state.silo.config().service_id))
}

/// OpenAPI 3 description of the public API.
pub fn openapi_document(title: &str) -> Value {
    let operation = json!({
        "tags": ["Hello"],
        "summary": "Send a greeting to HelloGrain",
        "parameters": [{
            "name": GREETING_FIELD,
            "in": "query",
            "required": true,
            "schema": { "type": "string", "minLength": 1 }
        }],
        "responses": {
            "200": {
                "description": "The grain's reply",
                "content": { "text/plain": { "schema": { "type": "string" } } }
            },
            "400": {
                "description": "Greeting missing or blank",
                "content": {
                    "application/problem+json": {
                        "schema": { "$ref": "#/components/schemas/ValidationProblemDetails" }
                    }
                }
            }
        }
    });

    json!({
        "openapi": "3.0.1",
        "info": { "title": title, "version": env!("CARGO_PKG_VERSION") },
        "paths": { "/Hello": { "get": operation } },
        "components": {
            "schemas": {
                "ValidationProblemDetails": {
                    "type": "object",
                    "properties": {
                        "type": { "type": "string" },
                        "title": { "type": "string" },
                        "status": { "type": "integer" },
                        "errors": {
                            "type": "object",
                            "additionalProperties": {
                                "type": "array",
                                "items": { "type": "string" }
                            }
                        }
                    }
                }
            }
        }
    })
}
