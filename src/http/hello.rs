//! The greeting endpoint.

use std::time::Instant;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};

use crate::grains::{HelloGrain, SayHello, HELLO_GRAIN_KEY};
use crate::http::request::HelloRequest;
use crate::http::response::{ApiError, HelloResponse};
use crate::http::server::AppState;
use crate::observability::metrics;

/// `GET /Hello?Greeting=<text>`
pub async fn say_hello(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let start = Instant::now();
    let response = match greet(&state, &params).await {
        Ok(reply) => reply.into_response(),
        Err(e) => e.into_response(),
    };
    metrics::record_request(response.status().as_u16(), start);
    response
}

async fn greet(state: &AppState, params: &[(String, String)]) -> Result<HelloResponse, ApiError> {
    let request = HelloRequest::from_query(params)?;
    let grain = state.silo.get_grain::<HelloGrain>(HELLO_GRAIN_KEY)?;
    let message = grain.call(SayHello(request.greeting)).await?;
    Ok(HelloResponse { message })
}
