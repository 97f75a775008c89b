//! Salon admin API library.
//!
//! Exposes the application as a library so the router can be driven
//! in-process by the integration tests and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use config::Config;
use middleware::create_session_layer;
use state::AppState;

/// Build the full application router: routes, session layer, request
/// tracing, shared state.
///
/// Migrations are not run here; run them explicitly via
/// `salon-cli migrate` (or the test harness).
///
/// # Errors
///
/// Returns an error if the session store cannot set up its table.
pub async fn app(config: Config, pool: SqlitePool) -> Result<Router, sqlx::Error> {
    let session_layer = create_session_layer(&pool, &config).await?;
    let state = AppState::new(config, pool);

    Ok(routes::routes()
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record("latency_ms", u64::try_from(latency.as_millis()).unwrap_or(u64::MAX));
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state))
}
