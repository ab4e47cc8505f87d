//! HTTP API for Traveler's Kitchen.
//!
//! The binary in `main.rs` only wires configuration and telemetry; the
//! router is built here so integration tests can drive it with an
//! in-memory store and a fake AI client.

pub mod access;
pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
mod models;
mod schema;
pub mod store;
pub mod telemetry;

use axum::extract::MatchedPath;
use axum::http::Request;
use axum::middleware;
use axum::Router;
use kitchen_core::ai::AiClient;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::ServerConfig;
use crate::store::Store;

/// Everything a handler can reach.
pub struct AppContext {
    pub store: Arc<dyn Store>,
    pub ai: Arc<dyn AiClient>,
    pub config: ServerConfig,
}

/// Application state shared across all handlers
pub type AppState = Arc<AppContext>;

/// Endpoints that crawlers hit constantly; they get no request span.
const QUIET_PATHS: &[&str] = &["/robots.txt", "/sitemap.xml"];

pub fn create_router(state: AppState) -> Router {
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    Router::new()
        .merge(api::public::router())
        .nest("/api/ai", api::ai::router())
        .nest("/api/recipes", api::recipes::router())
        .nest("/api/idea-sessions", api::idea_sessions::router())
        .nest("/api/ideas", api::ideas::router())
        .merge(swagger_ui)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    if QUIET_PATHS.contains(&matched_path) {
                        tracing::trace_span!("http_request")
                    } else {
                        tracing::info_span!(
                            "http_request",
                            method = %request.method(),
                            path = %matched_path,
                        )
                    }
                })
                .on_request(|_request: &Request<_>, _span: &Span| {})
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        // Skip logging for quiet endpoints (trace-level spans)
                        if span.metadata().map(|m| m.level()) == Some(&tracing::Level::TRACE) {
                            return;
                        }
                        let status = response.status().as_u16();
                        let db_queries = telemetry::get_query_count().unwrap_or(0);
                        if status >= 500 {
                            tracing::error!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                db_queries,
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                db_queries,
                                "request completed"
                            );
                        }
                    },
                )
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &Span| {
                        tracing::error!(
                            error = %error,
                            latency_ms = %latency.as_millis(),
                            "request failed"
                        );
                    },
                ),
        )
        .layer(middleware::from_fn(telemetry::query_counting_middleware))
}
