//! `ViaEnv` dashboard server.
//!
//! Wires the core view logic and a dashboard repository into an Axum
//! server that renders every page as HTML. Page state (tab, search, sort,
//! revealed secret) travels in the query string; the short-lived copy
//! badge lives in a per-visitor view scope keyed by a session cookie.

pub mod config;
pub mod error;
pub mod html;
pub mod routes;
pub mod session;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::middleware as axum_mw;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::session::session_middleware;
use crate::state::AppState;

/// In-flight POST actions allowed at once.
const ACTION_CONCURRENCY: usize = 32;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let actions = routes::actions().route_layer(ConcurrencyLimitLayer::new(ACTION_CONCURRENCY));

    // Every page and action runs inside a session so view scopes resolve.
    let sessioned = routes::pages()
        .merge(actions)
        .route_layer(axum_mw::from_fn(session_middleware));

    Router::new()
        .merge(sessioned)
        .merge(routes::health::router())
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .with_state(state)
}
