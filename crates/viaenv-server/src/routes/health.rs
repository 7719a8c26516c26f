//! Liveness probe.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::state::AppState;

/// Build the health router. Mounted outside the session layer.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/healthz", get(healthz))
}

async fn healthz() -> &'static str {
    "ok"
}
