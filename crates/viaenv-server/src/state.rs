//! Shared application state for the `ViaEnv` server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. It holds the data repository, the resolved theme
//! tokens, and the per-visitor session store.

use std::sync::Arc;

use viaenv_core::theme::Theme;
use viaenv_storage::DashboardRepository;

use crate::config::ServerConfig;
use crate::session::SessionStore;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// Source of every dataset a page renders.
    pub repo: Arc<dyn DashboardRepository>,
    /// Design tokens, resolved once from the configured theme mode.
    pub theme: &'static Theme,
    /// Per-visitor view scopes.
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    /// Build the state from a repository and the server configuration.
    #[must_use]
    pub fn new(repo: Arc<dyn DashboardRepository>, config: &ServerConfig) -> Self {
        Self {
            repo,
            theme: config.theme.theme(),
            sessions: Arc::new(SessionStore::new(
                config.copy_feedback,
                config.session_idle,
            )),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("theme", &self.theme.mode)
            .finish_non_exhaustive()
    }
}
