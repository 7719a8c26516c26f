//! HTTP route handlers for `ViaEnv`.
//!
//! Routes are organized by page:
//! - `dashboard`: Overview at `/` and `/dashboard`
//! - `environments`: Variables per environment, reveal and copy
//! - `users`: Team members
//! - `analytics`: Usage KPIs and charts
//! - `logs`: Audit trail
//! - `database`: Managed connections and rotation
//! - `security`: IP allowlist, service tokens, secret scanning
//! - `settings`: Project settings
//! - `help`: Help center
//! - `auth`: Login and register
//! - `health`: Liveness probe
//!
//! Each page module exposes `router()` for its GET pages and, where it has
//! any, `actions()` for its POST endpoints. `shell` holds the chrome and
//! the shared components.

pub mod analytics;
pub mod auth;
pub mod dashboard;
pub mod database;
pub mod environments;
pub mod health;
pub mod help;
pub mod logs;
pub mod security;
pub mod settings;
pub mod shell;
pub mod users;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderMap;
use axum::http::header::ACCEPT;
use serde::Deserialize;

use viaenv_core::pipeline::{Selector, SortOrder, ViewQuery};

use crate::html::Href;
use crate::state::AppState;

/// All GET pages.
pub fn pages() -> Router<Arc<AppState>> {
    Router::new()
        .merge(dashboard::router())
        .merge(environments::router())
        .merge(users::router())
        .merge(analytics::router())
        .merge(logs::router())
        .merge(database::router())
        .merge(security::router())
        .merge(settings::router())
        .merge(help::router())
        .merge(auth::router())
}

/// All POST endpoints.
pub fn actions() -> Router<Arc<AppState>> {
    Router::new()
        .merge(environments::actions())
        .merge(users::actions())
        .merge(logs::actions())
        .merge(database::actions())
        .merge(security::actions())
        .merge(settings::actions())
        .merge(auth::actions())
}

/// UI state carried in the query string of a list page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    /// Active tab id.
    pub tab: Option<String>,
    /// Search term.
    pub q: Option<String>,
    /// Sort key, `name` or `updated`.
    pub sort: Option<String>,
    /// Id of the revealed secret.
    pub reveal: Option<String>,
    /// Variables layout, `table` or `cards`.
    pub view: Option<String>,
}

impl ListParams {
    /// The active tab, or `default` when none was picked.
    #[must_use]
    pub fn tab_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.tab.as_deref().filter(|t| !t.is_empty()).unwrap_or(default)
    }

    #[must_use]
    pub fn search(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }

    /// The requested sort, or `default` when none or an unknown key was
    /// given.
    #[must_use]
    pub fn sort_or(&self, default: SortOrder) -> SortOrder {
        match self.sort.as_deref().map(str::parse::<SortOrder>) {
            None | Some(Ok(SortOrder::Insertion)) => default,
            Some(Ok(order)) => order,
            Some(Err(e)) => {
                tracing::debug!(error = %e, "ignoring sort parameter");
                default
            }
        }
    }

    /// Pipeline predicates for this request.
    #[must_use]
    pub fn view_query(&self, default_tab: &str, default_sort: SortOrder) -> ViewQuery {
        ViewQuery::new(
            Selector::from_id(self.tab_or(default_tab)),
            self.search().trim(),
            self.sort_or(default_sort),
        )
    }

    /// A link to `path` that keeps the current tab, search, sort, view and
    /// reveal state.
    #[must_use]
    pub fn link(&self, path: &str) -> Href {
        Href::new(path)
            .set("tab", self.tab.as_deref())
            .set("q", self.q.as_deref())
            .set("sort", self.sort.as_deref())
            .set("view", self.view.as_deref())
            .set("reveal", self.reveal.as_deref())
    }
}

/// Whether the client asked for the raw value rather than a page.
#[must_use]
pub fn wants_text(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("text/plain"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(tab: Option<&str>, sort: Option<&str>) -> ListParams {
        ListParams {
            tab: tab.map(str::to_owned),
            sort: sort.map(str::to_owned),
            ..ListParams::default()
        }
    }

    #[test]
    fn missing_tab_uses_default() {
        assert_eq!(params(None, None).tab_or("dev"), "dev");
        assert_eq!(params(Some(""), None).tab_or("dev"), "dev");
        assert_eq!(params(Some("prod"), None).tab_or("dev"), "prod");
    }

    #[test]
    fn unknown_sort_falls_back() {
        assert_eq!(params(None, Some("size")).sort_or(SortOrder::Name), SortOrder::Name);
        assert_eq!(
            params(None, Some("updated")).sort_or(SortOrder::Name),
            SortOrder::RecentlyUpdated
        );
        assert_eq!(params(None, Some("")).sort_or(SortOrder::Name), SortOrder::Name);
    }

    #[test]
    fn link_keeps_state() {
        let p = ListParams {
            tab: Some("dev".to_owned()),
            q: Some("jwt".to_owned()),
            reveal: Some("3".to_owned()),
            ..ListParams::default()
        };
        assert_eq!(p.link("/environments").url(), "/environments?tab=dev&q=jwt&reveal=3");
    }

    #[test]
    fn accept_header_selects_text() {
        let mut headers = HeaderMap::new();
        assert!(!wants_text(&headers));
        headers.insert(ACCEPT, axum::http::HeaderValue::from_static("text/plain"));
        assert!(wants_text(&headers));
    }
}
