//! Overview page at `/` and `/dashboard`.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Extension, State};
use axum::http::Uri;
use axum::response::Html;
use axum::routing::get;

use viaenv_core::model::{Environment, EnvironmentVariable, LogEntry};
use viaenv_core::route::Route;

use super::analytics::stat_cards;
use super::shell::{Icon, app_shell, empty_state, page_header};
use crate::error::AppError;
use crate::html::{Href, escape};
use crate::session::SessionId;
use crate::state::AppState;

/// Recent events shown on the overview.
const RECENT_LOGS: usize = 5;

/// Build the dashboard router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(dashboard_page))
        .route(Route::Dashboard.path(), get(dashboard_page))
}

/// One card per environment with the number of variables it really holds.
fn environment_cards(environments: &[Environment], variables: &[EnvironmentVariable]) -> String {
    let mut s = String::with_capacity(1024 * environments.len().max(1));
    s.push_str(r#"<div class="grid">"#);
    for env in environments {
        let total = variables.iter().filter(|v| v.environment == env.id).count();
        let secrets = variables
            .iter()
            .filter(|v| v.environment == env.id && v.is_secret)
            .count();
        let href = Href::new(Route::Environments.path()).set("tab", Some(&env.id));
        s.push_str("<a class=\"card\" href=\"");
        s.push_str(&href.attr());
        s.push_str("\"><div class=\"card-header\"><span class=\"cell-row\"><span class=\"dot\" style=\"background:");
        s.push_str(&escape(&env.color));
        s.push_str("\"></span><strong>");
        s.push_str(&escape(&env.name));
        s.push_str("</strong></span>");
        s.push_str(&Icon::ArrowRight.svg());
        s.push_str("</div><div class=\"card-body\"><span class=\"meta\">");
        s.push_str(&total.to_string());
        s.push_str(" variáveis · ");
        s.push_str(&secrets.to_string());
        s.push_str(" secrets</span></div></a>");
    }
    s.push_str("</div>");
    s
}

fn recent_activity(logs: &[LogEntry]) -> String {
    let mut s = String::with_capacity(2048);
    s.push_str(r#"<div class="card"><div class="card-header"><h3>Atividade Recente</h3><a href="/logs">Ver todos</a></div>"#);
    if logs.is_empty() {
        s.push_str(&empty_state("Nenhum evento registrado."));
    }
    for entry in logs.iter().take(RECENT_LOGS) {
        s.push_str("<div class=\"list-item\"><div class=\"cell-stack\"><strong>");
        s.push_str(&escape(&entry.action));
        s.push_str("</strong><span class=\"sub\">");
        s.push_str(&escape(&entry.user));
        s.push_str(" · <span class=\"mono\">");
        s.push_str(&escape(&entry.target));
        s.push_str("</span></span></div><span class=\"meta\">");
        s.push_str(&escape(&entry.timestamp.label));
        s.push_str("</span></div>");
    }
    s.push_str("</div>");
    s
}

async fn dashboard_page(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionId>,
    uri: Uri,
) -> Result<Html<String>, AppError> {
    state.sessions.enter(session, Route::Dashboard).await;
    let environments = state.repo.environments().await?;
    let variables = state.repo.variables().await?;
    let logs = state.repo.logs().await?;
    let analytics = state.repo.analytics().await?;

    let mut content = String::with_capacity(16384);
    content.push_str(&page_header(
        "Dashboard",
        "Visão geral dos ambientes, do uso e da atividade recente do projeto.",
        None,
    ));
    content.push_str(&stat_cards(&analytics.stats));
    content.push_str(&environment_cards(&environments, &variables));
    content.push_str(&recent_activity(&logs));

    Ok(Html(app_shell(state.theme, state.sessions.copy_delay(), Route::Dashboard, uri.path(), &content)))
}
