//! Audit log page.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Extension, Query, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use tracing::info;

use viaenv_core::model::{LogEntry, LogKind};
use viaenv_core::pipeline::{ALL, SortOrder, derive_view};
use viaenv_core::route::Route;

use super::ListParams;
use super::shell::{self, HeaderAction, Icon, app_shell, empty_state, page_header};
use crate::error::AppError;
use crate::html::{Href, escape};
use crate::session::SessionId;
use crate::state::AppState;

/// Build the logs page router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(Route::Logs.path(), get(logs_page))
}

/// Build the log action router.
pub fn actions() -> Router<Arc<AppState>> {
    Router::new().route("/logs/export", post(export_logs))
}

fn kind_icon(kind: LogKind) -> Icon {
    match kind {
        LogKind::Security => Icon::Shield,
        LogKind::Secrets => Icon::Key,
        LogKind::System => Icon::History,
    }
}

fn log_row(entry: &LogEntry) -> String {
    let mut s = String::with_capacity(1024);
    s.push_str("<tr data-id=\"");
    s.push_str(&escape(&entry.id));
    s.push_str("\"><td><div class=\"cell-row\"><span class=\"type-icon ");
    s.push_str(entry.kind.as_str());
    s.push_str("\">");
    s.push_str(&kind_icon(entry.kind).svg());
    s.push_str("</span><div class=\"cell-stack\"><strong>");
    s.push_str(&escape(&entry.action));
    s.push_str("</strong><span class=\"sub mono\">");
    s.push_str(&escape(&entry.target));
    s.push_str("</span></div></div></td><td><span class=\"badge");
    if entry.is_production() {
        s.push_str(" badge-error");
    }
    s.push_str("\">");
    s.push_str(&escape(&entry.environment));
    s.push_str("</span></td><td>");
    s.push_str(&escape(&entry.user));
    s.push_str("</td><td class=\"mono\">");
    s.push_str(&escape(&entry.ip));
    s.push_str("</td><td>");
    s.push_str(&escape(&entry.timestamp.label));
    s.push_str("</td></tr>");
    s
}

async fn logs_page(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionId>,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, AppError> {
    state.sessions.enter(session, Route::Logs).await;
    let logs = state.repo.logs().await?;
    let tabs = state.repo.log_tabs().await?;

    let active = params.tab_or(ALL).to_owned();
    let query = params.view_query(ALL, SortOrder::Insertion);
    let rows = derive_view(&logs, &query);

    let mut content = String::with_capacity(16384);
    content.push_str(&page_header(
        "Logs de Auditoria",
        "Rastreabilidade completa de todas as ações realizadas na plataforma.",
        Some(HeaderAction {
            label: "Exportar CSV",
            action: "/logs/export",
            icon: Icon::Download,
        }),
    ));
    content.push_str(&shell::tabs(&tabs, &active, |tab| {
        Href::new(Route::Logs.path()).set("tab", Some(&tab.id))
    }));
    content.push_str(r#"<div class="action-bar">"#);
    content.push_str(&shell::search_bar(
        Route::Logs.path(),
        "Filtrar por usuário, ação ou alvo...",
        params.search(),
        &[("tab", active.as_str())],
    ));
    content.push_str(r#"<span class="meta">"#);
    content.push_str(&Icon::Clock.svg());
    content.push_str("Retenção de logs: <strong>30 dias</strong></span></div>");

    content.push_str(r#"<div class="card"><table class="table"><thead><tr><th>Evento</th><th>Ambiente</th><th>Realizado por</th><th>Endereço IP</th><th>Data/Hora</th></tr></thead><tbody>"#);
    for entry in &rows {
        content.push_str(&log_row(entry));
    }
    content.push_str("</tbody></table>");
    if rows.is_empty() {
        content.push_str(&empty_state("Nenhum evento encontrado com os filtros atuais."));
    }
    content.push_str("</div>");

    Ok(Html(app_shell(state.theme, state.sessions.copy_delay(), Route::Logs, Route::Logs.path(), &content)))
}

async fn export_logs() -> Redirect {
    info!("audit log export requested");
    Redirect::to(Route::Logs.path())
}
