//! Managed database connections page.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Extension, Path, Query, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use tracing::info;

use viaenv_core::model::{ConnectionStatus, DatabaseConnection};
use viaenv_core::pipeline::{ALL, SortOrder, derive_view};
use viaenv_core::route::Route;

use super::ListParams;
use super::shell::{self, HeaderAction, Icon, app_shell, empty_state, page_header};
use crate::error::AppError;
use crate::html::{Href, escape};
use crate::session::SessionId;
use crate::state::AppState;

/// Build the database page router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(Route::Database.path(), get(database_page))
}

/// Build the connection action router.
pub fn actions() -> Router<Arc<AppState>> {
    Router::new()
        .route("/database/connections", post(create_connection))
        .route("/database/{id}/rotate", post(rotate_credentials))
}

fn connection_card(conn: &DatabaseConnection) -> String {
    let mut s = String::with_capacity(2048);
    s.push_str("<div class=\"card\" data-id=\"");
    s.push_str(&escape(&conn.id));
    s.push_str("\"><div class=\"card-header\"><div class=\"cell-row\"><span class=\"db-icon\" style=\"background:");
    s.push_str(conn.kind.brand_color());
    s.push_str("\">");
    s.push_str(&Icon::Database.svg());
    s.push_str("</span><div class=\"cell-stack\"><strong>");
    s.push_str(&escape(&conn.name));
    s.push_str("</strong><span class=\"sub\">");
    s.push_str(conn.kind.label());
    s.push_str("</span></div></div>");
    match conn.status {
        ConnectionStatus::Connected => {
            s.push_str(r#"<span class="badge badge-success">Ativo</span>"#);
        }
        ConnectionStatus::Error => {
            s.push_str("<span class=\"badge badge-error\"");
            if let Some(message) = &conn.error_message {
                s.push_str(" title=\"");
                s.push_str(&escape(message));
                s.push('"');
            }
            s.push_str(">Erro</span>");
        }
    }
    s.push_str("</div><div class=\"card-body\"><div class=\"list-item\"><span class=\"meta\">");
    s.push_str(&Icon::Server.svg());
    s.push_str("Host</span><span class=\"mono\">");
    s.push_str(&escape(&conn.host));
    s.push_str("</span></div><div class=\"list-item\"><span class=\"meta\">");
    s.push_str(&Icon::Refresh.svg());
    s.push_str("Rotação</span><span>");
    s.push_str(if conn.rotation_enabled {
        "Automática (30 dias)"
    } else {
        "Manual / Desativada"
    });
    s.push_str("</span></div><div class=\"rotation\"><div class=\"stat\"><span class=\"meta\">Última troca</span><strong>");
    s.push_str(&escape(&conn.last_rotation));
    s.push_str("</strong></div><div class=\"stat\"><span class=\"meta\">Próxima troca</span><strong>");
    s.push_str(&escape(&conn.next_rotation));
    s.push_str("</strong></div></div></div><div class=\"card-footer\">");

    s.push_str("<form class=\"inline\" method=\"post\" action=\"/database/");
    s.push_str(&escape(&urlencoding::encode(&conn.id)));
    s.push_str("/rotate\"><button type=\"submit\" class=\"btn btn-secondary\"");
    if !conn.rotation_enabled {
        s.push_str(" disabled");
    }
    s.push('>');
    s.push_str(&Icon::Refresh.svg());
    s.push_str("Rotacionar Agora</button></form></div></div>");
    s
}

async fn database_page(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionId>,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, AppError> {
    state.sessions.enter(session, Route::Database).await;
    let connections = state.repo.databases().await?;
    let tabs = state.repo.database_tabs().await?;

    let active = params.tab_or(ALL).to_owned();
    let query = params.view_query(ALL, SortOrder::Insertion);
    let cards = derive_view(&connections, &query);

    let mut content = String::with_capacity(16384);
    content.push_str(&page_header(
        "Conexões de Banco de Dados",
        "Gerencie credenciais dinâmicas e rotação automática de senhas.",
        Some(HeaderAction {
            label: "Nova Conexão",
            action: "/database/connections",
            icon: Icon::Plus,
        }),
    ));
    content.push_str(&shell::tabs(&tabs, &active, |tab| {
        Href::new(Route::Database.path()).set("tab", Some(&tab.id))
    }));
    content.push_str(r#"<div class="action-bar">"#);
    content.push_str(&shell::search_bar(
        Route::Database.path(),
        "Buscar conexões...",
        params.search(),
        &[("tab", active.as_str())],
    ));
    content.push_str("</div>");

    if cards.is_empty() {
        content.push_str("<div class=\"card\">");
        content.push_str(&empty_state("Nenhuma conexão encontrada."));
        content.push_str("</div>");
    } else {
        content.push_str(r#"<div class="grid">"#);
        for conn in &cards {
            content.push_str(&connection_card(conn));
        }
        content.push_str("</div>");
    }

    Ok(Html(app_shell(state.theme, state.sessions.copy_delay(), Route::Database, Route::Database.path(), &content)))
}

async fn create_connection() -> Redirect {
    info!("new database connection requested");
    Redirect::to(Route::Database.path())
}

async fn rotate_credentials(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Result<Redirect, AppError> {
    let connections = state.repo.databases().await?;
    let conn = connections
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| AppError::NotFound(format!("database connection {id}")))?;
    if !conn.rotation_enabled {
        return Err(AppError::BadRequest(format!(
            "a rotação automática está desativada para {}",
            conn.name
        )));
    }
    info!(%id, name = %conn.name, "credential rotation requested");
    Ok(Redirect::to(Route::Database.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use viaenv_core::model::DatabaseKind;

    fn conn(rotation_enabled: bool, status: ConnectionStatus) -> DatabaseConnection {
        DatabaseConnection {
            id: "2".to_owned(),
            name: "Cache Layer".to_owned(),
            kind: DatabaseKind::Redis,
            host: "redis-cluster.internal".to_owned(),
            status,
            error_message: Some("Connection refused".to_owned()),
            last_rotation: "Nunca".to_owned(),
            next_rotation: "-".to_owned(),
            rotation_enabled,
        }
    }

    #[test]
    fn disabled_rotation_disables_button() {
        let html = connection_card(&conn(false, ConnectionStatus::Error));
        assert!(html.contains("Manual / Desativada"));
        assert!(html.contains(" disabled>"));
        assert!(html.contains(">Erro</span>"));
        assert!(html.contains("#DC382D"));
    }

    #[test]
    fn enabled_rotation_keeps_button_active() {
        let html = connection_card(&conn(true, ConnectionStatus::Connected));
        assert!(html.contains("Automática (30 dias)"));
        assert!(!html.contains(" disabled"));
        assert!(html.contains(">Ativo</span>"));
    }
}
