//! Environment variables page.
//!
//! Lists the variables of the active environment through the derived-view
//! pipeline. Secrets are masked until revealed; the revealed id and the
//! layout travel in the query string, the copy badge lives in the visitor's
//! view scope.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Extension, Path, Query, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use tracing::info;

use viaenv_core::model::{EnvironmentVariable, VariableType};
use viaenv_core::pipeline::{ALL, SortOrder, derive_view};
use viaenv_core::route::Route;
use viaenv_core::view::RevealState;

use super::shell::{self, HeaderAction, Icon, app_shell, copy_button, empty_state, page_header};
use super::{ListParams, wants_text};
use crate::error::AppError;
use crate::html::{Href, escape};
use crate::session::SessionId;
use crate::state::AppState;

const MASK: &str = "••••••••••••••••••••••";
const EMPTY: &str = "Nenhuma variável encontrada neste ambiente.";

/// Build the environments page router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(Route::Environments.path(), get(environments_page))
}

/// Build the variable action router.
pub fn actions() -> Router<Arc<AppState>> {
    Router::new()
        .route("/environments/variables", post(create_variable))
        .route("/environments/variables/{id}/copy", post(copy_variable))
        .route("/environments/variables/{id}/delete", post(delete_variable))
}

/// How the variable list is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariableView {
    #[default]
    Table,
    Cards,
}

impl VariableView {
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("cards") => Self::Cards,
            _ => Self::Table,
        }
    }

    #[must_use]
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Cards => "cards",
        }
    }
}

fn type_icon(kind: VariableType) -> Icon {
    match kind {
        VariableType::Secret => Icon::Lock,
        VariableType::ApiKey => Icon::Key,
        VariableType::Database => Icon::Database,
        VariableType::String => Icon::Terminal,
    }
}

/// Everything a row needs besides the variable itself.
struct RowContext<'a> {
    params: &'a ListParams,
    reveal: &'a RevealState,
    copied: Option<&'a str>,
}

impl RowContext<'_> {
    fn value_box(&self, var: &EnvironmentVariable) -> String {
        let revealed = self.reveal.is_revealed(&var.id);
        let masked = var.is_secret && !revealed;

        let mut s = String::with_capacity(1024);
        s.push_str("<div class=\"value-box");
        if masked {
            s.push_str(" masked");
        }
        s.push_str("\"><span class=\"value-text mono\">");
        if masked {
            s.push_str(MASK);
        } else {
            s.push_str(&escape(&var.value));
        }
        s.push_str("</span><span class=\"cell-row\">");
        if var.is_secret {
            let next = self.reveal.toggled(&var.id);
            let href = self
                .params
                .link(Route::Environments.path())
                .set("reveal", next.revealed());
            s.push_str("<a class=\"icon-btn\" data-reveal=\"");
            s.push_str(&escape(&var.id));
            s.push_str("\" href=\"");
            s.push_str(&href.attr());
            s.push_str("\" title=\"");
            s.push_str(if revealed { "Ocultar" } else { "Revelar" });
            s.push_str("\">");
            s.push_str(&if revealed { Icon::EyeOff } else { Icon::Eye }.svg());
            s.push_str("</a>");
        }
        let copy = self
            .params
            .link(Route::Environments.path())
            .with_path(format!("/environments/variables/{}/copy", urlencoding::encode(&var.id)));
        s.push_str(&copy_button(&copy, self.copied == Some(var.id.as_str())));
        s.push_str("</span></div>");
        s
    }

    fn delete_button(&self, var: &EnvironmentVariable) -> String {
        let action = self
            .params
            .link(Route::Environments.path())
            .set("reveal", None)
            .with_path(format!("/environments/variables/{}/delete", urlencoding::encode(&var.id)));
        shell::post_button(&action.attr(), "icon-btn danger", Icon::Trash, "Excluir")
    }

    fn table(&self, rows: &[&EnvironmentVariable]) -> String {
        let mut s = String::with_capacity(2048 * rows.len().max(1));
        s.push_str(r#"<div class="card"><table class="table"><thead><tr><th>Chave (Key)</th><th>Valor</th><th>Atualizado em</th><th></th></tr></thead><tbody>"#);
        for var in rows {
            s.push_str("<tr data-id=\"");
            s.push_str(&escape(&var.id));
            s.push_str("\"><td><div class=\"cell-row\"><span class=\"type-icon ");
            s.push_str(var.kind.as_str());
            s.push_str("\">");
            s.push_str(&type_icon(var.kind).svg());
            s.push_str("</span><div class=\"cell-stack\"><span class=\"mono key-name\">");
            s.push_str(&escape(&var.name));
            s.push_str("</span><span class=\"sub\">");
            s.push_str(var.kind.as_str());
            s.push_str("</span></div></div></td><td>");
            s.push_str(&self.value_box(var));
            s.push_str("</td><td><div class=\"cell-stack\"><span>");
            s.push_str(&escape(&var.last_updated.label));
            s.push_str("</span><span class=\"sub\">");
            s.push_str(&escape(&var.created_by));
            s.push_str("</span></div></td><td>");
            s.push_str(&self.delete_button(var));
            s.push_str("</td></tr>");
        }
        s.push_str("</tbody></table>");
        if rows.is_empty() {
            s.push_str(&empty_state(EMPTY));
        }
        s.push_str("</div>");
        s
    }

    fn cards(&self, rows: &[&EnvironmentVariable]) -> String {
        if rows.is_empty() {
            return format!("<div class=\"card\">{}</div>", empty_state(EMPTY));
        }
        let mut s = String::with_capacity(2048 * rows.len());
        s.push_str(r#"<div class="grid">"#);
        for var in rows {
            s.push_str("<div class=\"card var-card\" data-id=\"");
            s.push_str(&escape(&var.id));
            s.push_str("\"><div class=\"card-header\"><div class=\"cell-row\"><span class=\"type-icon ");
            s.push_str(var.kind.as_str());
            s.push_str("\">");
            s.push_str(&type_icon(var.kind).svg());
            s.push_str("</span><strong class=\"mono key-name\">");
            s.push_str(&escape(&var.name));
            s.push_str("</strong></div><span class=\"badge\">");
            s.push_str(var.kind.as_str());
            s.push_str("</span></div><div class=\"card-body\">");
            if let Some(description) = &var.description {
                s.push_str("<p class=\"sub\">");
                s.push_str(&escape(description));
                s.push_str("</p>");
            }
            s.push_str(&self.value_box(var));
            s.push_str("</div><div class=\"card-footer\"><span class=\"meta grow\">");
            s.push_str(&escape(&var.last_updated.label));
            s.push_str(" · ");
            s.push_str(&escape(&var.created_by));
            s.push_str("</span>");
            s.push_str(&self.delete_button(var));
            s.push_str("</div></div>");
        }
        s.push_str("</div>");
        s
    }
}

fn view_toggle(params: &ListParams, current: VariableView) -> String {
    let mut s = String::with_capacity(1024);
    s.push_str(r#"<span class="view-toggle">"#);
    for (view, icon, title) in [
        (VariableView::Table, Icon::Table, "Tabela"),
        (VariableView::Cards, Icon::Grid, "Cards"),
    ] {
        let href = params
            .link(Route::Environments.path())
            .set("view", Some(view.as_param()));
        s.push_str("<a class=\"icon-btn");
        if view == current {
            s.push_str(" active");
        }
        s.push_str("\" href=\"");
        s.push_str(&href.attr());
        s.push_str("\" title=\"");
        s.push_str(title);
        s.push_str("\">");
        s.push_str(&icon.svg());
        s.push_str("</a>");
    }
    s.push_str("</span>");
    s
}

async fn environments_page(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionId>,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, AppError> {
    let scope = state.sessions.enter(session, Route::Environments).await;
    let environments = state.repo.environments().await?;
    let variables = state.repo.variables().await?;

    let default_tab = environments.first().map_or(ALL, |e| e.id.as_str());
    let active = params.tab_or(default_tab).to_owned();
    let query = params.view_query(default_tab, SortOrder::Name);
    let rows = derive_view(&variables, &query);

    let reveal = RevealState::new(params.reveal.clone());
    let copied = scope.copy().current().await;
    let view = VariableView::from_param(params.view.as_deref());
    let ctx = RowContext {
        params: &params,
        reveal: &reveal,
        copied: copied.as_deref(),
    };

    let env_tabs: Vec<_> = environments.iter().map(|e| e.as_tab()).collect();

    let mut content = String::with_capacity(16384);
    content.push_str(&page_header(
        "Variáveis de Ambiente",
        "Gerencie as chaves de configuração do seu projeto.",
        Some(HeaderAction {
            label: "Nova Variável",
            action: "/environments/variables",
            icon: Icon::Plus,
        }),
    ));
    content.push_str(&shell::tabs(&env_tabs, &active, |tab| {
        Href::new(Route::Environments.path())
            .set("tab", Some(&tab.id))
            .set("view", params.view.as_deref())
    }));
    content.push_str(r#"<div class="action-bar">"#);
    content.push_str(&shell::search_bar(
        Route::Environments.path(),
        "Buscar variáveis...",
        params.search(),
        &[
            ("tab", active.as_str()),
            ("sort", params.sort.as_deref().unwrap_or_default()),
            ("view", params.view.as_deref().unwrap_or_default()),
        ],
    ));
    content.push_str(&view_toggle(&params, view));
    content.push_str("</div>");
    content.push_str(&match view {
        VariableView::Table => ctx.table(&rows),
        VariableView::Cards => ctx.cards(&rows),
    });

    Ok(Html(app_shell(
        state.theme,
        state.sessions.copy_delay(),
        Route::Environments,
        Route::Environments.path(),
        &content,
    )))
}

/// `POST /environments/variables/{id}/copy`: mark the copy badge.
///
/// Script clients ask for `text/plain` and get the value back for the
/// clipboard; plain form posts are redirected to the page.
async fn copy_variable(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionId>,
    Path(id): Path<String>,
    Query(params): Query<ListParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let variable = state
        .repo
        .variable(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("variável '{id}' não encontrada")))?;

    let scope = state.sessions.enter(session, Route::Environments).await;
    scope.copy().mark(&variable.id).await;
    info!(id = %variable.id, name = %variable.name, "variable copied");

    if wants_text(&headers) {
        return Ok(variable.value.into_response());
    }
    Ok(Redirect::to(&params.link(Route::Environments.path()).url()).into_response())
}

async fn create_variable(Query(params): Query<ListParams>) -> Redirect {
    info!(environment = ?params.tab, "create variable requested");
    Redirect::to(&params.link(Route::Environments.path()).url())
}

async fn delete_variable(Path(id): Path<String>, Query(params): Query<ListParams>) -> Redirect {
    info!(%id, "delete variable requested");
    Redirect::to(&params.link(Route::Environments.path()).url())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_param_defaults_to_table() {
        assert_eq!(VariableView::from_param(None), VariableView::Table);
        assert_eq!(VariableView::from_param(Some("grid")), VariableView::Table);
        assert_eq!(VariableView::from_param(Some("cards")), VariableView::Cards);
    }

    #[test]
    fn every_type_has_its_own_icon() {
        let icons = [
            VariableType::String,
            VariableType::Secret,
            VariableType::ApiKey,
            VariableType::Database,
        ]
        .map(type_icon);
        for (i, a) in icons.iter().enumerate() {
            assert!(icons[i + 1..].iter().all(|b| a != b));
        }
    }
}
