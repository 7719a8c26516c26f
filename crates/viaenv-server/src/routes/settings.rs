//! Project settings page.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Extension, Form, Query, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use serde::Deserialize;
use tracing::info;

use viaenv_core::model::{ProjectSettings, Tab};
use viaenv_core::route::Route;

use super::shell::{self, Icon, app_shell, copy_button, empty_state, page_header, post_button};
use super::wants_text;
use crate::error::AppError;
use crate::html::{Href, escape};
use crate::session::SessionId;
use crate::state::AppState;

/// Copy id of the project id field.
const PROJECT_ID_COPY: &str = "project-id";

/// Build the settings page router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(Route::Settings.path(), get(settings_page))
}

/// Build the settings action router.
pub fn actions() -> Router<Arc<AppState>> {
    Router::new()
        .route("/settings/save", post(save_settings))
        .route("/settings/project-id/copy", post(copy_project_id))
        .route("/settings/project/delete", post(delete_project))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsTab {
    #[default]
    General,
    Security,
    Billing,
}

impl SettingsTab {
    const ALL: [Self; 3] = [Self::General, Self::Security, Self::Billing];

    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("security") => Self::Security,
            Some("billing") => Self::Billing,
            _ => Self::General,
        }
    }

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Security => "security",
            Self::Billing => "billing",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::General => "Geral",
            Self::Security => "Segurança & Acesso",
            Self::Billing => "Faturamento",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SettingsParams {
    pub tab: Option<String>,
}

/// The general-settings form. Environment checkboxes are not read back.
#[derive(Debug, Default, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub name: String,
}

fn general_tab(project: &ProjectSettings, copied: bool) -> String {
    let mut s = String::with_capacity(8192);
    s.push_str(r#"<div class="card"><div class="card-header"><h3>Informações Básicas</h3></div><div class="card-body"><form id="settings-form" method="post" action="/settings/save"><div class="form-group"><label class="form-label" for="project-name">Nome do Projeto</label><input class="input" id="project-name" name="name" value=""#);
    s.push_str(&escape(&project.name));
    s.push_str(r#""/></div></form><div class="form-group"><label class="form-label">Project ID</label><div class="input-group"><input class="input mono" value=""#);
    s.push_str(&escape(&project.project_id));
    s.push_str(r#"" disabled/>"#);
    s.push_str(&copy_button(&Href::new("/settings/project-id/copy"), copied));
    s.push_str(r#"</div><p class="hint">Este ID é usado para integrações via CLI e API.</p></div></div><div class="card-footer"><button type="submit" form="settings-form" class="btn btn-primary">Salvar Alterações</button></div></div>"#);

    s.push_str(r#"<div class="card"><div class="card-header"><h3>Configuração de Ambientes</h3></div><div class="card-body checkbox-group">"#);
    for env in &project.environments {
        s.push_str("<label><input type=\"checkbox\" form=\"settings-form\" name=\"env\" value=\"");
        s.push_str(&escape(&env.name));
        s.push('"');
        if env.enabled {
            s.push_str(" checked");
        }
        s.push_str("/> ");
        s.push_str(&escape(&env.name));
        s.push_str("</label>");
    }
    s.push_str("</div></div>");

    s.push_str(r#"<div class="danger-zone"><div><h3>Deletar Projeto</h3><p class="meta">Esta ação removerá permanentemente todos as secrets, logs e configurações. Não pode ser desfeito.</p></div>"#);
    s.push_str(&post_button("/settings/project/delete", "btn btn-danger", Icon::Trash, "Excluir Projeto"));
    s.push_str("</div>");
    s
}

fn placeholder_tab(title: &str, body: &str) -> String {
    let mut s = String::with_capacity(256);
    s.push_str(r#"<div class="card"><div class="card-header"><h3>"#);
    s.push_str(title);
    s.push_str("</h3></div>");
    s.push_str(&empty_state(body));
    s.push_str("</div>");
    s
}

async fn settings_page(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionId>,
    Query(params): Query<SettingsParams>,
) -> Result<Html<String>, AppError> {
    let scope = state.sessions.enter(session, Route::Settings).await;
    let tab = SettingsTab::from_param(params.tab.as_deref());

    let mut content = String::with_capacity(16384);
    content.push_str(&page_header(
        "Configurações do Projeto",
        "Gerencie as informações gerais, segurança e preferências do projeto.",
        None,
    ));
    let tabs: Vec<Tab> = SettingsTab::ALL.iter().map(|t| Tab::new(t.id(), t.label())).collect();
    content.push_str(&shell::tabs(&tabs, tab.id(), |t| {
        Href::new(Route::Settings.path()).set("tab", Some(&t.id))
    }));

    match tab {
        SettingsTab::General => {
            let project = state.repo.project().await?;
            let copied = scope.copy().is_copied(PROJECT_ID_COPY).await;
            content.push_str(&general_tab(&project, copied));
        }
        SettingsTab::Security => {
            content.push_str(&placeholder_tab("Segurança do Projeto", "Conteúdo da aba de segurança..."));
        }
        SettingsTab::Billing => {
            content.push_str(&placeholder_tab("Faturamento", "Conteúdo da aba de faturamento..."));
        }
    }

    Ok(Html(app_shell(state.theme, state.sessions.copy_delay(), Route::Settings, Route::Settings.path(), &content)))
}

async fn save_settings(Form(form): Form<SettingsForm>) -> Result<Redirect, AppError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Nome do Projeto é obrigatório".to_owned()));
    }
    info!(%name, "project settings saved");
    Ok(Redirect::to(Route::Settings.path()))
}

async fn copy_project_id(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionId>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let project = state.repo.project().await?;
    let scope = state.sessions.enter(session, Route::Settings).await;
    scope.copy().mark(PROJECT_ID_COPY).await;
    info!("project id copied");

    if wants_text(&headers) {
        return Ok(project.project_id.into_response());
    }
    Ok(Redirect::to(Route::Settings.path()).into_response())
}

async fn delete_project() -> Redirect {
    info!("project deletion requested");
    Redirect::to(Route::Settings.path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use viaenv_core::model::EnvironmentToggle;

    fn project() -> ProjectSettings {
        ProjectSettings {
            name: "ViaEnv Core".to_owned(),
            project_id: "proj_89sfd789sdf789".to_owned(),
            environments: vec![
                EnvironmentToggle {
                    name: "Development".to_owned(),
                    enabled: true,
                },
                EnvironmentToggle {
                    name: "QA".to_owned(),
                    enabled: false,
                },
            ],
        }
    }

    #[test]
    fn general_tab_renders_toggles() {
        let html = general_tab(&project(), false);
        assert!(html.contains("value=\"Development\" checked/>"));
        assert!(html.contains("value=\"QA\"/>"));
        assert!(html.contains("proj_89sfd789sdf789"));
        assert!(html.contains("title=\"Copiar\""));
    }

    #[test]
    fn copied_project_id_shows_badge() {
        let html = general_tab(&project(), true);
        assert!(html.contains("Copiado!"));
    }

    #[test]
    fn unknown_tab_selects_general() {
        assert_eq!(SettingsTab::from_param(Some("x")), SettingsTab::General);
        assert_eq!(SettingsTab::from_param(Some("billing")), SettingsTab::Billing);
    }
}
