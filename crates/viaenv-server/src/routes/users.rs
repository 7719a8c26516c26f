//! Team members page.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Extension, Path, Query, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use tracing::info;

use viaenv_core::model::{Role, User, UserStatus};
use viaenv_core::pipeline::{ALL, SortOrder, derive_view};
use viaenv_core::route::Route;

use super::ListParams;
use super::shell::{self, HeaderAction, Icon, app_shell, empty_state, page_header, post_button};
use crate::error::AppError;
use crate::html::{Href, escape};
use crate::session::SessionId;
use crate::state::AppState;

/// Build the users page router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(Route::Users.path(), get(users_page))
}

/// Build the user action router.
pub fn actions() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/invite", post(invite_user))
        .route("/users/{id}/edit", post(edit_user))
        .route("/users/{id}/resend", post(resend_invite))
        .route("/users/{id}/delete", post(delete_user))
}

fn role_icon(role: Role) -> Icon {
    match role {
        Role::Admin => Icon::Shield,
        Role::Developer => Icon::Terminal,
        Role::Viewer => Icon::Eye,
    }
}

fn role_badge_class(role: Role) -> &'static str {
    match role {
        Role::Admin => "badge badge-primary",
        Role::Developer => "badge badge-info",
        Role::Viewer => "badge",
    }
}

fn sort_links(params: &ListParams, current: SortOrder) -> String {
    let mut s = String::with_capacity(512);
    s.push_str(r#"<span class="meta">Ordenar:"#);
    for (order, label) in [(SortOrder::Name, "Nome"), (SortOrder::RecentlyUpdated, "Último acesso")] {
        let href = params.link(Route::Users.path()).set("sort", order.as_param());
        s.push_str("<a href=\"");
        s.push_str(&href.attr());
        s.push('"');
        if order == current {
            s.push_str(" class=\"active\" aria-current=\"true\"");
        }
        s.push('>');
        s.push_str(label);
        s.push_str("</a>");
    }
    s.push_str("</span>");
    s
}

fn user_row(user: &User) -> String {
    let mut s = String::with_capacity(2048);
    s.push_str("<tr data-id=\"");
    s.push_str(&escape(&user.id));
    s.push_str("\"><td><div class=\"cell-row\"><span class=\"avatar\">");
    match &user.avatar_url {
        Some(url) => {
            s.push_str("<img src=\"");
            s.push_str(&escape(url));
            s.push_str("\" alt=\"");
            s.push_str(&escape(&user.name));
            s.push_str("\"/>");
        }
        None => s.push_str(&escape(&user.initials())),
    }
    s.push_str("</span><div class=\"cell-stack\"><span class=\"user-name\">");
    s.push_str(&escape(&user.name));
    s.push_str("</span><span class=\"sub\">");
    s.push_str(&escape(&user.email));
    s.push_str("</span></div></div></td><td><span class=\"");
    s.push_str(role_badge_class(user.role));
    s.push_str("\">");
    s.push_str(&role_icon(user.role).svg());
    s.push_str(user.role.as_str());
    s.push_str("</span></td><td><span class=\"status");
    if user.status == UserStatus::Invited {
        s.push_str(" invited");
    }
    s.push_str("\"><span class=\"dot\"></span>");
    s.push_str(user.status.label());
    s.push_str("</span></td><td>");
    s.push_str(&escape(&user.last_active.label));
    s.push_str("</td><td><span class=\"cell-row\">");
    let base = format!("/users/{}", urlencoding::encode(&user.id));
    s.push_str(&post_button(&format!("{base}/edit"), "icon-btn", Icon::Edit, "Editar Permissões"));
    if user.status == UserStatus::Invited {
        s.push_str(&post_button(&format!("{base}/resend"), "icon-btn", Icon::Mail, "Reenviar Convite"));
    }
    s.push_str(&post_button(&format!("{base}/delete"), "icon-btn danger", Icon::Trash, "Remover Usuário"));
    s.push_str("</span></td></tr>");
    s
}

async fn users_page(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionId>,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, AppError> {
    state.sessions.enter(session, Route::Users).await;
    let users = state.repo.users().await?;
    let tabs = state.repo.user_tabs().await?;

    let active = params.tab_or(ALL).to_owned();
    let query = params.view_query(ALL, SortOrder::Name);
    let rows = derive_view(&users, &query);

    let mut content = String::with_capacity(16384);
    content.push_str(&page_header(
        "Gerenciar Equipe",
        "Controle o acesso e as permissões dos membros da equipe.",
        Some(HeaderAction {
            label: "Novo usuário",
            action: "/users/invite",
            icon: Icon::Plus,
        }),
    ));
    content.push_str(&shell::tabs(&tabs, &active, |tab| {
        Href::new(Route::Users.path())
            .set("tab", Some(&tab.id))
            .set("sort", params.sort.as_deref())
    }));
    content.push_str(r#"<div class="action-bar">"#);
    content.push_str(&shell::search_bar(
        Route::Users.path(),
        "Buscar por nome ou email...",
        params.search(),
        &[
            ("tab", active.as_str()),
            ("sort", params.sort.as_deref().unwrap_or_default()),
        ],
    ));
    content.push_str(&sort_links(&params, query.sort));
    content.push_str("</div>");

    content.push_str(r#"<div class="card"><table class="table"><thead><tr><th>Usuário</th><th>Permissão (Role)</th><th>Status</th><th>Último Acesso</th><th></th></tr></thead><tbody>"#);
    for user in &rows {
        content.push_str(&user_row(user));
    }
    content.push_str("</tbody></table>");
    if rows.is_empty() {
        content.push_str(&empty_state("Nenhum usuário encontrado com os filtros atuais."));
    }
    content.push_str("</div>");

    Ok(Html(app_shell(state.theme, state.sessions.copy_delay(), Route::Users, Route::Users.path(), &content)))
}

async fn invite_user() -> Redirect {
    info!("invite user requested");
    Redirect::to(Route::Users.path())
}

async fn edit_user(Path(id): Path<String>) -> Redirect {
    info!(%id, "edit user permissions requested");
    Redirect::to(Route::Users.path())
}

async fn resend_invite(Path(id): Path<String>) -> Redirect {
    info!(%id, "resend invite requested");
    Redirect::to(Route::Users.path())
}

async fn delete_user(Path(id): Path<String>) -> Redirect {
    info!(%id, "delete user requested");
    Redirect::to(Route::Users.path())
}
