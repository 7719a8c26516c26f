//! Help center page.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Extension, Query, State};
use axum::response::Html;
use axum::routing::get;

use viaenv_core::model::HelpCategory;
use viaenv_core::pipeline;
use viaenv_core::route::Route;

use super::ListParams;
use super::shell::{self, Icon, app_shell, empty_state};
use crate::error::AppError;
use crate::html::escape;
use crate::session::SessionId;
use crate::state::AppState;

/// Build the help page router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(Route::Help.path(), get(help_page))
}

fn category_card(category: &HelpCategory) -> String {
    let mut s = String::with_capacity(1024);
    s.push_str("<div class=\"card\"><div class=\"card-body\"><span class=\"category-icon\" style=\"background:");
    s.push_str(&escape(&category.color));
    s.push_str("\">");
    s.push_str(&Icon::Help.svg());
    s.push_str("</span><h3>");
    s.push_str(&escape(&category.title));
    s.push_str("</h3><p class=\"meta\">");
    s.push_str(&escape(&category.description));
    s.push_str("</p></div><div class=\"card-footer\"><a href=\"#\">Ver artigos ");
    s.push_str(&Icon::ArrowRight.svg());
    s.push_str("</a></div></div>");
    s
}

async fn help_page(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionId>,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, AppError> {
    state.sessions.enter(session, Route::Help).await;
    let categories = state.repo.help_categories().await?;
    let matches = pipeline::search(&categories, params.search().trim());

    let mut content = String::with_capacity(8192);
    content.push_str(r#"<section class="hero"><h1>Central de Ajuda</h1><p>Encontre guias, tutoriais e suporte técnico para sua jornada.</p><h2>Como podemos ajudar hoje?</h2>"#);
    content.push_str(&shell::search_bar(
        Route::Help.path(),
        "Pesquise por 'Configurar CLI', 'Roles', 'Webhooks'...",
        params.search(),
        &[],
    ));
    content.push_str("</section>");

    if matches.is_empty() {
        content.push_str("<div class=\"card\">");
        content.push_str(&empty_state("Nenhum artigo encontrado para esta busca."));
        content.push_str("</div>");
    } else {
        content.push_str(r#"<div class="grid">"#);
        for category in &matches {
            content.push_str(&category_card(category));
        }
        content.push_str("</div>");
    }

    content.push_str(r#"<div class="card"><div class="card-body cell-row"><div class="grow"><h3>Não encontrou o que precisava?</h3><p class="meta">Nossa equipe de suporte está pronta para ajudar.</p></div><a class="btn btn-secondary" href="mailto:suporte@viaenv.com">"#);
    content.push_str(&Icon::Mail.svg());
    content.push_str(r##"Enviar Email</a><a class="btn btn-primary" href="#">"##);
    content.push_str(&Icon::Help.svg());
    content.push_str("Abrir Chat</a></div></div>");

    Ok(Html(app_shell(state.theme, state.sessions.copy_delay(), Route::Help, Route::Help.path(), &content)))
}
