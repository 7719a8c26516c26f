//! Security page: IP allowlist, service tokens and secret scanning.
//!
//! The add-rule form is the one real validation in the dashboard. A bad
//! address comes back as the same page with status 400, the input echoed
//! and the message inline; a good one is logged and redirected.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Extension, Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use serde::Deserialize;
use tracing::{info, warn};

use viaenv_core::allowlist::{parse_allowlist_entry, validate_description};
use viaenv_core::model::{AllowlistRule, ScanReport, ServiceToken, Tab};
use viaenv_core::route::Route;

use super::shell::{self, Icon, app_shell, empty_state, page_header, post_button};
use crate::error::AppError;
use crate::html::{Href, escape};
use crate::session::SessionId;
use crate::state::AppState;

/// Address shown in the "current IP" banner.
const CURRENT_IP: &str = "201.55.99.123";

/// Build the security page router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(Route::Security.path(), get(security_page))
}

/// Build the security action router.
pub fn actions() -> Router<Arc<AppState>> {
    Router::new()
        .route("/security/allowlist", post(add_rule))
        .route("/security/allowlist/{id}/delete", post(delete_rule))
        .route("/security/tokens", post(create_token))
        .route("/security/tokens/{id}/delete", post(revoke_token))
        .route("/security/scan", post(run_scan))
}

/// The three tabs of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecurityTab {
    #[default]
    Network,
    Tokens,
    Scanning,
}

impl SecurityTab {
    const ALL: [Self; 3] = [Self::Network, Self::Tokens, Self::Scanning];

    /// Unknown values select the network tab.
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("tokens") => Self::Tokens,
            Some("scanning") => Self::Scanning,
            _ => Self::Network,
        }
    }

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Tokens => "tokens",
            Self::Scanning => "scanning",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Network => "IP Allowlist (Firewall)",
            Self::Tokens => "Service Tokens",
            Self::Scanning => "Secret Scanning",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SecurityParams {
    pub tab: Option<String>,
}

/// Fields of the add-rule form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleForm {
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub description: String,
}

/// A rejected submission, echoed back into the form.
struct Rejected<'a> {
    form: &'a RuleForm,
    message: String,
}

fn network_tab(rules: &[AllowlistRule], rejected: Option<&Rejected<'_>>) -> String {
    let mut s = String::with_capacity(8192);

    s.push_str(r#"<div class="alert"><span class="icon-box">"#);
    s.push_str(&Icon::Info.svg());
    s.push_str(r#"</span><div class="grow"><strong>Seu IP Atual: "#);
    s.push_str(CURRENT_IP);
    s.push_str("</strong><p class=\"meta\">Certifique-se de adicionar seu IP atual antes de habilitar o modo restrito.</p></div>");
    s.push_str(r#"<form class="inline" method="post" action="/security/allowlist"><input type="hidden" name="ip" value=""#);
    s.push_str(CURRENT_IP);
    s.push_str(r#""/><input type="hidden" name="description" value="Meu IP"/><button type="submit" class="btn btn-secondary">"#);
    s.push_str(&Icon::Plus.svg());
    s.push_str("Adicionar meu IP</button></form></div>");

    s.push_str(r#"<div class="card"><div class="card-header"><div><h3>Regras de IP Allowlist</h3><p>Apenas requisições vindas destes IPs poderão ler as secrets deste projeto.</p></div></div><div class="card-body">"#);

    let (ip, description) = rejected.map_or(("", ""), |r| (r.form.ip.as_str(), r.form.description.as_str()));
    s.push_str(r#"<form class="form-row" method="post" action="/security/allowlist"><input class="input mono" name="ip" placeholder="Ex: 192.168.0.1 ou 10.0.0.0/24" value=""#);
    s.push_str(&escape(ip));
    s.push_str(r#""/><input class="input" name="description" placeholder="Descrição (Opcional)" value=""#);
    s.push_str(&escape(description));
    s.push_str(r#""/><button type="submit" class="btn btn-primary">"#);
    s.push_str(&Icon::Plus.svg());
    s.push_str("Adicionar Regra</button></form>");
    if let Some(rejected) = rejected {
        s.push_str(r#"<div class="alert alert-error" role="alert">"#);
        s.push_str(&Icon::Alert.svg());
        s.push_str(&escape(&rejected.message));
        s.push_str("</div>");
    }
    s.push_str("</div>");

    if rules.is_empty() {
        s.push_str(&empty_state("Nenhuma regra cadastrada."));
    }
    for rule in rules {
        s.push_str("<div class=\"list-item\" data-id=\"");
        s.push_str(&escape(&rule.id));
        s.push_str("\"><div class=\"cell-row\"><span class=\"type-icon\">");
        s.push_str(&Icon::Globe.svg());
        s.push_str("</span><div class=\"cell-stack\"><strong class=\"mono\">");
        s.push_str(&escape(&rule.cidr));
        s.push_str("</strong><span class=\"sub\">");
        s.push_str(&escape(&rule.description));
        s.push_str("</span></div></div><span class=\"meta\">Adicionado em ");
        s.push_str(&escape(&rule.created_at));
        s.push_str("</span>");
        s.push_str(&post_button(
            &format!("/security/allowlist/{}/delete", escape(&urlencoding::encode(&rule.id))),
            "icon-btn danger",
            Icon::Trash,
            "Remover regra",
        ));
        s.push_str("</div>");
    }
    s.push_str("</div>");
    s
}

fn tokens_tab(tokens: &[ServiceToken]) -> String {
    let mut s = String::with_capacity(4096);
    s.push_str(r#"<div class="card"><div class="card-header"><div><h3>Service Tokens (Machine-to-Machine)</h3><p>Tokens usados por pipelines de CI/CD e servidores. Eles não contam como usuários.</p></div>"#);
    s.push_str(&post_button("/security/tokens", "btn btn-primary", Icon::Plus, "Novo Token"));
    s.push_str("</div>");
    if tokens.is_empty() {
        s.push_str(&empty_state("Nenhum token criado."));
    }
    for token in tokens {
        s.push_str("<div class=\"list-item\" data-id=\"");
        s.push_str(&escape(&token.id));
        s.push_str("\"><div class=\"cell-row\"><span class=\"type-icon\">");
        s.push_str(&Icon::Robot.svg());
        s.push_str("</span><div class=\"cell-stack\"><strong>");
        s.push_str(&escape(&token.name));
        s.push_str("</strong><span class=\"sub mono\">");
        s.push_str(&escape(&token.prefix));
        s.push_str("••••••••</span></div></div><div class=\"cell-stack\"><span class=\"badge");
        if token.never_expires() {
            s.push_str(" badge-warning");
        }
        s.push_str("\">Expira: ");
        s.push_str(&escape(token.expires.as_deref().unwrap_or("Nunca")));
        s.push_str("</span><span class=\"sub\">Uso: ");
        s.push_str(&escape(&token.last_used));
        s.push_str("</span></div>");
        s.push_str(&post_button(
            &format!("/security/tokens/{}/delete", escape(&urlencoding::encode(&token.id))),
            "icon-btn danger",
            Icon::Trash,
            "Revogar token",
        ));
        s.push_str("</div>");
    }
    s.push_str("</div>");
    s
}

fn scanning_tab(report: &ScanReport) -> String {
    let mut s = String::with_capacity(4096);
    s.push_str(r#"<div class="card"><div class="card-body"><div class="cell-row"><span class="icon-box">"#);
    if report.is_clean() {
        s.push_str(&Icon::Check.svg());
        s.push_str("</span><div class=\"grow\"><h3>Nenhum vazamento detectado</h3>");
    } else {
        s.push_str(&Icon::Alert.svg());
        s.push_str("</span><div class=\"grow\"><h3 class=\"trend-down\">Vazamentos detectados</h3>");
    }
    s.push_str("<p class=\"meta\">O monitoramento automático verificou seus repositórios GitHub conectados ");
    s.push_str(&escape(&report.last_run));
    s.push_str(".</p></div>");
    s.push_str(&post_button("/security/scan", "btn btn-secondary", Icon::Refresh, "Verificar Agora"));
    s.push_str("</div></div></div>");

    s.push_str(r#"<div class="card"><div class="card-header"><h3>Repositórios Monitorados</h3></div>"#);
    for repo in &report.repositories {
        s.push_str("<div class=\"list-item\"><span class=\"mono\">");
        s.push_str(&escape(&repo.name));
        s.push_str("</span>");
        if repo.clean {
            s.push_str(r#"<span class="badge badge-success">Seguro</span>"#);
        } else {
            s.push_str(r#"<span class="badge badge-error">Vazamento</span>"#);
        }
        s.push_str("</div>");
    }
    s.push_str("</div>");
    s
}

async fn render(
    state: &AppState,
    session: SessionId,
    tab: SecurityTab,
    rejected: Option<&Rejected<'_>>,
) -> Result<String, AppError> {
    state.sessions.enter(session, Route::Security).await;

    let mut content = String::with_capacity(16384);
    content.push_str(&page_header(
        "Segurança e Acesso",
        "Gerencie regras de firewall, tokens de máquina e monitoramento de vazamentos.",
        None,
    ));
    let tabs: Vec<Tab> = SecurityTab::ALL.iter().map(|t| Tab::new(t.id(), t.label())).collect();
    content.push_str(&shell::tabs(&tabs, tab.id(), |t| {
        Href::new(Route::Security.path()).set("tab", Some(&t.id))
    }));

    match tab {
        SecurityTab::Network => content.push_str(&network_tab(&state.repo.allowlist().await?, rejected)),
        SecurityTab::Tokens => content.push_str(&tokens_tab(&state.repo.service_tokens().await?)),
        SecurityTab::Scanning => content.push_str(&scanning_tab(&state.repo.scan_report().await?)),
    }

    Ok(app_shell(state.theme, state.sessions.copy_delay(), Route::Security, Route::Security.path(), &content))
}

async fn security_page(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionId>,
    Query(params): Query<SecurityParams>,
) -> Result<Html<String>, AppError> {
    let tab = SecurityTab::from_param(params.tab.as_deref());
    Ok(Html(render(&state, session, tab, None).await?))
}

async fn add_rule(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<RuleForm>,
) -> Result<Response, AppError> {
    let checked = parse_allowlist_entry(&form.ip)
        .and_then(|target| validate_description(&form.description).map(|d| (target, d)));
    match checked {
        Ok((target, description)) => {
            info!(%target, %description, "allowlist rule submitted");
            Ok(Redirect::to(Route::Security.path()).into_response())
        }
        Err(e) => {
            warn!(error = %e, "rejected allowlist rule");
            let rejected = Rejected {
                form: &form,
                message: e.to_string(),
            };
            let page = render(&state, session, SecurityTab::Network, Some(&rejected)).await?;
            Ok((StatusCode::BAD_REQUEST, Html(page)).into_response())
        }
    }
}

async fn delete_rule(Path(id): Path<String>) -> Redirect {
    info!(%id, "allowlist rule removal requested");
    Redirect::to(Route::Security.path())
}

async fn create_token() -> Redirect {
    info!("service token creation requested");
    Redirect::to("/security?tab=tokens")
}

async fn revoke_token(Path(id): Path<String>) -> Redirect {
    info!(%id, "service token revocation requested");
    Redirect::to("/security?tab=tokens")
}

async fn run_scan() -> Redirect {
    info!("secret scan requested");
    Redirect::to("/security?tab=scanning")
}

#[cfg(test)]
mod tests {
    use super::*;
    use viaenv_core::model::ScannedRepository;

    #[test]
    fn unknown_tab_selects_network() {
        assert_eq!(SecurityTab::from_param(None), SecurityTab::Network);
        assert_eq!(SecurityTab::from_param(Some("billing")), SecurityTab::Network);
        assert_eq!(SecurityTab::from_param(Some("tokens")), SecurityTab::Tokens);
    }

    #[test]
    fn rejected_input_is_echoed_escaped() {
        let form = RuleForm {
            ip: "<script>".to_owned(),
            description: String::new(),
        };
        let rejected = Rejected {
            form: &form,
            message: "bad".to_owned(),
        };
        let html = network_tab(&[], Some(&rejected));
        assert!(html.contains("value=\"&lt;script&gt;\""));
        assert!(html.contains("role=\"alert\""));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn token_without_expiry_is_flagged() {
        let token = ServiceToken {
            id: "t1".to_owned(),
            name: "GitHub Actions".to_owned(),
            prefix: "st_live_".to_owned(),
            last_used: "há 5 min".to_owned(),
            expires: None,
        };
        let html = tokens_tab(&[token]);
        assert!(html.contains("badge badge-warning\">Expira: Nunca"));
        assert!(html.contains("Uso: há 5 min"));
    }

    #[test]
    fn leaking_repository_changes_headline() {
        let report = ScanReport {
            last_run: "há 2 horas".to_owned(),
            repositories: vec![ScannedRepository {
                name: "org/api".to_owned(),
                clean: false,
            }],
        };
        let html = scanning_tab(&report);
        assert!(html.contains("Vazamentos detectados"));
        assert!(!html.contains("Nenhum vazamento"));
    }
}
