//! Login and registration pages.
//!
//! Both render in the auth shell. Submissions are accepted and logged
//! without the password, then sent to the dashboard.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Extension, Form, Query, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use serde::Deserialize;
use tracing::info;

use viaenv_core::route::Route;

use super::shell::{Icon, auth_shell};
use crate::html::Href;
use crate::session::SessionId;
use crate::state::AppState;

/// Build the auth page router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(Route::Login.path(), get(login_page))
        .route(Route::Register.path(), get(register_page))
}

/// Build the auth action router.
pub fn actions() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login/submit", post(login))
        .route("/register/submit", post(register))
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginParams {
    /// `1` shows the password in clear.
    pub show: Option<String>,
}

impl LoginParams {
    fn show_password(&self) -> bool {
        matches!(self.show.as_deref(), Some("1" | "true"))
    }
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

fn socials() -> String {
    let mut s = String::with_capacity(1024);
    s.push_str(r##"<div class="socials"><a class="btn btn-secondary" href="#google">"##);
    s.push_str(&Icon::Globe.svg());
    s.push_str(r##"Google</a><a class="btn btn-secondary" href="#github">"##);
    s.push_str(&Icon::Terminal.svg());
    s.push_str("GitHub</a></div>");
    s
}

fn brand() -> String {
    let mut s = String::with_capacity(512);
    s.push_str(r#"<div class="brand"><span class="logo-icon">"#);
    s.push_str(&Icon::Bolt.svg());
    s.push_str("</span>ViaEnv</div>");
    s
}

fn login_content(show_password: bool) -> String {
    let toggle = Href::new(Route::Login.path()).set("show", (!show_password).then_some("1"));

    let mut s = String::with_capacity(4096);
    s.push_str(&brand());
    s.push_str(r#"<h1>Bem-vindo de volta</h1><p class="lead">Acesse sua conta para gerenciar suas configurações.</p>"#);
    s.push_str(&socials());
    s.push_str(r#"<div class="divider">ou continue com e-mail</div>"#);
    s.push_str(r#"<form method="post" action="/login/submit"><div class="form-group"><label class="form-label" for="email">E-mail</label><input class="input" id="email" name="email" type="email" placeholder="seu@email.com" autocomplete="email"/></div>"#);
    s.push_str(r#"<div class="form-group"><label class="form-label" for="password">Senha</label><div class="input-group"><input class="input" id="password" name="password" type=""#);
    s.push_str(if show_password { "text" } else { "password" });
    s.push_str(r#"" placeholder="••••••••" autocomplete="current-password"/><a class="icon-btn" data-toggle-password href=""#);
    s.push_str(&toggle.attr());
    s.push_str("\" title=\"");
    s.push_str(if show_password { "Ocultar senha" } else { "Mostrar senha" });
    s.push_str("\">");
    s.push_str(&if show_password { Icon::EyeOff } else { Icon::Eye }.svg());
    s.push_str(r##"</a></div><a class="hint" href="#forgot">Esqueceu a senha?</a></div><button type="submit" class="btn btn-primary btn-block">Entrar na conta</button></form>"##);
    s.push_str(r#"<p class="auth-footer">Não tem uma conta? <a href="/register">Criar conta gratuita</a></p>"#);
    s
}

fn register_content() -> String {
    let mut s = String::with_capacity(4096);
    s.push_str(&brand());
    s.push_str(r#"<h1>Criar sua conta</h1><p class="lead">Junte-se a mais de 10.000 desenvolvedores.</p>"#);
    s.push_str(&socials());
    s.push_str(r#"<div class="divider">ou use seu e-mail corporativo</div>"#);
    s.push_str(r#"<form method="post" action="/register/submit"><div class="form-group"><label class="form-label" for="name">Nome Completo</label><input class="input" id="name" name="name" autocomplete="name"/></div>"#);
    s.push_str(r#"<div class="form-group"><label class="form-label" for="email">E-mail de Trabalho</label><input class="input" id="email" name="email" type="email" autocomplete="email"/></div>"#);
    s.push_str(r#"<div class="form-group"><label class="form-label" for="password">Senha</label><input class="input" id="password" name="password" type="password" placeholder="Mínimo 8 caracteres" autocomplete="new-password"/>"#);
    s.push_str(r#"<div class="strength"><span class="bar active"></span><span class="bar active"></span><span class="bar"></span><span class="bar"></span><span>Senha média</span></div></div>"#);
    s.push_str(r##"<p class="hint">Ao criar uma conta, você concorda com nossos <a href="#terms">Termos de Serviço</a> e <a href="#privacy">Política de Privacidade</a>.</p>"##);
    s.push_str(r#"<button type="submit" class="btn btn-primary btn-block">Criar Conta Gratuita</button></form>"#);
    s.push_str(r#"<p class="auth-footer">Já possui uma conta? <a href="/login">Fazer login</a></p>"#);
    s.push_str("<ul class=\"benefits\">");
    for benefit in [
        "Gerenciamento ilimitado de variáveis",
        "Criptografia de ponta a ponta",
        "Integração com CI/CD",
    ] {
        s.push_str("<li>");
        s.push_str(&Icon::Check.svg());
        s.push_str(benefit);
        s.push_str("</li>");
    }
    s.push_str("</ul>");
    s
}

async fn login_page(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionId>,
    Query(params): Query<LoginParams>,
) -> Html<String> {
    state.sessions.enter(session, Route::Login).await;
    Html(auth_shell(state.theme, Route::Login, &login_content(params.show_password())))
}

async fn register_page(State(state): State<Arc<AppState>>, Extension(session): Extension<SessionId>) -> Html<String> {
    state.sessions.enter(session, Route::Register).await;
    Html(auth_shell(state.theme, Route::Register, &register_content()))
}

async fn login(Form(form): Form<LoginForm>) -> Redirect {
    info!(email = %form.email, has_password = !form.password.is_empty(), "login submitted");
    Redirect::to(Route::Dashboard.path())
}

async fn register(Form(form): Form<RegisterForm>) -> Redirect {
    info!(
        name = %form.name,
        email = %form.email,
        password_len = form.password.chars().count(),
        "registration submitted"
    );
    Redirect::to(Route::Dashboard.path())
}
