//! HTTP error types for the `ViaEnv` server.
//!
//! Maps domain errors from `viaenv-core` and `viaenv-storage` into HTTP
//! responses. The dashboard is a browser UI, so every variant renders a
//! small standalone HTML page instead of a JSON body.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use viaenv_core::error::ValidationError;
use viaenv_storage::RepositoryError;

use crate::html::escape;

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Requested resource not found.
    NotFound(String),
    /// Client sent invalid input.
    BadRequest(String),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, title, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "Não encontrado", msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Requisição inválida", msg),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro interno",
                    "Não foi possível carregar os dados.".to_owned(),
                )
            }
        };

        (status, Html(error_page(status, title, &message))).into_response()
    }
}

fn error_page(status: StatusCode, title: &str, message: &str) -> String {
    let mut html = String::with_capacity(1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"pt-BR\"><head><meta charset=\"utf-8\"/><title>");
    html.push_str(title);
    html.push_str(" · ViaEnv</title></head>\n<body style=\"font-family:Inter,system-ui,sans-serif;display:flex;align-items:center;justify-content:center;min-height:100vh;margin:0;background:#F9FAFB;color:#111827\"><main style=\"text-align:center\"><p style=\"color:#6B7280;font-weight:600\">");
    html.push_str(status.as_str());
    html.push_str("</p><h1>");
    html.push_str(title);
    html.push_str("</h1><p>");
    html.push_str(&escape(message));
    html.push_str("</p><a href=\"/dashboard\" style=\"color:#6366F1\">Voltar ao dashboard</a></main></body>\n</html>");
    html
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}
