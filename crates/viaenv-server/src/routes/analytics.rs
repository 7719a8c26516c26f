//! Analytics page.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Extension, State};
use axum::response::Html;
use axum::routing::get;

use viaenv_core::model::{AnalyticsSnapshot, Trend, UsageStat};
use viaenv_core::route::Route;

use super::shell::{Icon, app_shell, page_header};
use crate::error::AppError;
use crate::html::escape;
use crate::session::SessionId;
use crate::state::AppState;

/// Build the analytics page router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(Route::Analytics.path(), get(analytics_page))
}

fn trend_class(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "badge trend-up",
        Trend::Down => "badge trend-down",
        Trend::Neutral => "badge trend-neutral",
    }
}

/// KPI cards. Shared with the dashboard overview.
pub(crate) fn stat_cards(stats: &[UsageStat]) -> String {
    let mut s = String::with_capacity(1024 * stats.len().max(1));
    s.push_str(r#"<div class="stat-grid">"#);
    for stat in stats {
        s.push_str("<div class=\"stat-card\"><div class=\"stat-head\"><span class=\"icon-box\" style=\"color:");
        s.push_str(&escape(&stat.color));
        s.push_str("\">");
        s.push_str(&Icon::Chart.svg());
        s.push_str("</span><span class=\"");
        s.push_str(trend_class(stat.trend));
        s.push_str("\">");
        s.push_str(&escape(&stat.change));
        s.push_str("</span></div><div class=\"value\">");
        s.push_str(&escape(&stat.value));
        s.push_str("</div><div class=\"label\">");
        s.push_str(&escape(&stat.label));
        s.push_str("</div></div>");
    }
    s.push_str("</div>");
    s
}

fn volume_chart(snapshot: &AnalyticsSnapshot) -> String {
    let mut s = String::with_capacity(4096);
    s.push_str(r#"<div class="card"><div class="card-header"><div><h3>Volume de Requisições por Ambiente</h3><p>Monitoramento em tempo real de acessos via SDK e CLI.</p></div></div><div class="card-body"><div class="bars">"#);
    for height in &snapshot.request_volume {
        let height = (*height).min(100);
        s.push_str("<div class=\"bar\" style=\"height:");
        s.push_str(&height.to_string());
        s.push_str("%\" title=\"");
        s.push_str(&height.to_string());
        s.push_str("%\"></div>");
    }
    s.push_str(r#"</div><div class="axis">"#);
    for label in &snapshot.axis_labels {
        s.push_str("<span>");
        s.push_str(&escape(label));
        s.push_str("</span>");
    }
    s.push_str("</div></div></div>");
    s
}

fn detail_cards(snapshot: &AnalyticsSnapshot) -> String {
    let mut s = String::with_capacity(4096);
    s.push_str(r#"<div class="grid"><div class="card"><div class="card-header"><h3>Top Variáveis Acessadas</h3></div>"#);
    for usage in &snapshot.top_variables {
        s.push_str("<div class=\"list-item\"><span class=\"mono\">");
        s.push_str(&escape(&usage.name));
        s.push_str("</span><span class=\"meta\">");
        s.push_str(&escape(&usage.calls));
        s.push_str("</span></div>");
    }
    s.push_str(r#"</div><div class="card"><div class="card-header"><h3>Acessos por Região</h3></div>"#);
    for region in &snapshot.regions {
        s.push_str("<div class=\"list-item\"><span class=\"cell-row\">");
        s.push_str(&Icon::Globe.svg());
        s.push_str(&escape(&region.label));
        s.push_str("</span><strong>");
        s.push_str(&region.percent.min(100).to_string());
        s.push_str("%</strong></div>");
    }
    s.push_str("</div></div>");
    s
}

async fn analytics_page(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionId>,
) -> Result<Html<String>, AppError> {
    state.sessions.enter(session, Route::Analytics).await;
    let snapshot = state.repo.analytics().await?;

    let mut content = String::with_capacity(16384);
    content.push_str(&page_header(
        "Analytics & Insights",
        "Visualize o uso de recursos e a atividade de segurança do seu projeto.",
        None,
    ));
    content.push_str(r#"<div class="action-bar"><span class="meta">"#);
    content.push_str(&Icon::Clock.svg());
    content.push_str("Mostrando dados de: <strong>");
    content.push_str(&escape(&snapshot.period));
    content.push_str("</strong></span></div>");
    content.push_str(&stat_cards(&snapshot.stats));
    content.push_str(&volume_chart(&snapshot));
    content.push_str(&detail_cards(&snapshot));

    Ok(Html(app_shell(state.theme, state.sessions.copy_delay(), Route::Analytics, Route::Analytics.path(), &content)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_picks_badge_color() {
        let stat = UsageStat {
            id: 1,
            label: "Falhas de Auth".to_owned(),
            value: "23".to_owned(),
            change: "-5%".to_owned(),
            trend: Trend::Down,
            color: "#EF4444".to_owned(),
        };
        let html = stat_cards(&[stat]);
        assert!(html.contains("badge trend-down\">-5%"));
        assert!(html.contains("Falhas de Auth"));
    }

    #[test]
    fn bars_are_clamped() {
        let snapshot = AnalyticsSnapshot {
            period: "Últimos 7 dias".to_owned(),
            stats: Vec::new(),
            request_volume: vec![40, 250],
            axis_labels: vec!["Seg".to_owned()],
            top_variables: Vec::new(),
            regions: Vec::new(),
        };
        let html = volume_chart(&snapshot);
        assert!(html.contains("height:40%"));
        assert!(html.contains("height:100%"));
        assert!(!html.contains("250"));
    }
}
