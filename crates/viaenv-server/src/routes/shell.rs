//! Page chrome and shared presentational pieces.
//!
//! Every page is server-rendered HTML with inline CSS. App pages go through
//! [`app_shell`] (sidebar, header, content outlet); the login and register
//! pages go through [`auth_shell`] (a bare centered card). Colors never
//! appear in the stylesheet: it reads the `:root` custom properties the
//! active [`Theme`] renders.

use std::time::Duration;

use viaenv_core::menu::{MenuSection, section_items};
use viaenv_core::model::Tab;
use viaenv_core::route::{Route, breadcrumb};
use viaenv_core::theme::{Theme, ThemeMode};

use crate::html::{Href, escape};

/// Inline SVG icons, drawn on a 24x24 stroke grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Gauge,
    Sliders,
    Users,
    Chart,
    History,
    Database,
    Shield,
    Cog,
    Help,
    Search,
    Eye,
    EyeOff,
    Copy,
    Check,
    Trash,
    Plus,
    Lock,
    Key,
    Terminal,
    Download,
    Mail,
    Edit,
    Clock,
    Globe,
    Robot,
    Info,
    Bolt,
    Moon,
    Sun,
    Server,
    Refresh,
    Alert,
    ArrowRight,
    Table,
    Grid,
}

impl Icon {
    fn paths(self) -> &'static str {
        match self {
            Self::Gauge => r#"<path d="M12 14l4-4"/><path d="M3.34 19a10 10 0 1117.32 0"/>"#,
            Self::Sliders => r#"<path d="M4 21v-7M4 10V3M12 21v-9M12 8V3M20 21v-5M20 12V3M1 14h6M9 8h6M17 16h6"/>"#,
            Self::Users => r#"<path d="M17 21v-2a4 4 0 00-4-4H5a4 4 0 00-4 4v2"/><circle cx="9" cy="7" r="4"/><path d="M23 21v-2a4 4 0 00-3-3.87M16 3.13a4 4 0 010 7.75"/>"#,
            Self::Chart => r#"<path d="M3 3v18h18"/><path d="M7 15l4-4 4 4 5-6"/>"#,
            Self::History => r#"<path d="M3 12a9 9 0 109-9 9.75 9.75 0 00-6.74 2.74L3 8"/><path d="M3 3v5h5M12 7v5l4 2"/>"#,
            Self::Database => r#"<ellipse cx="12" cy="5" rx="9" ry="3"/><path d="M21 12c0 1.66-4 3-9 3s-9-1.34-9-3"/><path d="M3 5v14c0 1.66 4 3 9 3s9-1.34 9-3V5"/>"#,
            Self::Shield => r#"<path d="M12 22s8-4 8-10V5l-8-3-8 3v7c0 6 8 10 8 10z"/>"#,
            Self::Cog => r#"<circle cx="12" cy="12" r="3"/><path d="M19.4 15a1.65 1.65 0 00.33 1.82l.06.06a2 2 0 11-2.83 2.83l-.06-.06a1.65 1.65 0 00-2.82 1.17V21a2 2 0 11-4 0v-.09a1.65 1.65 0 00-2.82-1.17l-.06.06a2 2 0 11-2.83-2.83l.06-.06A1.65 1.65 0 003 15.4 1.65 1.65 0 001.51 15H1a2 2 0 110-4h.09A1.65 1.65 0 002.26 8.2l-.06-.06a2 2 0 112.83-2.83l.06.06A1.65 1.65 0 008 3.6V3a2 2 0 114 0v.09a1.65 1.65 0 002.82 1.17l.06-.06a2 2 0 112.83 2.83l-.06.06A1.65 1.65 0 0021 8.6V9a2 2 0 110 4h-.09a1.65 1.65 0 00-1.51 1z"/>"#,
            Self::Help => r#"<circle cx="12" cy="12" r="10"/><path d="M9.09 9a3 3 0 015.83 1c0 2-3 3-3 3M12 17h.01"/>"#,
            Self::Search => r#"<circle cx="11" cy="11" r="8"/><path d="M21 21l-4.35-4.35"/>"#,
            Self::Eye => r#"<path d="M1 12s4-8 11-8 11 8 11 8-4 8-11 8-11-8-11-8z"/><circle cx="12" cy="12" r="3"/>"#,
            Self::EyeOff => r#"<path d="M17.94 17.94A10.07 10.07 0 0112 20c-7 0-11-8-11-8a18.45 18.45 0 015.06-5.94M9.9 4.24A9.12 9.12 0 0112 4c7 0 11 8 11 8a18.5 18.5 0 01-2.16 3.19M1 1l22 22"/>"#,
            Self::Copy => r#"<rect x="9" y="9" width="13" height="13" rx="2"/><path d="M5 15H4a2 2 0 01-2-2V4a2 2 0 012-2h9a2 2 0 012 2v1"/>"#,
            Self::Check => r#"<path d="M20 6L9 17l-5-5"/>"#,
            Self::Trash => r#"<path d="M3 6h18M19 6l-1 14a2 2 0 01-2 2H8a2 2 0 01-2-2L5 6M10 11v6M14 11v6M9 6V4a1 1 0 011-1h4a1 1 0 011 1v2"/>"#,
            Self::Plus => r#"<path d="M12 5v14M5 12h14"/>"#,
            Self::Lock => r#"<rect x="3" y="11" width="18" height="11" rx="2"/><path d="M7 11V7a5 5 0 0110 0v4"/>"#,
            Self::Key => r#"<path d="M21 2l-2 2m-7.61 7.61a5.5 5.5 0 11-7.78 7.78 5.5 5.5 0 017.78-7.78zm0 0L15.5 7.5m0 0l3 3L22 7l-3-3m-3.5 3.5L19 4"/>"#,
            Self::Terminal => r#"<path d="M4 17l6-6-6-6M12 19h8"/>"#,
            Self::Download => r#"<path d="M21 15v4a2 2 0 01-2 2H5a2 2 0 01-2-2v-4M7 10l5 5 5-5M12 15V3"/>"#,
            Self::Mail => r#"<rect x="2" y="4" width="20" height="16" rx="2"/><path d="M22 6l-10 7L2 6"/>"#,
            Self::Edit => r#"<path d="M11 4H4a2 2 0 00-2 2v14a2 2 0 002 2h14a2 2 0 002-2v-7"/><path d="M18.5 2.5a2.12 2.12 0 013 3L12 15l-4 1 1-4 9.5-9.5z"/>"#,
            Self::Clock => r#"<circle cx="12" cy="12" r="10"/><path d="M12 6v6l4 2"/>"#,
            Self::Globe => r#"<circle cx="12" cy="12" r="10"/><path d="M2 12h20M12 2a15.3 15.3 0 010 20M12 2a15.3 15.3 0 000 20"/>"#,
            Self::Robot => r#"<rect x="3" y="8" width="18" height="12" rx="2"/><path d="M12 8V4M8 14h.01M16 14h.01"/>"#,
            Self::Info => r#"<circle cx="12" cy="12" r="10"/><path d="M12 16v-4M12 8h.01"/>"#,
            Self::Bolt => r#"<path d="M13 2L3 14h9l-1 8 10-12h-9l1-8z"/>"#,
            Self::Moon => r#"<path d="M21 12.79A9 9 0 1111.21 3 7 7 0 0021 12.79z"/>"#,
            Self::Sun => r#"<circle cx="12" cy="12" r="5"/><path d="M12 1v2M12 21v2M4.22 4.22l1.42 1.42M18.36 18.36l1.42 1.42M1 12h2M21 12h2M4.22 19.78l1.42-1.42M18.36 5.64l1.42-1.42"/>"#,
            Self::Server => r#"<rect x="2" y="2" width="20" height="8" rx="2"/><rect x="2" y="14" width="20" height="8" rx="2"/><path d="M6 6h.01M6 18h.01"/>"#,
            Self::Refresh => r#"<path d="M23 4v6h-6M1 20v-6h6"/><path d="M3.51 9a9 9 0 0114.85-3.36L23 10M1 14l4.64 4.36A9 9 0 0020.49 15"/>"#,
            Self::Alert => r#"<circle cx="12" cy="12" r="10"/><path d="M12 8v4M12 16h.01"/>"#,
            Self::ArrowRight => r#"<path d="M5 12h14M12 5l7 7-7 7"/>"#,
            Self::Table => r#"<path d="M3 3h18v18H3zM3 9h18M3 15h18M9 3v18"/>"#,
            Self::Grid => r#"<rect x="3" y="3" width="7" height="7" rx="1"/><rect x="14" y="3" width="7" height="7" rx="1"/><rect x="3" y="14" width="7" height="7" rx="1"/><rect x="14" y="14" width="7" height="7" rx="1"/>"#,
        }
    }

    /// The full `<svg>` element.
    #[must_use]
    pub fn svg(self) -> String {
        let mut s = String::with_capacity(256);
        s.push_str(r#"<svg class="icon" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">"#);
        s.push_str(self.paths());
        s.push_str("</svg>");
        s
    }
}

fn menu_icon(route: Route) -> Icon {
    match route {
        Route::Dashboard => Icon::Gauge,
        Route::Environments => Icon::Sliders,
        Route::Users => Icon::Users,
        Route::Analytics => Icon::Chart,
        Route::Logs => Icon::History,
        Route::Database => Icon::Database,
        Route::Security => Icon::Shield,
        Route::Settings => Icon::Cog,
        Route::Help | Route::Login | Route::Register => Icon::Help,
    }
}

// ── Shells ───────────────────────────────────────────────────────────

fn head(html: &mut String, theme: &Theme, title: &str) {
    html.push_str("<!DOCTYPE html>\n<html lang=\"pt-BR\" data-theme=\"");
    html.push_str(theme.mode.as_str());
    html.push_str("\"><head><meta charset=\"utf-8\"/><meta name=\"viewport\" content=\"width=device-width,initial-scale=1\"/><title>");
    html.push_str(&escape(title));
    html.push_str(" · ViaEnv</title>\n<style>\n");
    html.push_str(&theme.css_variables());
    html.push_str(APP_CSS);
    html.push_str("</style></head>\n");
}

/// Render the app shell with sidebar, header, and page content.
///
/// `path` is the request path as typed; it drives the breadcrumb. The
/// active sidebar item is derived from the route's canonical path so `/`
/// highlights the dashboard. `copy_feedback` is how long a copy badge
/// lives; the page script reloads after it so a cleared badge disappears.
#[must_use]
pub fn app_shell(theme: &Theme, copy_feedback: Duration, route: Route, path: &str, content: &str) -> String {
    let active_path = route.path();

    let mut html = String::with_capacity(16384 + content.len());
    head(&mut html, theme, route.title());
    html.push_str("<body class=\"app\" data-copy-feedback-ms=\"");
    html.push_str(&copy_feedback.as_millis().to_string());
    html.push_str("\">\n");

    // Sidebar
    html.push_str(r#"<aside class="sidebar"><div class="sidebar-logo"><span class="logo-icon">"#);
    html.push_str(&Icon::Bolt.svg());
    html.push_str(r#"</span>EnvControl</div><nav class="sidebar-nav">"#);
    for section in MenuSection::ALL {
        html.push_str(r#"<div class="sidebar-section"><div class="sidebar-section-label">"#);
        html.push_str(section.label());
        html.push_str("</div>");
        for item in section_items(section) {
            let active = item.is_active(active_path);
            html.push_str("<a href=\"");
            html.push_str(item.route.path());
            html.push_str("\" class=\"sidebar-link");
            if active {
                html.push_str(" active\" aria-current=\"page");
            }
            html.push_str("\" data-menu=\"");
            html.push_str(item.id);
            html.push_str("\">");
            html.push_str(&menu_icon(item.route).svg());
            html.push_str("<span>");
            html.push_str(item.label);
            html.push_str("</span>");
            if let Some(badge) = item.badge {
                html.push_str("<span class=\"sidebar-badge\">");
                html.push_str(&badge.to_string());
                html.push_str("</span>");
            }
            html.push_str("</a>");
        }
        html.push_str("</div>");
    }
    html.push_str(r#"</nav><div class="sidebar-footer"><span class="avatar">AD</span><div class="user-details"><strong>Admin User</strong><span>admin@envcontrol.com</span></div></div></aside>"#);

    // Header
    html.push_str(r#"<div class="main"><header class="topbar"><div class="breadcrumb"><span>Via Env</span> / "#);
    html.push_str(&escape(&breadcrumb(path)));
    html.push_str(r#"</div><div class="topbar-actions"><span class="theme-indicator" title="Tema">"#);
    html.push_str(&match theme.mode {
        ThemeMode::Light => Icon::Moon.svg(),
        ThemeMode::Dark => Icon::Sun.svg(),
    });
    html.push_str(theme.mode.as_str());
    html.push_str(r#"</span><span class="user-chip"><span class="avatar">AD</span>Admin</span></div></header><div class="content">"#);
    html.push_str(content);
    html.push_str("</div></div>\n");
    html.push_str(COPY_SCRIPT);
    html.push_str("\n</body>\n</html>");
    html
}

/// Render the auth shell (no sidebar, standalone centered page).
#[must_use]
pub fn auth_shell(theme: &Theme, route: Route, content: &str) -> String {
    let mut html = String::with_capacity(8192 + content.len());
    head(&mut html, theme, route.title());
    html.push_str("<body class=\"auth\">\n<main class=\"auth-card\">");
    html.push_str(content);
    html.push_str("</main>\n</body>\n</html>");
    html
}

// ── Components ───────────────────────────────────────────────────────

/// The primary button in a page header. Submits a POST to `action`.
#[derive(Debug, Clone, Copy)]
pub struct HeaderAction<'a> {
    pub label: &'a str,
    pub action: &'a str,
    pub icon: Icon,
}

#[must_use]
pub fn page_header(title: &str, description: &str, action: Option<HeaderAction<'_>>) -> String {
    let mut s = String::with_capacity(512);
    s.push_str(r#"<div class="page-header"><div><h1 class="page-title">"#);
    s.push_str(&escape(title));
    s.push_str(r#"</h1><p class="page-subtitle">"#);
    s.push_str(&escape(description));
    s.push_str("</p></div>");
    if let Some(action) = action {
        s.push_str(&post_button(action.action, "btn btn-primary", action.icon, action.label));
    }
    s.push_str("</div>");
    s
}

/// A tab strip. `link` builds the URL that activates a tab.
#[must_use]
pub fn tabs(tabs: &[Tab], active: &str, link: impl Fn(&Tab) -> Href) -> String {
    let mut s = String::with_capacity(256 * tabs.len());
    s.push_str(r#"<nav class="tabs">"#);
    for tab in tabs {
        s.push_str("<a class=\"tab");
        if tab.id == active {
            s.push_str(" active");
        }
        s.push_str("\" href=\"");
        s.push_str(&link(tab).attr());
        s.push_str("\">");
        if let Some(color) = &tab.color {
            s.push_str("<span class=\"dot\" style=\"background:");
            s.push_str(&escape(color));
            s.push_str("\"></span>");
        }
        s.push_str(&escape(&tab.name));
        if let Some(count) = tab.count {
            s.push_str("<span class=\"count\">");
            s.push_str(&count.to_string());
            s.push_str("</span>");
        }
        s.push_str("</a>");
    }
    s.push_str("</nav>");
    s
}

/// A GET search form. `keep` carries the rest of the page state as
/// hidden fields so searching does not reset the tab or sort.
#[must_use]
pub fn search_bar(action: &str, placeholder: &str, term: &str, keep: &[(&str, &str)]) -> String {
    let mut s = String::with_capacity(512);
    s.push_str(r#"<form class="search" method="get" action=""#);
    s.push_str(action);
    s.push_str("\">");
    s.push_str(&Icon::Search.svg());
    for (name, value) in keep.iter().filter(|(_, v)| !v.is_empty()) {
        s.push_str("<input type=\"hidden\" name=\"");
        s.push_str(name);
        s.push_str("\" value=\"");
        s.push_str(&escape(value));
        s.push_str("\"/>");
    }
    s.push_str(r#"<input type="search" name="q" placeholder=""#);
    s.push_str(&escape(placeholder));
    s.push_str("\" value=\"");
    s.push_str(&escape(term));
    s.push_str("\"/></form>");
    s
}

#[must_use]
pub fn empty_state(message: &str) -> String {
    let mut s = String::with_capacity(128);
    s.push_str(r#"<div class="empty-state">"#);
    s.push_str(&escape(message));
    s.push_str("</div>");
    s
}

/// A one-button form posting to `action`.
#[must_use]
pub fn post_button(action: &str, class: &str, icon: Icon, label: &str) -> String {
    let mut s = String::with_capacity(512);
    s.push_str(r#"<form class="inline" method="post" action=""#);
    s.push_str(action);
    s.push_str("\"><button type=\"submit\" class=\"");
    s.push_str(class);
    s.push_str("\" title=\"");
    s.push_str(&escape(label));
    s.push_str("\">");
    s.push_str(&icon.svg());
    if !class.contains("icon-btn") {
        s.push_str(&escape(label));
    }
    s.push_str("</button></form>");
    s
}

/// The copy button. Without script it posts and the page comes back with
/// the badge; with script the value is fetched into the clipboard first.
#[must_use]
pub fn copy_button(action: &Href, copied: bool) -> String {
    let mut s = String::with_capacity(512);
    s.push_str(r#"<form class="inline" method="post" data-copy action=""#);
    s.push_str(&action.attr());
    s.push_str("\"><button type=\"submit\" class=\"icon-btn");
    if copied {
        s.push_str(" copied\" title=\"Copiado!\">");
        s.push_str(&Icon::Check.svg());
    } else {
        s.push_str("\" title=\"Copiar\">");
        s.push_str(&Icon::Copy.svg());
    }
    s.push_str("</button></form>");
    s
}

/// Writes copied values to the clipboard, then reloads so the server's
/// badge shows. While a badge is showing, reloads again once the body's
/// copy delay has passed; the server has cleared the badge by then.
const COPY_SCRIPT: &str = r##"
<script>
(function(){
  document.querySelectorAll('form[data-copy]').forEach(function(f){
    f.addEventListener('submit',function(e){
      if(!navigator.clipboard||!window.fetch)return;
      e.preventDefault();
      fetch(f.action,{method:'POST',headers:{'Accept':'text/plain'},credentials:'same-origin'})
        .then(function(r){if(!r.ok)throw new Error('copy');return r.text()})
        .then(function(t){return navigator.clipboard.writeText(t)})
        .catch(function(){})
        .then(function(){window.location.reload()});
    });
  });
  if(document.querySelector('.copied')){
    var ms=parseInt(document.body.getAttribute('data-copy-feedback-ms'),10);
    setTimeout(function(){window.location.reload()},isNaN(ms)?0:ms);
  }
})();
</script>
"##;

/// Stylesheet shared by both shells. Reads the theme's custom properties.
const APP_CSS: &str = r##"
*,*::before,*::after{box-sizing:border-box;margin:0;padding:0}
body{font-family:Inter,-apple-system,BlinkMacSystemFont,'Segoe UI',sans-serif;font-size:var(--font-md);background:var(--color-bg);color:var(--color-text);line-height:1.5;-webkit-font-smoothing:antialiased}
a{color:var(--color-primary);text-decoration:none}
code,.mono{font-family:'IBM Plex Mono','SF Mono',Consolas,monospace;font-size:var(--font-sm)}
.icon{width:16px;height:16px;flex-shrink:0}
form.inline{display:inline}
body.app{display:flex;min-height:100vh}
.sidebar{width:var(--sidebar-width);background:var(--color-bg-card);border-right:1px solid var(--color-border);display:flex;flex-direction:column;position:fixed;top:0;left:0;bottom:0;overflow-y:auto;transition:width var(--sidebar-transition)}
.sidebar-logo{display:flex;align-items:center;gap:var(--space-sm);height:var(--header-height);padding:0 var(--space-lg);font-size:var(--font-xl);font-weight:var(--weight-bold)}
.logo-icon{display:inline-flex;align-items:center;justify-content:center;width:36px;height:36px;border-radius:var(--radius-sm);background:var(--gradient-primary);color:var(--color-text-inverted)}
.sidebar-nav{flex:1;padding:var(--space-md)}
.sidebar-section{margin-bottom:var(--space-lg)}
.sidebar-section-label{font-size:var(--font-xs);font-weight:var(--weight-bold);text-transform:uppercase;letter-spacing:1px;color:var(--color-text-light);padding:0 var(--space-sm);margin-bottom:var(--space-sm)}
.sidebar-link{display:flex;align-items:center;gap:var(--space-sm);padding:10px var(--space-sm);border-radius:var(--radius-sm);color:var(--color-text-secondary);font-weight:var(--weight-medium);transition:background var(--transition-fast)}
.sidebar-link:hover{background:var(--color-bg-light)}
.sidebar-link.active{background:var(--color-primary-extra-light);color:var(--color-primary);font-weight:var(--weight-semibold)}
.sidebar-badge{margin-left:auto;background:var(--color-primary);color:var(--color-text-inverted);font-size:var(--font-xs);border-radius:var(--radius-pill);padding:1px 8px}
.sidebar-footer{display:flex;align-items:center;gap:var(--space-sm);padding:var(--space-md) var(--space-lg);border-top:1px solid var(--color-border)}
.user-details{display:flex;flex-direction:column;font-size:var(--font-sm)}
.user-details span{color:var(--color-text-secondary)}
.avatar{display:inline-flex;align-items:center;justify-content:center;width:36px;height:36px;border-radius:var(--radius-round);background:var(--color-primary-extra-light);color:var(--color-primary);font-weight:var(--weight-bold);font-size:var(--font-sm);overflow:hidden}
.avatar img{width:100%;height:100%;object-fit:cover}
.main{margin-left:var(--sidebar-width);flex:1;min-width:0}
.topbar{display:flex;align-items:center;justify-content:space-between;height:var(--header-height);padding:0 var(--space-xl);background:var(--color-bg-card);border-bottom:1px solid var(--color-border);position:sticky;top:0;z-index:10}
.breadcrumb{color:var(--color-text-secondary)}
.breadcrumb span{color:var(--color-text-light)}
.topbar-actions{display:flex;align-items:center;gap:var(--space-md)}
.theme-indicator,.user-chip{display:inline-flex;align-items:center;gap:var(--space-xs);color:var(--color-text-secondary);font-size:var(--font-sm)}
.content{padding:var(--space-xl);max-width:var(--content-max-width)}
.page-header{display:flex;align-items:flex-start;justify-content:space-between;gap:var(--space-md);margin-bottom:var(--space-lg)}
.page-title{font-size:var(--font-xxl);font-weight:var(--weight-bold)}
.page-subtitle{color:var(--color-text-secondary);margin-top:var(--space-xs)}
.tabs{display:flex;gap:var(--space-xs);border-bottom:1px solid var(--color-border);margin-bottom:var(--space-lg);overflow-x:auto}
.tab{display:inline-flex;align-items:center;gap:var(--space-sm);padding:var(--space-sm) var(--space-md);color:var(--color-text-secondary);border-bottom:2px solid transparent;font-weight:var(--weight-medium);white-space:nowrap}
.tab.active{color:var(--color-primary);border-bottom-color:var(--color-primary)}
.tab .dot{width:8px;height:8px;border-radius:var(--radius-round)}
.tab .count{background:var(--color-bg-light);border-radius:var(--radius-pill);padding:0 8px;font-size:var(--font-xs)}
.action-bar{display:flex;align-items:center;justify-content:space-between;gap:var(--space-md);margin-bottom:var(--space-md);flex-wrap:wrap}
.search{display:flex;align-items:center;gap:var(--space-sm);background:var(--color-input-bg);border:1px solid var(--color-border);border-radius:var(--radius-sm);padding:0 var(--space-md);min-width:320px;color:var(--color-text-light)}
.search input{border:none;background:transparent;padding:10px 0;width:100%;color:var(--color-text);font:inherit;outline:none}
.search input::placeholder,.input::placeholder{color:var(--color-placeholder)}
.card{background:var(--color-bg-card);border:1px solid var(--color-border);border-radius:var(--radius-md);box-shadow:var(--shadow-sm);margin-bottom:var(--space-lg);overflow:hidden}
.card-header{display:flex;align-items:center;justify-content:space-between;gap:var(--space-md);padding:var(--space-md) var(--space-lg);border-bottom:1px solid var(--color-border-light)}
.card-header p{color:var(--color-text-secondary);font-size:var(--font-sm)}
.card-body{padding:var(--space-lg)}
.card-footer{display:flex;justify-content:flex-end;gap:var(--space-sm);padding:var(--space-md) var(--space-lg);border-top:1px solid var(--color-border-light)}
.table{width:100%;border-collapse:collapse}
.table th{text-align:left;font-size:var(--font-xs);text-transform:uppercase;letter-spacing:.5px;color:var(--color-text-secondary);padding:var(--space-sm) var(--space-md);background:var(--color-bg-light);border-bottom:1px solid var(--color-border)}
.table td{padding:var(--space-md);border-bottom:1px solid var(--color-border-light);vertical-align:middle}
.table tr:last-child td{border-bottom:none}
.table tr:hover td{background:var(--color-bg-light)}
.cell-stack{display:flex;flex-direction:column}
.cell-stack .sub{color:var(--color-text-secondary);font-size:var(--font-sm)}
.cell-row{display:flex;align-items:center;gap:var(--space-sm)}
.type-icon{display:inline-flex;align-items:center;justify-content:center;width:32px;height:32px;border-radius:var(--radius-sm);background:var(--color-bg-light);color:var(--color-text-secondary)}
.type-icon.secret{color:var(--color-error)}.type-icon.database{color:var(--color-primary)}.type-icon.api_key{color:var(--color-warning)}
.value-box{display:flex;align-items:center;justify-content:space-between;gap:var(--space-sm);background:var(--color-bg-light);border-radius:var(--radius-xs);padding:var(--space-xs) var(--space-sm);max-width:360px}
.value-box .value-text{overflow:hidden;text-overflow:ellipsis;white-space:nowrap}
.value-box.masked .value-text{letter-spacing:2px;color:var(--color-text-light)}
.icon-btn{display:inline-flex;align-items:center;justify-content:center;width:30px;height:30px;border:none;border-radius:var(--radius-xs);background:transparent;color:var(--color-text-secondary);cursor:pointer}
.icon-btn:hover{background:var(--color-bg-dark)}
.icon-btn.copied{color:var(--color-success)}
.icon-btn.danger:hover{color:var(--color-error)}
.btn{display:inline-flex;align-items:center;gap:var(--space-sm);padding:10px var(--space-md);border-radius:var(--radius-sm);font:inherit;font-weight:var(--weight-semibold);border:1px solid transparent;cursor:pointer;transition:all var(--transition-fast)}
.btn-primary{background:var(--color-primary);color:var(--color-text-inverted)}
.btn-primary:hover{background:var(--color-primary-dark)}
.btn-secondary{background:var(--color-bg-card);border-color:var(--color-border);color:var(--color-text)}
.btn-danger{background:var(--color-error);color:var(--color-text-inverted)}
.btn:disabled{background:var(--color-disabled);color:var(--color-text-light);cursor:not-allowed}
.btn-block{width:100%;justify-content:center}
.badge{display:inline-flex;align-items:center;gap:var(--space-xs);padding:2px 10px;border-radius:var(--radius-pill);font-size:var(--font-xs);font-weight:var(--weight-semibold);background:var(--color-bg-light);color:var(--color-text-secondary)}
.badge-success{color:var(--color-success)}.badge-warning{color:var(--color-warning)}.badge-error{color:var(--color-error)}.badge-info{color:var(--color-info)}.badge-primary{color:var(--color-primary)}
.status{display:inline-flex;align-items:center;gap:var(--space-xs)}
.status .dot{width:8px;height:8px;border-radius:var(--radius-round);background:var(--color-success)}
.status.invited .dot{background:var(--color-warning)}
.empty-state{padding:var(--space-xxl);text-align:center;color:var(--color-text-secondary)}
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(320px,1fr));gap:var(--space-lg)}
.stat-grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(220px,1fr));gap:var(--space-lg);margin-bottom:var(--space-lg)}
.stat-card{background:var(--color-bg-card);border:1px solid var(--color-border);border-radius:var(--radius-md);padding:var(--space-lg);box-shadow:var(--shadow-sm)}
.stat-card .label{color:var(--color-text-secondary);font-size:var(--font-sm)}
.stat-card .value{font-size:var(--font-xxxl);font-weight:var(--weight-bold)}
.stat-head{display:flex;justify-content:space-between;align-items:center;margin-bottom:var(--space-md)}
.icon-box{display:inline-flex;align-items:center;justify-content:center;width:40px;height:40px;border-radius:var(--radius-sm);background:var(--color-bg-light)}
.trend-up{color:var(--color-success)}.trend-down{color:var(--color-error)}.trend-neutral{color:var(--color-text-secondary)}
.bars{display:flex;align-items:flex-end;gap:var(--space-sm);height:200px;padding:var(--space-md) 0}
.bars .bar{flex:1;background:var(--gradient-primary);border-radius:var(--radius-xs) var(--radius-xs) 0 0}
.axis{display:flex;justify-content:space-between;color:var(--color-text-light);font-size:var(--font-sm)}
.list-item{display:flex;align-items:center;justify-content:space-between;gap:var(--space-md);padding:var(--space-md) var(--space-lg);border-bottom:1px solid var(--color-border-light)}
.list-item:last-child{border-bottom:none}
.meta{display:flex;align-items:center;gap:var(--space-md);color:var(--color-text-secondary);font-size:var(--font-sm)}
.alert{display:flex;align-items:center;gap:var(--space-md);padding:var(--space-md) var(--space-lg);border-radius:var(--radius-md);background:var(--color-primary-extra-light);margin-bottom:var(--space-lg)}
.alert .grow,.grow{flex:1}
.alert-error{background:var(--color-bg-light);color:var(--color-error);border:1px solid var(--color-error)}
.form-row{display:flex;gap:var(--space-sm);padding:var(--space-md) var(--space-lg);border-bottom:1px solid var(--color-border-light)}
.form-group{margin-bottom:var(--space-md)}
.form-label{display:block;font-weight:var(--weight-semibold);margin-bottom:var(--space-xs)}
.input{width:100%;padding:10px var(--space-md);border:1px solid var(--color-border);border-radius:var(--radius-sm);background:var(--color-input-bg);color:var(--color-text);font:inherit}
.input:disabled{background:var(--color-bg-light);color:var(--color-text-secondary)}
.input-group{display:flex;gap:var(--space-sm);align-items:center}
.hint{font-size:var(--font-sm);color:var(--color-text-light);margin-top:var(--space-xs)}
.checkbox-group{display:flex;flex-direction:column;gap:var(--space-sm)}
.danger-zone{display:flex;align-items:center;justify-content:space-between;gap:var(--space-md);border:1px solid var(--color-error);border-radius:var(--radius-md);padding:var(--space-lg)}
.danger-zone h3{color:var(--color-error)}
.db-icon{display:inline-flex;align-items:center;justify-content:center;width:44px;height:44px;border-radius:var(--radius-sm);color:#fff}
.rotation{display:flex;justify-content:space-around;background:var(--color-bg-light);border-radius:var(--radius-sm);padding:var(--space-md);margin-top:var(--space-md)}
.rotation .stat{display:flex;flex-direction:column;align-items:center}
.view-toggle{display:inline-flex;gap:var(--space-xs)}
.view-toggle a.active{color:var(--color-primary)}
.var-card .card-body{display:flex;flex-direction:column;gap:var(--space-sm)}
.hero{text-align:center;padding:var(--space-xxl) var(--space-lg);background:var(--gradient-primary);color:var(--color-text-inverted);border-radius:var(--radius-lg);margin-bottom:var(--space-lg)}
.hero .search{margin:var(--space-lg) auto 0;max-width:560px;background:var(--color-bg-card)}
.category-icon{display:inline-flex;align-items:center;justify-content:center;width:44px;height:44px;border-radius:var(--radius-sm);margin-bottom:var(--space-md);color:#fff}
body.auth{display:flex;align-items:center;justify-content:center;min-height:100vh;background:var(--color-bg-light);padding:var(--space-lg)}
.auth-card{width:100%;max-width:440px;background:var(--color-bg-card);border:1px solid var(--color-border);border-radius:var(--radius-lg);box-shadow:var(--shadow-lg);padding:var(--space-xxl) var(--space-xl)}
.auth-card h1{font-size:var(--font-xxl);margin:var(--space-lg) 0 var(--space-xs)}
.auth-card .lead{color:var(--color-text-secondary);margin-bottom:var(--space-lg)}
.brand{display:flex;align-items:center;gap:var(--space-sm);font-weight:var(--weight-bold);font-size:var(--font-xl)}
.socials{display:grid;grid-template-columns:1fr 1fr;gap:var(--space-sm);margin-bottom:var(--space-md)}
.divider{text-align:center;color:var(--color-text-light);font-size:var(--font-sm);margin:var(--space-md) 0}
.strength{display:flex;align-items:center;gap:var(--space-xs);margin-top:var(--space-xs)}
.strength .bar{flex:1;height:4px;border-radius:var(--radius-pill);background:var(--color-border)}
.strength .bar.active{background:var(--color-warning)}
.strength span{font-size:var(--font-xs);color:var(--color-text-secondary);margin-left:var(--space-sm)}
.auth-footer{text-align:center;margin-top:var(--space-lg);color:var(--color-text-secondary)}
.dot{display:inline-block;width:8px;height:8px;border-radius:50%}
a.card{display:block;color:inherit;text-decoration:none}
.benefits{list-style:none;margin-top:var(--space-lg);display:grid;gap:var(--space-sm);color:var(--color-text-secondary)}
.benefits li{display:flex;align-items:center;gap:var(--space-sm)}
@media(max-width:900px){.main{margin-left:0}.sidebar{display:none}}
"##;

#[cfg(test)]
mod tests {
    use viaenv_core::theme::{DARK, LIGHT};
    use viaenv_core::view::COPY_FEEDBACK_DELAY;

    use super::*;

    #[test]
    fn app_shell_marks_exactly_one_active_item() {
        let html = app_shell(&LIGHT, COPY_FEEDBACK_DELAY, Route::Users, "/users", "<p>x</p>");
        assert_eq!(html.matches("sidebar-link active").count(), 1);
        assert!(html.contains("data-menu=\"users\""));
        assert!(html.contains("<span>Via Env</span> / Users"));
    }

    #[test]
    fn root_path_highlights_dashboard() {
        let html = app_shell(&LIGHT, COPY_FEEDBACK_DELAY, Route::Dashboard, "/", "");
        let active = html.find("sidebar-link active").unwrap_or(usize::MAX);
        let dashboard = html.find("data-menu=\"dashboard\"").unwrap_or(0);
        assert!(active < dashboard);
        assert!(html.contains("<span>Via Env</span> / Dashboard"));
    }

    #[test]
    fn app_shell_carries_copy_delay_for_the_script() {
        let html = app_shell(&LIGHT, Duration::from_millis(500), Route::Environments, "/environments", "");
        assert!(html.contains("data-copy-feedback-ms=\"500\""));
        assert!(html.contains("window.location.reload()},isNaN(ms)?0:ms)"));
        assert!(!html.contains("2000"));
    }

    #[test]
    fn auth_shell_has_no_sidebar() {
        let html = auth_shell(&LIGHT, Route::Login, "<form></form>");
        assert!(!html.contains("class=\"sidebar\""));
        assert!(html.contains("<title>Entrar · ViaEnv</title>"));
    }

    #[test]
    fn shells_embed_theme_tokens() {
        let html = auth_shell(&DARK, Route::Register, "");
        assert!(html.contains("data-theme=\"dark\""));
        assert!(html.contains(&DARK.css_variables()));
    }

    #[test]
    fn tabs_render_dot_and_count() {
        let tab = Tab {
            id: "dev".to_owned(),
            name: "Development".to_owned(),
            color: Some("#10B981".to_owned()),
            count: Some(12),
        };
        let html = tabs(&[tab], "dev", |t| Href::new("/environments").set("tab", Some(&t.id)));
        assert!(html.contains("class=\"tab active\""));
        assert!(html.contains("background:#10B981"));
        assert!(html.contains("<span class=\"count\">12</span>"));
    }

    #[test]
    fn search_bar_keeps_state_and_escapes_term() {
        let html = search_bar("/users", "Buscar", "<b>", &[("tab", "admin"), ("sort", "")]);
        assert!(html.contains("name=\"tab\" value=\"admin\""));
        assert!(!html.contains("name=\"sort\""));
        assert!(html.contains("value=\"&lt;b&gt;\""));
    }
}
