//! The canonical route table.
//!
//! One table maps each literal URL path to a page and the layout that wraps
//! it. There are no guards or redirects; a path that is not in the table is
//! simply unknown and the server answers it with its default 404.

/// The shell a page renders inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Bare centered card, no navigation chrome.
    Auth,
    /// Sidebar and header around the page outlet.
    App,
}

/// Every page the dashboard serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Environments,
    Users,
    Analytics,
    Logs,
    Database,
    Security,
    Settings,
    Help,
}

impl Route {
    /// All routes, auth pages first, then in sidebar order.
    pub const ALL: [Self; 11] = [
        Self::Login,
        Self::Register,
        Self::Dashboard,
        Self::Environments,
        Self::Users,
        Self::Analytics,
        Self::Logs,
        Self::Database,
        Self::Security,
        Self::Settings,
        Self::Help,
    ];

    /// Canonical path. The dashboard is also served at `/`.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
            Self::Environments => "/environments",
            Self::Users => "/users",
            Self::Analytics => "/analytics",
            Self::Logs => "/logs",
            Self::Database => "/database",
            Self::Security => "/security",
            Self::Settings => "/settings",
            Self::Help => "/help",
        }
    }

    /// Look up the page for a literal path. A single trailing slash is
    /// ignored; anything else must match exactly.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        if path == "/" {
            return Some(Self::Dashboard);
        }
        let trimmed = path.strip_suffix('/').unwrap_or(path);
        Self::ALL.into_iter().find(|r| r.path() == trimmed)
    }

    #[must_use]
    pub fn layout(self) -> Layout {
        match self {
            Self::Login | Self::Register => Layout::Auth,
            _ => Layout::App,
        }
    }

    /// Title shown in the browser tab and the page header.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Entrar",
            Self::Register => "Criar conta",
            Self::Dashboard => "Dashboard",
            Self::Environments => "Variáveis de Ambiente",
            Self::Users => "Gerenciar Usuários",
            Self::Analytics => "Analytics",
            Self::Logs => "Logs do Sistema",
            Self::Database => "Bancos de Dados",
            Self::Security => "Segurança",
            Self::Settings => "Configurações",
            Self::Help => "Central de Ajuda",
        }
    }
}

/// Header breadcrumb for a path: each segment capitalized, joined by
/// `" / "`. The root path reads `Dashboard`.
#[must_use]
pub fn breadcrumb(path: &str) -> String {
    let segments: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(capitalize)
        .collect();
    if segments.is_empty() {
        "Dashboard".to_owned()
    } else {
        segments.join(" / ")
    }
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_round_trips_through_its_path() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    #[test]
    fn root_is_dashboard() {
        assert_eq!(Route::from_path("/"), Some(Route::Dashboard));
    }

    #[test]
    fn unknown_paths_have_no_route() {
        assert_eq!(Route::from_path("/environment"), None);
        assert_eq!(Route::from_path("/users/1"), None);
        assert_eq!(Route::from_path(""), None);
    }

    #[test]
    fn trailing_slash_is_ignored() {
        assert_eq!(Route::from_path("/logs/"), Some(Route::Logs));
    }

    #[test]
    fn auth_pages_use_auth_layout() {
        assert_eq!(Route::Login.layout(), Layout::Auth);
        assert_eq!(Route::Register.layout(), Layout::Auth);
        assert_eq!(Route::Environments.layout(), Layout::App);
        assert_eq!(Route::Dashboard.layout(), Layout::App);
    }

    #[test]
    fn breadcrumb_capitalizes_segments() {
        assert_eq!(breadcrumb("/"), "Dashboard");
        assert_eq!(breadcrumb("/users"), "Users");
        assert_eq!(breadcrumb("/settings/billing"), "Settings / Billing");
    }
}
