//! Sidebar navigation.

use crate::route::Route;

/// Sidebar group a menu item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSection {
    Main,
    Tools,
    Settings,
}

impl MenuSection {
    pub const ALL: [Self; 3] = [Self::Main, Self::Tools, Self::Settings];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Main => "Principal",
            Self::Tools => "Ferramentas",
            Self::Settings => "Sistema",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub id: &'static str,
    pub label: &'static str,
    pub route: Route,
    pub badge: Option<u32>,
    pub section: MenuSection,
}

impl MenuItem {
    /// Whether this item should be highlighted for `active_path`.
    ///
    /// Exact match, or prefix match for any item not rooted at `/`.
    #[must_use]
    pub fn is_active(&self, active_path: &str) -> bool {
        let path = self.route.path();
        active_path == path || (path != "/" && active_path.starts_with(path))
    }
}

pub const MENU_ITEMS: [MenuItem; 9] = [
    MenuItem {
        id: "dashboard",
        label: "Dashboard",
        route: Route::Dashboard,
        badge: None,
        section: MenuSection::Main,
    },
    MenuItem {
        id: "environment",
        label: "Variáveis",
        route: Route::Environments,
        badge: Some(3),
        section: MenuSection::Main,
    },
    MenuItem {
        id: "users",
        label: "Usuários",
        route: Route::Users,
        badge: None,
        section: MenuSection::Main,
    },
    MenuItem {
        id: "analytics",
        label: "Analytics",
        route: Route::Analytics,
        badge: None,
        section: MenuSection::Main,
    },
    MenuItem {
        id: "logs",
        label: "Logs",
        route: Route::Logs,
        badge: None,
        section: MenuSection::Tools,
    },
    MenuItem {
        id: "database",
        label: "Database",
        route: Route::Database,
        badge: None,
        section: MenuSection::Tools,
    },
    MenuItem {
        id: "security",
        label: "Segurança",
        route: Route::Security,
        badge: None,
        section: MenuSection::Tools,
    },
    MenuItem {
        id: "settings",
        label: "Configurações",
        route: Route::Settings,
        badge: None,
        section: MenuSection::Settings,
    },
    MenuItem {
        id: "help",
        label: "Ajuda",
        route: Route::Help,
        badge: None,
        section: MenuSection::Settings,
    },
];

/// Menu items of one section, in declaration order.
pub fn section_items(section: MenuSection) -> impl Iterator<Item = &'static MenuItem> {
    MENU_ITEMS.iter().filter(move |item| item.section == section)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_partition_the_menu() {
        let total: usize = MenuSection::ALL.iter().map(|s| section_items(*s).count()).sum();
        assert_eq!(total, MENU_ITEMS.len());
        assert_eq!(section_items(MenuSection::Main).count(), 4);
        assert_eq!(section_items(MenuSection::Tools).count(), 3);
        assert_eq!(section_items(MenuSection::Settings).count(), 2);
    }

    #[test]
    fn exactly_one_item_is_active_per_page() {
        for route in Route::ALL.into_iter().filter(|r| r.layout() == crate::route::Layout::App) {
            let active: Vec<_> = MENU_ITEMS.iter().filter(|i| i.is_active(route.path())).collect();
            assert_eq!(active.len(), 1, "{route:?}");
            assert_eq!(active[0].route, route);
        }
    }

    #[test]
    fn prefix_match_covers_nested_paths() {
        let users = MENU_ITEMS[2];
        assert!(users.is_active("/users/invite"));
        assert!(!users.is_active("/logs"));
    }

    #[test]
    fn variables_item_carries_badge() {
        assert_eq!(MENU_ITEMS[1].badge, Some(3));
    }
}
