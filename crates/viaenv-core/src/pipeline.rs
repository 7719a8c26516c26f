//! Derived-view pipeline shared by every list page.
//!
//! A page hands over its full collection plus the UI-selected predicates
//! and gets back the exact ordered subset to render. The pipeline is pure:
//! it borrows the collection and never mutates it, so the same input always
//! yields the same output.
//!
//! Stages run in a fixed order:
//!
//! 1. **Group filter** keeps items whose group key equals the selector.
//! 2. **Search filter** keeps items where any searchable field contains
//!    the term, case-insensitively.
//! 3. **Sort** reorders survivors by the requested key. Insertion order is
//!    preserved when no key is given.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::ParseError;
use crate::model::{DatabaseConnection, EnvironmentVariable, HelpCategory, LogEntry, User};

/// Selector id that disables the group filter.
pub const ALL: &str = "all";

/// Items that can be matched against a free-text search term.
pub trait Searchable {
    /// The text fields the search term is matched against.
    fn search_fields(&self) -> Vec<&str>;
}

/// Items that belong to a tab group.
pub trait Grouped {
    /// The key compared with the active tab id.
    fn group(&self) -> &str;
}

/// Items that can be ordered by name or by recency.
pub trait Sortable {
    fn sort_name(&self) -> &str;

    /// Normalized instant of the last change, if one is known.
    fn updated_at(&self) -> Option<DateTime<Utc>>;
}

// ── Selector & sort key ──────────────────────────────────────────────

/// Which tab group is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selector {
    #[default]
    All,
    Group(String),
}

impl Selector {
    /// Parse a tab id. `all` and the empty string select everything.
    #[must_use]
    pub fn from_id(id: &str) -> Self {
        if id.is_empty() || id == ALL {
            Self::All
        } else {
            Self::Group(id.to_owned())
        }
    }

    /// The tab id this selector came from.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Group(id) => id,
        }
    }

    fn matches(&self, group: &str) -> bool {
        match self {
            Self::All => true,
            Self::Group(id) => id == group,
        }
    }
}

/// Requested ordering of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Keep the collection's own order.
    #[default]
    Insertion,
    /// Ascending by name, accent- and case-folded.
    Name,
    /// Most recent first; items without an instant go last.
    RecentlyUpdated,
}

impl SortOrder {
    /// Query-string value, `None` for insertion order.
    #[must_use]
    pub fn as_param(self) -> Option<&'static str> {
        match self {
            Self::Insertion => None,
            Self::Name => Some("name"),
            Self::RecentlyUpdated => Some("updated"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(Self::Insertion),
            "name" => Ok(Self::Name),
            "updated" => Ok(Self::RecentlyUpdated),
            _ => Err(ParseError::UnknownSort(s.to_owned())),
        }
    }
}

/// The UI-selected predicates for one render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub selector: Selector,
    pub search: String,
    pub sort: SortOrder,
}

impl ViewQuery {
    #[must_use]
    pub fn new(selector: Selector, search: impl Into<String>, sort: SortOrder) -> Self {
        Self {
            selector,
            search: search.into(),
            sort,
        }
    }
}

// ── Pipeline ─────────────────────────────────────────────────────────

/// Run the full pipeline over a grouped, sortable collection.
#[must_use]
pub fn derive_view<'a, T>(items: &'a [T], query: &ViewQuery) -> Vec<&'a T>
where
    T: Searchable + Grouped + Sortable,
{
    let needle = query.search.trim().to_lowercase();
    let mut out: Vec<&T> = items
        .iter()
        .filter(|item| query.selector.matches(item.group()))
        .filter(|item| matches_search(*item, &needle))
        .collect();
    sort_items(&mut out, query.sort);
    out
}

/// Search-only variant for collections without groups or sort keys.
#[must_use]
pub fn search<'a, T: Searchable>(items: &'a [T], term: &str) -> Vec<&'a T> {
    let needle = term.trim().to_lowercase();
    items
        .iter()
        .filter(|item| matches_search(*item, &needle))
        .collect()
}

fn matches_search<T: Searchable + ?Sized>(item: &T, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

fn sort_items<T: Sortable>(items: &mut [&T], order: SortOrder) {
    match order {
        SortOrder::Insertion => {}
        SortOrder::Name => items.sort_by(|a, b| compare_names(a.sort_name(), b.sort_name())),
        // Stable sort keeps insertion order among equal or missing instants.
        SortOrder::RecentlyUpdated => items.sort_by(|a, b| match (a.updated_at(), b.updated_at()) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
    }
}

/// Compare two names the way a reader expects: accents and case are folded
/// first, the raw string breaks ties so the order is total.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Lowercase `s` and strip diacritics from Latin letters.
#[must_use]
pub fn collation_key(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).map(fold_accent).collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

// ── Per-entity keys ──────────────────────────────────────────────────

impl Searchable for EnvironmentVariable {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(description) = &self.description {
            fields.push(description);
        }
        fields
    }
}

impl Grouped for EnvironmentVariable {
    fn group(&self) -> &str {
        &self.environment
    }
}

impl Sortable for EnvironmentVariable {
    fn sort_name(&self) -> &str {
        &self.name
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.last_updated.at
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.email]
    }
}

impl Grouped for User {
    fn group(&self) -> &str {
        self.role.as_str()
    }
}

impl Sortable for User {
    fn sort_name(&self) -> &str {
        &self.name
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.last_active.at
    }
}

impl Searchable for LogEntry {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.user, &self.action, &self.target]
    }
}

impl Grouped for LogEntry {
    fn group(&self) -> &str {
        self.kind.as_str()
    }
}

impl Sortable for LogEntry {
    fn sort_name(&self) -> &str {
        &self.target
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp.at
    }
}

impl Searchable for DatabaseConnection {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.host]
    }
}

impl Grouped for DatabaseConnection {
    fn group(&self) -> &str {
        self.kind.family().as_str()
    }
}

impl Sortable for DatabaseConnection {
    fn sort_name(&self) -> &str {
        &self.name
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        None
    }
}

impl Searchable for HelpCategory {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.description]
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::model::{Role, Timestamped, UserStatus, VariableType};

    fn var(id: &str, name: &str, env: &str, description: Option<&str>) -> EnvironmentVariable {
        EnvironmentVariable {
            id: id.to_owned(),
            name: name.to_owned(),
            value: "v".to_owned(),
            kind: VariableType::String,
            is_secret: false,
            environment: env.to_owned(),
            last_updated: Timestamped::label_only("agora"),
            created_by: "Admin".to_owned(),
            description: description.map(str::to_owned),
        }
    }

    fn user(name: &str, minutes_ago: Option<i64>) -> User {
        let base = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).single();
        User {
            id: name.to_owned(),
            name: name.to_owned(),
            email: format!("{}@empresa.com", name.to_lowercase().replace(' ', ".")),
            role: Role::Developer,
            status: UserStatus::Active,
            last_active: Timestamped {
                label: "x".to_owned(),
                at: minutes_ago.and_then(|m| base.map(|b| b - chrono::Duration::minutes(m))),
            },
            avatar_url: None,
        }
    }

    fn vars() -> Vec<EnvironmentVariable> {
        vec![
            var("1", "API_URL", "dev", Some("URL base da API")),
            var("2", "DATABASE_URL", "dev", None),
            var("3", "JWT_SECRET", "dev", Some("Chave de assinatura")),
            var("4", "STRIPE_KEY", "staging", None),
        ]
    }

    fn names<T: Sortable>(items: &[&T]) -> Vec<String> {
        items.iter().map(|i| i.sort_name().to_owned()).collect()
    }

    #[test]
    fn group_filter_keeps_selected_environment() {
        let items = vars();
        let query = ViewQuery::new(Selector::from_id("dev"), "", SortOrder::Insertion);
        let out = derive_view(&items, &query);
        assert_eq!(names(&out), ["API_URL", "DATABASE_URL", "JWT_SECRET"]);
    }

    #[test]
    fn all_selector_disables_group_filter() {
        let items = vars();
        let out = derive_view(&items, &ViewQuery::default());
        assert_eq!(out.len(), 4);
        assert_eq!(Selector::from_id("all"), Selector::All);
        assert_eq!(Selector::from_id(""), Selector::All);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let items = vars();
        let query = ViewQuery::new(Selector::All, "jwt", SortOrder::Insertion);
        assert_eq!(names(&derive_view(&items, &query)), ["JWT_SECRET"]);
    }

    #[test]
    fn search_matches_description() {
        let items = vars();
        let query = ViewQuery::new(Selector::All, "ASSINATURA", SortOrder::Insertion);
        assert_eq!(names(&derive_view(&items, &query)), ["JWT_SECRET"]);
    }

    #[test]
    fn search_and_group_combine() {
        let items = vars();
        let query = ViewQuery::new(Selector::from_id("staging"), "url", SortOrder::Insertion);
        assert!(derive_view(&items, &query).is_empty());
    }

    #[test]
    fn unmatched_search_yields_empty() {
        let items = vars();
        let query = ViewQuery::new(Selector::All, "zzz", SortOrder::Insertion);
        assert!(derive_view(&items, &query).is_empty());
    }

    #[test]
    fn name_sort_folds_accents_and_case() {
        let users = vec![
            user("Roberto Firmino", None),
            user("carlos Mendes", None),
            user("Ágata Lima", None),
            user("Ana Júlia Souza", None),
        ];
        let query = ViewQuery::new(Selector::All, "", SortOrder::Name);
        assert_eq!(
            names(&derive_view(&users, &query)),
            ["Ágata Lima", "Ana Júlia Souza", "carlos Mendes", "Roberto Firmino"]
        );
    }

    #[test]
    fn updated_sort_puts_recent_first_and_unknown_last() {
        let users = vec![
            user("A", Some(60)),
            user("B", None),
            user("C", Some(2)),
            user("D", Some(300)),
        ];
        let query = ViewQuery::new(Selector::All, "", SortOrder::RecentlyUpdated);
        assert_eq!(names(&derive_view(&users, &query)), ["C", "A", "D", "B"]);
    }

    #[test]
    fn pipeline_does_not_mutate_input() {
        let items = vars();
        let before = items.clone();
        let query = ViewQuery::new(Selector::All, "", SortOrder::Name);
        let _ = derive_view(&items, &query);
        assert_eq!(items, before);
    }

    #[test]
    fn sort_order_parses_query_values() {
        assert_eq!("name".parse::<SortOrder>(), Ok(SortOrder::Name));
        assert_eq!("Updated".parse::<SortOrder>(), Ok(SortOrder::RecentlyUpdated));
        assert_eq!("".parse::<SortOrder>(), Ok(SortOrder::Insertion));
        assert!("size".parse::<SortOrder>().is_err());
    }

    #[test]
    fn collation_key_strips_diacritics() {
        assert_eq!(collation_key("Júlia Ção"), "julia cao");
    }
}
