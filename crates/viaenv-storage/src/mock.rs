//! Repository backed by the built-in fixture set.
//!
//! Fixtures are built once at construction and shared behind an `Arc`, so
//! cloning the repository is cheap and every clone sees the same data.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use viaenv_core::model::{
    AllowlistRule, AnalyticsSnapshot, DatabaseConnection, Environment, EnvironmentVariable,
    HelpCategory, LogEntry, ProjectSettings, ScanReport, ServiceToken, Tab, User,
};

use crate::{DashboardRepository, DashboardSnapshot, RepositoryError, fixtures};

/// Serves the built-in mock datasets.
#[derive(Debug, Clone)]
pub struct MockRepository {
    data: Arc<DashboardSnapshot>,
}

impl MockRepository {
    /// Build the fixtures relative to the current time.
    #[must_use]
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Build the fixtures relative to a fixed reference time.
    #[must_use]
    pub fn at(reference: DateTime<Utc>) -> Self {
        Self {
            data: Arc::new(fixtures::snapshot(reference)),
        }
    }

    /// The full fixture document, e.g. for exporting a starter JSON file.
    #[must_use]
    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.data
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DashboardRepository for MockRepository {
    async fn environments(&self) -> Result<Vec<Environment>, RepositoryError> {
        Ok(self.data.environments.clone())
    }

    async fn variables(&self) -> Result<Vec<EnvironmentVariable>, RepositoryError> {
        Ok(self.data.variables.clone())
    }

    async fn variable(&self, id: &str) -> Result<Option<EnvironmentVariable>, RepositoryError> {
        Ok(self.data.variables.iter().find(|v| v.id == id).cloned())
    }

    async fn users(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.data.users.clone())
    }

    async fn user_tabs(&self) -> Result<Vec<Tab>, RepositoryError> {
        Ok(self.data.user_tabs.clone())
    }

    async fn logs(&self) -> Result<Vec<LogEntry>, RepositoryError> {
        Ok(self.data.logs.clone())
    }

    async fn log_tabs(&self) -> Result<Vec<Tab>, RepositoryError> {
        Ok(self.data.log_tabs.clone())
    }

    async fn databases(&self) -> Result<Vec<DatabaseConnection>, RepositoryError> {
        Ok(self.data.databases.clone())
    }

    async fn database_tabs(&self) -> Result<Vec<Tab>, RepositoryError> {
        Ok(self.data.database_tabs.clone())
    }

    async fn allowlist(&self) -> Result<Vec<AllowlistRule>, RepositoryError> {
        Ok(self.data.allowlist.clone())
    }

    async fn service_tokens(&self) -> Result<Vec<ServiceToken>, RepositoryError> {
        Ok(self.data.service_tokens.clone())
    }

    async fn scan_report(&self) -> Result<ScanReport, RepositoryError> {
        Ok(self.data.scan_report.clone())
    }

    async fn analytics(&self) -> Result<AnalyticsSnapshot, RepositoryError> {
        Ok(self.data.analytics.clone())
    }

    async fn help_categories(&self) -> Result<Vec<HelpCategory>, RepositoryError> {
        Ok(self.data.help_categories.clone())
    }

    async fn project(&self) -> Result<ProjectSettings, RepositoryError> {
        Ok(self.data.project.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use viaenv_core::model::{DatabaseFamily, VariableType};
    use viaenv_core::pipeline::{SortOrder, ViewQuery, Selector, derive_view};

    use super::*;

    fn repo() -> MockRepository {
        MockRepository::at(Utc.with_ymd_and_hms(2025, 2, 14, 15, 20, 0).unwrap())
    }

    #[tokio::test]
    async fn fixtures_pass_their_own_checks() {
        assert_eq!(repo().snapshot().check(), Ok(()));
    }

    #[tokio::test]
    async fn five_variables_four_in_dev() {
        let vars = repo().variables().await.unwrap();
        assert_eq!(vars.len(), 5);
        let dev = derive_view(
            &vars,
            &ViewQuery::new(Selector::from_id("dev"), "", SortOrder::Name),
        );
        let names: Vec<&str> = dev.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["API_URL", "DATABASE_URL", "JWT_SECRET", "SENDGRID_API_KEY"]);
    }

    #[tokio::test]
    async fn jwt_search_finds_exactly_one() {
        let vars = repo().variables().await.unwrap();
        let hits = derive_view(&vars, &ViewQuery::new(Selector::All, "jwt", SortOrder::Name));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "JWT_SECRET");
    }

    #[tokio::test]
    async fn secrecy_is_independent_of_type() {
        let vars = repo().variables().await.unwrap();
        let api_url = vars.iter().find(|v| v.name == "API_URL").unwrap();
        assert_eq!(api_url.kind, VariableType::String);
        assert!(!api_url.is_secret);
        assert!(vars.iter().any(|v| v.kind != VariableType::Secret && v.is_secret));
    }

    #[tokio::test]
    async fn users_sort_by_name() {
        let users = repo().users().await.unwrap();
        let sorted = derive_view(&users, &ViewQuery::new(Selector::All, "", SortOrder::Name));
        let names: Vec<&str> = sorted.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Ana Júlia Souza",
                "Carlos Mendes",
                "Julia Roberts",
                "Marcos Paulo",
                "Roberto Firmino"
            ]
        );
    }

    #[tokio::test]
    async fn users_sort_by_recency_puts_invited_last() {
        let users = repo().users().await.unwrap();
        let sorted = derive_view(
            &users,
            &ViewQuery::new(Selector::All, "", SortOrder::RecentlyUpdated),
        );
        let names: Vec<&str> = sorted.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Carlos Mendes",
                "Ana Júlia Souza",
                "Marcos Paulo",
                "Julia Roberts",
                "Roberto Firmino"
            ]
        );
    }

    #[tokio::test]
    async fn environment_counts_are_authored() {
        let envs = repo().environments().await.unwrap();
        let counts: Vec<u32> = envs.iter().map(|e| e.count).collect();
        assert_eq!(counts, [12, 8, 15]);
    }

    #[tokio::test]
    async fn database_tabs_match_families() {
        let repo = repo();
        let dbs = repo.databases().await.unwrap();
        let sql = derive_view(&dbs, &ViewQuery::new(Selector::from_id("sql"), "", SortOrder::Insertion));
        assert_eq!(sql.len(), 2);
        assert!(sql.iter().all(|d| d.kind.family() == DatabaseFamily::Sql));
        let tabs = repo.database_tabs().await.unwrap();
        assert_eq!(tabs.len(), 3);
    }

    #[tokio::test]
    async fn variable_lookup_by_id() {
        let repo = repo();
        assert_eq!(repo.variable("3").await.unwrap().unwrap().name, "JWT_SECRET");
        assert!(repo.variable("99").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clone_shares_data() {
        let repo = repo();
        let clone = repo.clone();
        assert!(Arc::ptr_eq(&repo.data, &clone.data));
    }
}
