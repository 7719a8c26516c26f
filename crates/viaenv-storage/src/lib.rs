//! Data source abstraction for the `ViaEnv` dashboard.
//!
//! Pages never read datasets directly. They go through the
//! [`DashboardRepository`] trait so the built-in fixtures can be swapped for
//! another source without touching rendering code.
//!
//! Two implementations are provided:
//!
//! - [`MockRepository`] serves the built-in fixture set, the default
//! - [`FileRepository`] serves a JSON [`DashboardSnapshot`] from disk

mod error;
mod file;
mod fixtures;
mod mock;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use viaenv_core::model::{
    AllowlistRule, AnalyticsSnapshot, DatabaseConnection, Environment, EnvironmentVariable,
    HelpCategory, LogEntry, ProjectSettings, ScanReport, ServiceToken, Tab, User,
};

pub use error::RepositoryError;
pub use file::FileRepository;
pub use mock::MockRepository;

/// Every dataset the dashboard renders, as one serializable document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub environments: Vec<Environment>,
    pub variables: Vec<EnvironmentVariable>,
    pub users: Vec<User>,
    pub user_tabs: Vec<Tab>,
    pub logs: Vec<LogEntry>,
    pub log_tabs: Vec<Tab>,
    pub databases: Vec<DatabaseConnection>,
    pub database_tabs: Vec<Tab>,
    pub allowlist: Vec<AllowlistRule>,
    pub service_tokens: Vec<ServiceToken>,
    pub scan_report: ScanReport,
    pub analytics: AnalyticsSnapshot,
    pub help_categories: Vec<HelpCategory>,
    pub project: ProjectSettings,
}

impl DashboardSnapshot {
    /// Check the cross-references a page relies on.
    ///
    /// Returns a description of the first violation found.
    pub(crate) fn check(&self) -> Result<(), String> {
        let env_ids: HashSet<&str> = self.environments.iter().map(|e| e.id.as_str()).collect();
        if env_ids.len() != self.environments.len() {
            return Err("duplicate environment id".to_owned());
        }

        let mut var_ids = HashSet::new();
        for var in &self.variables {
            if !var_ids.insert(var.id.as_str()) {
                return Err(format!("duplicate variable id '{}'", var.id));
            }
            if !env_ids.contains(var.environment.as_str()) {
                return Err(format!(
                    "variable '{}' references unknown environment '{}'",
                    var.name, var.environment
                ));
            }
        }
        Ok(())
    }
}

/// Read access to every dataset the dashboard shows.
///
/// Collections come back in authored order; ordering for display is the
/// pipeline's job. Implementations must be safe to share across async
/// tasks (`Send + Sync`).
#[async_trait::async_trait]
pub trait DashboardRepository: Send + Sync + 'static {
    /// Deployment environments, in tab order.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the source cannot be read.
    async fn environments(&self) -> Result<Vec<Environment>, RepositoryError>;

    /// All variables across every environment.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the source cannot be read.
    async fn variables(&self) -> Result<Vec<EnvironmentVariable>, RepositoryError>;

    /// Look up one variable by id.
    ///
    /// Returns `Ok(None)` if no variable has that id. The default
    /// implementation scans [`variables`](DashboardRepository::variables).
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the source cannot be read.
    async fn variable(&self, id: &str) -> Result<Option<EnvironmentVariable>, RepositoryError> {
        Ok(self.variables().await?.into_iter().find(|v| v.id == id))
    }

    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the source cannot be read.
    async fn users(&self) -> Result<Vec<User>, RepositoryError>;

    /// Role tabs with their authored counts.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the source cannot be read.
    async fn user_tabs(&self) -> Result<Vec<Tab>, RepositoryError>;

    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the source cannot be read.
    async fn logs(&self) -> Result<Vec<LogEntry>, RepositoryError>;

    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the source cannot be read.
    async fn log_tabs(&self) -> Result<Vec<Tab>, RepositoryError>;

    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the source cannot be read.
    async fn databases(&self) -> Result<Vec<DatabaseConnection>, RepositoryError>;

    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the source cannot be read.
    async fn database_tabs(&self) -> Result<Vec<Tab>, RepositoryError>;

    /// IP allowlist rules.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the source cannot be read.
    async fn allowlist(&self) -> Result<Vec<AllowlistRule>, RepositoryError>;

    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the source cannot be read.
    async fn service_tokens(&self) -> Result<Vec<ServiceToken>, RepositoryError>;

    /// Result of the latest secret scan.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the source cannot be read.
    async fn scan_report(&self) -> Result<ScanReport, RepositoryError>;

    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the source cannot be read.
    async fn analytics(&self) -> Result<AnalyticsSnapshot, RepositoryError>;

    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the source cannot be read.
    async fn help_categories(&self) -> Result<Vec<HelpCategory>, RepositoryError>;

    /// General project settings.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the source cannot be read.
    async fn project(&self) -> Result<ProjectSettings, RepositoryError>;
}
