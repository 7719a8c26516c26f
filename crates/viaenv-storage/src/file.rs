//! Repository backed by a JSON snapshot on disk.
//!
//! The file is re-read on every call, so edits show up on the next page
//! load without a restart. [`FileRepository::open`] reads it once up front
//! so a broken file fails startup instead of the first request.

use std::path::{Path, PathBuf};

use viaenv_core::model::{
    AllowlistRule, AnalyticsSnapshot, DatabaseConnection, Environment, EnvironmentVariable,
    HelpCategory, LogEntry, ProjectSettings, ScanReport, ServiceToken, Tab, User,
};

use crate::{DashboardRepository, DashboardSnapshot, RepositoryError};

/// Serves datasets from a [`DashboardSnapshot`] JSON file.
#[derive(Debug, Clone)]
pub struct FileRepository {
    path: PathBuf,
}

impl FileRepository {
    /// Open the snapshot at `path` and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Read`] if the file cannot be read,
    /// [`RepositoryError::Parse`] if it is not a valid snapshot, and
    /// [`RepositoryError::Invalid`] if its cross-references are broken.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let repo = Self {
            path: path.as_ref().to_path_buf(),
        };
        let snapshot = repo.load().await?;
        tracing::info!(
            path = %repo.path.display(),
            variables = snapshot.variables.len(),
            users = snapshot.users.len(),
            "snapshot loaded"
        );
        Ok(repo)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<DashboardSnapshot, RepositoryError> {
        let path = self.path.display().to_string();
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| RepositoryError::Read {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        let snapshot: DashboardSnapshot =
            serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Parse {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        snapshot
            .check()
            .map_err(|reason| RepositoryError::Invalid { path, reason })?;
        Ok(snapshot)
    }
}

#[async_trait::async_trait]
impl DashboardRepository for FileRepository {
    async fn environments(&self) -> Result<Vec<Environment>, RepositoryError> {
        Ok(self.load().await?.environments)
    }

    async fn variables(&self) -> Result<Vec<EnvironmentVariable>, RepositoryError> {
        Ok(self.load().await?.variables)
    }

    async fn users(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.load().await?.users)
    }

    async fn user_tabs(&self) -> Result<Vec<Tab>, RepositoryError> {
        Ok(self.load().await?.user_tabs)
    }

    async fn logs(&self) -> Result<Vec<LogEntry>, RepositoryError> {
        Ok(self.load().await?.logs)
    }

    async fn log_tabs(&self) -> Result<Vec<Tab>, RepositoryError> {
        Ok(self.load().await?.log_tabs)
    }

    async fn databases(&self) -> Result<Vec<DatabaseConnection>, RepositoryError> {
        Ok(self.load().await?.databases)
    }

    async fn database_tabs(&self) -> Result<Vec<Tab>, RepositoryError> {
        Ok(self.load().await?.database_tabs)
    }

    async fn allowlist(&self) -> Result<Vec<AllowlistRule>, RepositoryError> {
        Ok(self.load().await?.allowlist)
    }

    async fn service_tokens(&self) -> Result<Vec<ServiceToken>, RepositoryError> {
        Ok(self.load().await?.service_tokens)
    }

    async fn scan_report(&self) -> Result<ScanReport, RepositoryError> {
        Ok(self.load().await?.scan_report)
    }

    async fn analytics(&self) -> Result<AnalyticsSnapshot, RepositoryError> {
        Ok(self.load().await?.analytics)
    }

    async fn help_categories(&self) -> Result<Vec<HelpCategory>, RepositoryError> {
        Ok(self.load().await?.help_categories)
    }

    async fn project(&self) -> Result<ProjectSettings, RepositoryError> {
        Ok(self.load().await?.project)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::MockRepository;

    async fn write_snapshot(dir: &tempfile::TempDir, snapshot: &DashboardSnapshot) -> PathBuf {
        let path = dir.path().join("snapshot.json");
        tokio::fs::write(&path, serde_json::to_vec_pretty(snapshot).unwrap())
            .await
            .unwrap();
        path
    }

    #[tokio::test]
    async fn serves_exported_fixtures() {
        let dir = tempfile::tempdir().unwrap();
        let mock = MockRepository::new();
        let path = write_snapshot(&dir, mock.snapshot()).await;

        let repo = FileRepository::open(&path).await.unwrap();
        assert_eq!(repo.variables().await.unwrap(), mock.variables().await.unwrap());
        assert_eq!(repo.users().await.unwrap(), mock.users().await.unwrap());
        assert_eq!(repo.project().await.unwrap().project_id, "proj_89sfd789sdf789");
    }

    #[tokio::test]
    async fn default_variable_lookup_scans_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(&dir, MockRepository::new().snapshot()).await;
        let repo = FileRepository::open(&path).await.unwrap();
        assert_eq!(repo.variable("1").await.unwrap().unwrap().name, "API_URL");
        assert!(repo.variable("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileRepository::open(dir.path().join("absent.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Read { .. }));
    }

    #[tokio::test]
    async fn malformed_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        tokio::fs::write(&path, b"{\"environments\": [").await.unwrap();
        let err = FileRepository::open(&path).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Parse { .. }));
    }

    #[tokio::test]
    async fn dangling_environment_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut snapshot = MockRepository::new().snapshot().clone();
        snapshot.variables[0].environment = "qa".to_owned();
        let path = write_snapshot(&dir, &snapshot).await;

        let err = FileRepository::open(&path).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Invalid { ref reason, .. } if reason.contains("qa")));
    }

    #[tokio::test]
    async fn edits_are_visible_without_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let mut snapshot = MockRepository::new().snapshot().clone();
        let path = write_snapshot(&dir, &snapshot).await;
        let repo = FileRepository::open(&path).await.unwrap();

        snapshot.project.name = "Outro Projeto".to_owned();
        write_snapshot(&dir, &snapshot).await;
        assert_eq!(repo.project().await.unwrap().name, "Outro Projeto");
    }
}
