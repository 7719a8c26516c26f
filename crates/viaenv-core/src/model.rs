//! Domain model for the dashboard.
//!
//! Every entity is a plain record. Field names serialize in camelCase so a
//! JSON snapshot exported from the web client loads without translation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A display label paired with the instant it describes.
///
/// The label is what the page shows ("2 horas atrás"); the instant is what
/// sorting uses. Labels are never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamped {
    /// Human-readable label rendered as-is.
    pub label: String,
    /// Normalized instant, `None` when the event never happened.
    pub at: Option<DateTime<Utc>>,
}

impl Timestamped {
    /// Build a timestamp with a known instant.
    #[must_use]
    pub fn new(label: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            label: label.into(),
            at: Some(at),
        }
    }

    /// Build a label-only timestamp (e.g. `-` for a pending invite).
    #[must_use]
    pub fn label_only(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            at: None,
        }
    }
}

// ── Environments & variables ─────────────────────────────────────────

/// A named deployment scope that partitions variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub id: String,
    pub name: String,
    /// Accent color for the tab dot, as a CSS hex string.
    pub color: String,
    /// Cached tally shown on the tab. Authored, not derived from the
    /// variable list, so it can disagree with what the table shows.
    pub count: u32,
}

impl Environment {
    /// The tab selector value for this environment.
    #[must_use]
    pub fn as_tab(&self) -> Tab {
        Tab {
            id: self.id.clone(),
            name: self.name.clone(),
            color: Some(self.color.clone()),
            count: Some(self.count),
        }
    }
}

/// The kind of value a variable holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableType {
    String,
    Secret,
    ApiKey,
    Database,
}

impl VariableType {
    /// Wire name, also used as the badge text.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Secret => "secret",
            Self::ApiKey => "api_key",
            Self::Database => "database",
        }
    }
}

/// A key/value pair scoped to one environment.
///
/// `is_secret` is authored independently of `kind`; a `string` can be
/// secret and a `secret` could in principle be shown in clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentVariable {
    pub id: String,
    pub name: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: VariableType,
    pub is_secret: bool,
    /// Id of the owning [`Environment`].
    pub environment: String,
    pub last_updated: Timestamped,
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ── Users ────────────────────────────────────────────────────────────

/// Access level of a team member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Developer,
    Viewer,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Developer => "developer",
            Self::Viewer => "viewer",
        }
    }
}

/// Whether a member has accepted their invite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Invited,
}

impl UserStatus {
    /// Label shown next to the status dot.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Ativo",
            Self::Invited => "Pendente",
        }
    }
}

/// A human member of the project team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    pub last_active: Timestamped,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl User {
    /// Up to two uppercase initials, used when there is no avatar.
    #[must_use]
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

// ── Audit log ────────────────────────────────────────────────────────

/// Category of an audit event, drives the row icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    Security,
    Secrets,
    System,
}

impl LogKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Security => "security",
            Self::Secrets => "secrets",
            Self::System => "system",
        }
    }
}

/// One audited action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: String,
    pub user: String,
    pub action: String,
    pub target: String,
    /// Environment display name (`Production`, `Staging`, `Global`).
    pub environment: String,
    pub timestamp: Timestamped,
    #[serde(rename = "type")]
    pub kind: LogKind,
    pub ip: String,
}

impl LogEntry {
    /// Production events get a highlighted badge.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment == "Production"
    }
}

// ── Database connections ─────────────────────────────────────────────

/// Database engine behind a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatabaseKind {
    #[serde(rename = "PostgreSQL")]
    PostgreSql,
    #[serde(rename = "MySQL")]
    MySql,
    #[serde(rename = "Redis")]
    Redis,
    #[serde(other)]
    Other,
}

/// Broad family used by the connection tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseFamily {
    Sql,
    NoSql,
}

impl DatabaseFamily {
    /// Tab id for this family.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sql => "sql",
            Self::NoSql => "nosql",
        }
    }
}

impl DatabaseKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::PostgreSql => "PostgreSQL",
            Self::MySql => "MySQL",
            Self::Redis => "Redis",
            Self::Other => "Other",
        }
    }

    #[must_use]
    pub fn family(self) -> DatabaseFamily {
        match self {
            Self::PostgreSql | Self::MySql => DatabaseFamily::Sql,
            Self::Redis | Self::Other => DatabaseFamily::NoSql,
        }
    }

    /// Brand color for the card icon.
    #[must_use]
    pub fn brand_color(self) -> &'static str {
        match self {
            Self::PostgreSql => "#336791",
            Self::Redis => "#DC382D",
            Self::MySql => "#F29111",
            Self::Other => "#6B7280",
        }
    }
}

/// Health of a managed connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Connected,
    Error,
}

/// A database whose credentials the product rotates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseConnection {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DatabaseKind,
    pub host: String,
    pub status: ConnectionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub last_rotation: String,
    pub next_rotation: String,
    pub rotation_enabled: bool,
}

// ── Selector ─────────────────────────────────────────────────────────

/// A generic tab selector value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl Tab {
    /// A plain tab with no dot and no count.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: None,
            count: None,
        }
    }

    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }
}

// ── Security ─────────────────────────────────────────────────────────

/// An entry on the project's IP allowlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowlistRule {
    pub id: String,
    /// Address or CIDR range as authored.
    pub cidr: String,
    pub description: String,
    pub created_at: String,
}

/// A machine-to-machine credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceToken {
    pub id: String,
    pub name: String,
    /// Visible token prefix, the rest is never shown.
    pub prefix: String,
    pub last_used: String,
    /// Expiry label, `None` for tokens that never expire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
}

impl ServiceToken {
    #[must_use]
    pub fn never_expires(&self) -> bool {
        self.expires.is_none()
    }
}

/// A repository watched for leaked secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedRepository {
    pub name: String,
    pub clean: bool,
}

/// Result of the most recent secret scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub last_run: String,
    pub repositories: Vec<ScannedRepository>,
}

impl ScanReport {
    /// True when no watched repository has a finding.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.repositories.iter().all(|r| r.clean)
    }
}

// ── Analytics ────────────────────────────────────────────────────────

/// Direction of a KPI change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

/// One KPI card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStat {
    pub id: u32,
    pub label: String,
    pub value: String,
    pub change: String,
    pub trend: Trend,
    pub color: String,
}

/// Request count for one variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableUsage {
    pub name: String,
    pub calls: String,
}

/// Share of traffic from one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionShare {
    pub label: String,
    pub percent: u8,
}

/// Everything the analytics page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub period: String,
    pub stats: Vec<UsageStat>,
    /// Bar heights in percent of the tallest possible bar.
    pub request_volume: Vec<u8>,
    pub axis_labels: Vec<String>,
    pub top_variables: Vec<VariableUsage>,
    pub regions: Vec<RegionShare>,
}

// ── Help & settings ──────────────────────────────────────────────────

/// A documentation category card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpCategory {
    pub title: String,
    pub description: String,
    pub color: String,
}

/// An environment toggle on the settings page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentToggle {
    pub name: String,
    pub enabled: bool,
}

/// General project settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    pub name: String,
    pub project_id: String,
    pub environments: Vec<EnvironmentToggle>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user(name: &str) -> User {
        User {
            id: "1".to_owned(),
            name: name.to_owned(),
            email: "x@empresa.com".to_owned(),
            role: Role::Viewer,
            status: UserStatus::Active,
            last_active: Timestamped::label_only("-"),
            avatar_url: None,
        }
    }

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(user("Ana Júlia Souza").initials(), "AJ");
        assert_eq!(user("carlos mendes").initials(), "CM");
        assert_eq!(user("Sistema").initials(), "S");
    }

    #[test]
    fn database_family_groups_engines() {
        assert_eq!(DatabaseKind::PostgreSql.family(), DatabaseFamily::Sql);
        assert_eq!(DatabaseKind::MySql.family(), DatabaseFamily::Sql);
        assert_eq!(DatabaseKind::Redis.family(), DatabaseFamily::NoSql);
    }

    #[test]
    fn variable_deserializes_from_client_shape() {
        let json = r#"{
            "id": "9",
            "name": "API_URL",
            "value": "https://api.viaenv.com/v1",
            "type": "api_key",
            "isSecret": false,
            "environment": "dev",
            "lastUpdated": {"label": "agora", "at": null},
            "createdBy": "Admin"
        }"#;
        let var: EnvironmentVariable = serde_json::from_str(json).unwrap();
        assert_eq!(var.kind, VariableType::ApiKey);
        assert!(!var.is_secret);
        assert_eq!(var.description, None);
    }

    #[test]
    fn unknown_database_kind_falls_back_to_other() {
        let kind: DatabaseKind = serde_json::from_str("\"MongoDB\"").unwrap();
        assert_eq!(kind, DatabaseKind::Other);
    }

    #[test]
    fn environment_tab_keeps_cached_count() {
        let env = Environment {
            id: "dev".to_owned(),
            name: "Development".to_owned(),
            color: "#10B981".to_owned(),
            count: 12,
        };
        let tab = env.as_tab();
        assert_eq!(tab.count, Some(12));
        assert_eq!(tab.color.as_deref(), Some("#10B981"));
    }
}
