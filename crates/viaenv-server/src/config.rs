//! Server configuration for `ViaEnv`.
//!
//! Loads configuration from environment variables with sensible defaults.
//! All settings can be overridden via `VIAENV_*` environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use viaenv_core::theme::ThemeMode;
use viaenv_core::view::COPY_FEEDBACK_DELAY;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Color scheme rendered by every shell.
    pub theme: ThemeMode,
    /// Where page datasets come from.
    pub data_source: DataSource,
    /// How long a "copied" badge stays visible.
    pub copy_feedback: Duration,
    /// Sessions idle longer than this are evicted.
    pub session_idle: Duration,
    /// Seconds between idle-session sweeps.
    pub session_sweep_interval_secs: u64,
    /// Values that were present but unusable and fell back to a default.
    /// Reported once logging is up.
    pub warnings: Vec<String>,
}

/// Supported data sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Built-in fixtures.
    Mock,
    /// JSON snapshot on disk.
    File { path: PathBuf },
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT`: port to bind on, binds to `0.0.0.0`
    /// - `VIAENV_BIND_ADDR`: full bind address (overrides `PORT`, default: `127.0.0.1:8300`)
    /// - `VIAENV_LOG_LEVEL`: log filter (default: `info`)
    /// - `VIAENV_THEME`: `light` or `dark` (default: `light`)
    /// - `VIAENV_DATA_SOURCE`: `mock` or `file` (default: `mock`)
    /// - `VIAENV_FIXTURES_PATH`: snapshot path for the file source (default: `./fixtures.json`)
    /// - `VIAENV_COPY_FEEDBACK_MS`: copy badge lifetime (default: `2000`)
    /// - `VIAENV_SESSION_IDLE_SECS`: idle session lifetime (default: `1800`)
    /// - `VIAENV_SESSION_SWEEP_SECS`: seconds between session sweeps (default: `60`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut warnings = Vec::new();
        let default_addr = SocketAddr::from(([127, 0, 0, 1], 8300));

        // Priority: VIAENV_BIND_ADDR > PORT > default 127.0.0.1:8300
        let bind_addr = if let Some(addr) = lookup("VIAENV_BIND_ADDR") {
            addr.parse().unwrap_or_else(|_| {
                warnings.push(format!("invalid VIAENV_BIND_ADDR '{addr}', using {default_addr}"));
                default_addr
            })
        } else if let Some(port_str) = lookup("PORT") {
            let port: u16 = port_str.parse().unwrap_or_else(|_| {
                warnings.push(format!("invalid PORT '{port_str}', using 8300"));
                8300
            });
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            default_addr
        };

        let log_level = lookup("VIAENV_LOG_LEVEL").unwrap_or_else(|| "info".to_owned());

        let theme = match lookup("VIAENV_THEME") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warnings.push(format!("{e}, using light"));
                ThemeMode::Light
            }),
            None => ThemeMode::Light,
        };

        let fixtures_path = lookup("VIAENV_FIXTURES_PATH")
            .map_or_else(|| PathBuf::from("./fixtures.json"), PathBuf::from);

        let data_source = match lookup("VIAENV_DATA_SOURCE")
            .unwrap_or_else(|| "mock".to_owned())
            .to_lowercase()
            .as_str()
        {
            "file" => DataSource::File {
                path: fixtures_path,
            },
            "mock" => DataSource::Mock,
            other => {
                warnings.push(format!("unknown VIAENV_DATA_SOURCE '{other}', using mock"));
                DataSource::Mock
            }
        };

        let copy_feedback = lookup("VIAENV_COPY_FEEDBACK_MS").map_or(COPY_FEEDBACK_DELAY, |raw| {
            raw.parse().map(Duration::from_millis).unwrap_or_else(|_| {
                warnings.push(format!(
                    "invalid VIAENV_COPY_FEEDBACK_MS '{raw}', using {}",
                    COPY_FEEDBACK_DELAY.as_millis()
                ));
                COPY_FEEDBACK_DELAY
            })
        });

        let session_idle = Duration::from_secs(lookup("VIAENV_SESSION_IDLE_SECS").map_or(1800, |raw| {
            raw.parse().unwrap_or_else(|_| {
                warnings.push(format!("invalid VIAENV_SESSION_IDLE_SECS '{raw}', using 1800"));
                1800
            })
        }));

        let session_sweep_interval_secs = lookup("VIAENV_SESSION_SWEEP_SECS").map_or(60, |raw| {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    warnings.push(format!("invalid VIAENV_SESSION_SWEEP_SECS '{raw}', using 60"));
                    60
                }
            }
        });

        Self {
            bind_addr,
            log_level,
            theme,
            data_source,
            copy_feedback,
            session_idle,
            session_sweep_interval_secs,
            warnings,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
