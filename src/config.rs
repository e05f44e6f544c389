//! Configuration module
//!
//! Loaded from `~/.config/swapstation/config.toml` (or `SWAPSTATION_CONFIG`).
//! Every section has defaults, so a partial file is fine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::shared::{AppError, AppResult, RetryConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

/// Proxy server listener
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Remote backend API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL without the `/api` suffix
    pub base_url: String,
    pub timeout_secs: u64,
    /// Attempts of the low-level fetch for 502/503/transport errors
    pub retry_attempts: u32,
    /// Delay unit of the linear backoff
    pub retry_delay_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 30,
            retry_attempts: 3,
            retry_delay_ms: 1000,
        }
    }
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.retry_attempts,
            base_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }
}

/// Session persistence and cookie mirror
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Max-age of the `token`/`role` cookies for plain access sessions
    pub access_max_age_secs: i64,
    /// Max-age when the session carries a refresh token
    pub refresh_max_age_secs: i64,
    /// Add the `Secure` attribute to cookies
    pub secure_cookies: bool,
    /// Where the client keeps its tokens; defaults to the user data dir
    pub storage_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            access_max_age_secs: 60 * 60,
            refresh_max_age_secs: 7 * 24 * 60 * 60,
            secure_cookies: false,
            storage_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub booking_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            booking_ttl_secs: 5 * 60,
        }
    }
}

impl CacheConfig {
    pub fn booking_ttl(&self) -> Duration {
        Duration::from_secs(self.booking_ttl_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Read a TOML file and apply environment overrides.
    pub fn load(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        let mut cfg = Self::from_toml(&raw)?;
        cfg.apply_env();
        Ok(cfg)
    }

    pub fn from_toml(raw: &str) -> AppResult<Self> {
        toml::from_str(raw).map_err(|e| AppError::Config(format!("Invalid config: {}", e)))
    }

    /// `SWAPSTATION_BACKEND_URL` and `SWAPSTATION_PORT` win over the file.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("SWAPSTATION_BACKEND_URL") {
            if !url.trim().is_empty() {
                self.backend.base_url = url;
            }
        }
        if let Some(port) = std::env::var("SWAPSTATION_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
        {
            self.server.port = port;
        }
    }
}

/// `<config dir>/swapstation/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("swapstation")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.session.access_max_age_secs, 3600);
        assert_eq!(cfg.session.refresh_max_age_secs, 604_800);
        assert_eq!(cfg.cache.booking_ttl(), Duration::from_secs(300));
        assert_eq!(cfg.backend.retry().max_attempts, 3);
        assert_eq!(cfg.backend.retry().base_delay, Duration::from_secs(1));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [backend]
            base_url = "https://api.example.com"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.backend.base_url, "https://api.example.com");
        assert_eq!(cfg.backend.timeout_secs, 30);
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.server.port, 3000);
    }

    #[test]
    fn invalid_toml_is_config_error() {
        assert!(matches!(
            AppConfig::from_toml("[server\nport = "),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 8088\n").unwrap();
        let cfg = AppConfig::load(&path).unwrap();
        // SWAPSTATION_PORT is not set under test
        assert_eq!(cfg.server.port, 8088);
    }
}
