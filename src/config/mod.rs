//! Configuration (layered: defaults < config file < environment).

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::{AuthdeckError, Result};

/// Default console API root (the backend mounts the admin surface here).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/admin/api";

/// Rows per page in the device table.
pub const DEVICE_PAGE_SIZE: usize = 10;
/// Rows per page in the token audit table.
pub const TOKEN_PAGE_SIZE: usize = 20;
/// Server-side fetch limit for the inbox list.
pub const INBOX_LIMIT: u32 = 100;

/// Runtime configuration for the console.
///
/// Resolution order, lowest to highest precedence:
/// 1. Built-in defaults
/// 2. `config.toml` in the platform config directory
/// 3. `AUTHDECK_*` environment variables (a `.env` file is honored)
#[derive(Debug, Clone)]
pub struct AuthdeckConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub device_page_size: usize,
    pub token_page_size: usize,
    pub inbox_limit: u32,
}

impl Default for AuthdeckConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            device_page_size: DEVICE_PAGE_SIZE,
            token_page_size: TOKEN_PAGE_SIZE,
            inbox_limit: INBOX_LIMIT,
        }
    }
}

/// On-disk representation; every field optional so partial files work.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    device_page_size: Option<usize>,
    token_page_size: Option<usize>,
    inbox_limit: Option<u32>,
}

impl AuthdeckConfig {
    /// Config pointing at a specific API root, defaults elsewhere.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load from the config file and environment.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        let mut config = Self::default();
        if let Some(path) = Self::config_file_path() {
            if let Ok(raw) = std::fs::read_to_string(&path) {
                config.apply_file(Self::parse_file(&raw)?);
            }
        }
        config.apply_env()?;
        Ok(config)
    }

    /// Load from an explicit config file (which must exist), then apply
    /// the environment on top.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AuthdeckError::Configuration(format!("{}: {e}", path.display()))
        })?;
        let mut config = Self::default();
        config.apply_file(Self::parse_file(&raw)?);
        config.apply_env()?;
        Ok(config)
    }

    fn parse_file(raw: &str) -> Result<ConfigFile> {
        toml::from_str(raw).map_err(|e| AuthdeckError::Configuration(e.to_string()))
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(url) = file.base_url {
            self.base_url = url;
        }
        if let Some(secs) = file.request_timeout_secs {
            self.request_timeout = Duration::from_secs(secs);
        }
        if let Some(size) = file.device_page_size {
            self.device_page_size = size;
        }
        if let Some(size) = file.token_page_size {
            self.token_page_size = size;
        }
        if let Some(limit) = file.inbox_limit {
            self.inbox_limit = limit;
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("AUTHDECK_BASE_URL") {
            self.base_url = url;
        }
        if let Ok(raw) = std::env::var("AUTHDECK_TIMEOUT_SECS") {
            let secs: u64 = raw.parse().map_err(|_| {
                AuthdeckError::Configuration(format!(
                    "AUTHDECK_TIMEOUT_SECS must be an integer, got {raw:?}"
                ))
            })?;
            self.request_timeout = Duration::from_secs(secs);
        }
        Ok(())
    }

    fn config_file_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "authdeck").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
