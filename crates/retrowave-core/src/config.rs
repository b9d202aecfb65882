use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::CatalogRequest;
use crate::retry::RetryPolicy;
use crate::transfer::TransferOptions;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per track (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 0.5,
            max_delay_secs: 10,
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            base_delay: Duration::from_secs_f64(self.base_delay_secs.max(0.0)),
            max_delay: Duration::from_secs(self.max_delay_secs),
        }
    }
}

/// Global configuration loaded from `~/.config/retrowave-dl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrowaveConfig {
    /// Catalog origin; stream paths from the catalog are resolved against it.
    pub base_url: String,
    /// User-Agent sent with catalog and track requests.
    pub user_agent: String,
    /// Minimum delay between launching successive track transfers, in milliseconds.
    pub pacing_ms: u64,
    /// Connect timeout per request in seconds.
    pub connect_timeout_secs: u64,
    /// Total time allowed for the catalog request in seconds.
    #[serde(default = "default_catalog_timeout_secs")]
    pub catalog_timeout_secs: u64,
    /// Total time allowed for one track transfer (None = no limit).
    #[serde(default)]
    pub transfer_timeout_secs: Option<u64>,
    /// Number of tracks requested when `--limit` is not given.
    pub default_limit: u32,
    /// Number of tracks requested with `--all`.
    pub all_limit: u32,
    /// Optional retry policy; if missing, transfers are attempted once.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

fn default_catalog_timeout_secs() -> u64 {
    60
}

impl Default for RetrowaveConfig {
    fn default() -> Self {
        Self {
            base_url: "http://retrowave.ru".to_string(),
            user_agent: concat!("retrowave-dl/", env!("CARGO_PKG_VERSION")).to_string(),
            pacing_ms: 1000,
            connect_timeout_secs: 30,
            catalog_timeout_secs: default_catalog_timeout_secs(),
            transfer_timeout_secs: Some(600),
            default_limit: 2,
            all_limit: 999,
            retry: None,
        }
    }
}

impl RetrowaveConfig {
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    /// Catalog request parameters for `limit` tracks.
    pub fn catalog_request(&self, limit: u32) -> CatalogRequest {
        CatalogRequest {
            base_url: self.base_url.clone(),
            limit,
            user_agent: self.user_agent.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.catalog_timeout_secs.max(1)),
        }
    }

    /// Per-transfer HTTP options derived from this config.
    pub fn transfer_options(&self) -> TransferOptions {
        TransferOptions {
            user_agent: self.user_agent.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: self.transfer_timeout_secs.map(Duration::from_secs),
            retry: self.retry.as_ref().map(RetryConfig::to_policy),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("retrowave-dl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RetrowaveConfig> {
    load_or_init_at(&config_path()?)
}

/// Like `load_or_init` but for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<RetrowaveConfig> {
    if !path.exists() {
        let default_cfg = RetrowaveConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: RetrowaveConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = RetrowaveConfig::default();
        assert_eq!(cfg.base_url, "http://retrowave.ru");
        assert_eq!(cfg.pacing_ms, 1000);
        assert_eq!(cfg.default_limit, 2);
        assert_eq!(cfg.all_limit, 999);
        assert!(cfg.retry.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = RetrowaveConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: RetrowaveConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.base_url, cfg.base_url);
        assert_eq!(parsed.user_agent, cfg.user_agent);
        assert_eq!(parsed.transfer_timeout_secs, cfg.transfer_timeout_secs);
    }

    #[test]
    fn config_toml_custom_values_and_retry() {
        let toml = r#"
            base_url = "http://127.0.0.1:8080"
            user_agent = "test-agent"
            pacing_ms = 250
            connect_timeout_secs = 5
            default_limit = 10
            all_limit = 500

            [retry]
            max_attempts = 4
            base_delay_secs = 0.25
            max_delay_secs = 2
        "#;
        let cfg: RetrowaveConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.pacing(), Duration::from_millis(250));
        assert!(cfg.transfer_timeout_secs.is_none());
        assert_eq!(cfg.catalog_timeout_secs, 60);

        let opts = cfg.transfer_options();
        assert_eq!(opts.user_agent, "test-agent");
        assert_eq!(opts.connect_timeout, Duration::from_secs(5));
        assert!(opts.timeout.is_none());
        let retry = opts.retry.unwrap();
        assert_eq!(retry.max_attempts, 4);
        assert_eq!(retry.base_delay, Duration::from_millis(250));
        assert_eq!(retry.max_delay, Duration::from_secs(2));
    }

    #[test]
    fn catalog_request_uses_configured_timeouts() {
        let cfg: RetrowaveConfig = toml::from_str(
            r#"
            base_url = "http://127.0.0.1:8080"
            user_agent = "test-agent"
            pacing_ms = 0
            connect_timeout_secs = 3
            catalog_timeout_secs = 7
            default_limit = 2
            all_limit = 999
        "#,
        )
        .unwrap();
        let req = cfg.catalog_request(5);
        assert_eq!(req.limit, 5);
        assert_eq!(req.connect_timeout, Duration::from_secs(3));
        assert_eq!(req.timeout, Duration::from_secs(7));
    }

    #[test]
    fn load_or_init_writes_default_then_reads_it_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let created = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        let loaded = load_or_init_at(&path).unwrap();
        assert_eq!(loaded.base_url, created.base_url);
        assert_eq!(loaded.pacing_ms, created.pacing_ms);
    }
}
