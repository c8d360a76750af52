use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use userdb_store::config::DEFAULT_DATABASE_URL;
use userdb_store::StoreConfig;

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.userdb/.env
///
/// Runs before tracing is set up, so nothing is logged here; the caller
/// logs the returned outcome via [`log_dotenv`].
pub fn load_dotenv() -> DotenvOutcome {
    let mut outcome = DotenvOutcome::default();

    if let Ok(path) = dotenvy::dotenv() {
        outcome.loaded.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            // dotenvy doesn't overwrite existing vars
            match dotenvy::from_path(&env_file) {
                Ok(()) => outcome.loaded.push(env_file),
                Err(e) => outcome.failed.push((env_file, e.to_string())),
            }
        }
    }

    outcome
}

/// Which .env files were read
#[derive(Debug, Default)]
pub struct DotenvOutcome {
    pub loaded: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl DotenvOutcome {
    pub fn summary(&self) -> Option<String> {
        if self.loaded.is_empty() {
            return None;
        }
        let paths: Vec<String> = self.loaded.iter().map(|p| p.display().to_string()).collect();
        Some(format!("Loaded environment from: {}", paths.join(", ")))
    }
}

/// Log what `load_dotenv` did, once tracing is running
pub fn log_dotenv(outcome: &DotenvOutcome) {
    for (path, err) in &outcome.failed {
        debug!("Failed to load {}: {}", path.display(), err);
    }
    match outcome.summary() {
        Some(summary) => info!("{}", summary),
        None => debug!("No .env files found, using environment only"),
    }
}

/// ~/.userdb
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".userdb"))
}

/// ~/.userdb/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserdbConfig {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Overridden by --database-url / DATABASE_URL
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Batches at least this large are offered the bulk (COPY) path
    #[serde(default = "default_bulk_threshold")]
    pub bulk_threshold: usize,

    #[serde(default = "default_count")]
    pub default_count: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            bulk_threshold: default_bulk_threshold(),
            default_count: default_count(),
        }
    }
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_bulk_threshold() -> usize {
    1000
}

fn default_count() -> usize {
    100
}

impl UserdbConfig {
    /// Load config from TOML.
    ///
    /// An explicit `path` must exist and parse. Without one, the default
    /// ~/.userdb/config.toml is used when present, built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("No config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid TOML")
    }

    /// Store settings. `url_override` (flag or DATABASE_URL) beats the file.
    pub fn store_config(&self, url_override: Option<&str>) -> StoreConfig {
        let url = url_override
            .map(str::to_owned)
            .or_else(|| self.database.url.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        StoreConfig::new(url)
            .with_connect_timeout(Duration::from_secs(self.database.connect_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = UserdbConfig::default();
        assert_eq!(config.generation.bulk_threshold, 1000);
        assert_eq!(config.generation.default_count, 100);
        assert_eq!(config.database.connect_timeout_secs, 10);
        assert!(config.database.url.is_none());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = UserdbConfig::from_toml("[generation]\nbulk_threshold = 50\n").unwrap();
        assert_eq!(config.generation.bulk_threshold, 50);
        assert_eq!(config.generation.default_count, 100);
        assert_eq!(config.database.connect_timeout_secs, 10);
    }

    #[test]
    fn url_precedence() {
        let config = UserdbConfig::from_toml(
            "[database]\nurl = \"postgres://file/users\"\nconnect_timeout_secs = 3\n",
        )
        .unwrap();

        let store = config.store_config(Some("postgres://flag/users"));
        assert_eq!(store.database_url, "postgres://flag/users");
        assert_eq!(store.connect_timeout, Duration::from_secs(3));

        let store = config.store_config(None);
        assert_eq!(store.database_url, "postgres://file/users");

        let store = UserdbConfig::default().store_config(None);
        assert_eq!(store.database_url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn explicit_path_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database]\nurl = \"postgres://tmp/users\"").unwrap();

        let config = UserdbConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.database.url.as_deref(), Some("postgres://tmp/users"));
    }

    #[test]
    fn missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = UserdbConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn invalid_toml_fails() {
        assert!(UserdbConfig::from_toml("[generation\nbulk_threshold = ").is_err());
    }

    #[test]
    fn dotenv_summary_lists_loaded_files() {
        let outcome = DotenvOutcome::default();
        assert!(outcome.summary().is_none());

        let outcome = DotenvOutcome {
            loaded: vec![PathBuf::from(".env"), PathBuf::from("/home/u/.userdb/.env")],
            failed: Vec::new(),
        };
        assert_eq!(
            outcome.summary().as_deref(),
            Some("Loaded environment from: .env, /home/u/.userdb/.env")
        );
    }

    #[test]
    fn config_dir_is_under_home() {
        if let Some(path) = config_dir() {
            assert!(path.ends_with(".userdb"));
        }
    }
}
