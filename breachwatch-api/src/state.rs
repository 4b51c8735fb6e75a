//! App state: lookup pipeline, config.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use breachwatch_cache::{CacheConfig, VerdictCache};
use breachwatch_core::error::{BreachError, Result};
use breachwatch_core::traits::BreachStore;
use breachwatch_lookup::BreachChecker;
use breachwatch_store::{seed_sample_data, SqliteStore};

const DEFAULT_PORT: u16 = 8082;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
const DEFAULT_DB_PATH: &str = "email_checker.db";

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub port: u16,
    pub bind_addr: String,
    pub db_path: PathBuf,
    pub cache: CacheConfig,
    pub seed_database: bool,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_addr: DEFAULT_BIND_ADDR.into(),
            db_path: DEFAULT_DB_PATH.into(),
            cache: CacheConfig::default(),
            seed_database: true,
            admin_username: None,
            admin_password: None,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        let config = Self {
            port: env_parse("PORT", defaults.port)?,
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            db_path: std::env::var("DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            cache: CacheConfig {
                ttl_seconds: env_parse("CACHE_TTL_SECS", defaults.cache.ttl_seconds)?,
                sweep_interval_seconds: env_parse(
                    "CACHE_SWEEP_SECS",
                    defaults.cache.sweep_interval_seconds,
                )?,
            },
            seed_database: std::env::var("SEED_DATABASE")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.seed_database),
            admin_username: non_empty_var("ADMIN_USERNAME"),
            admin_password: non_empty_var("ADMIN_PASSWORD"),
        };
        config.cache.validate()?;
        Ok(config)
    }

    /// Both admin credentials, if configured.
    pub fn admin_credentials(&self) -> Option<(&str, &str)> {
        match (&self.admin_username, &self.admin_password) {
            (Some(user), Some(pass)) => Some((user.as_str(), pass.as_str())),
            _ => None,
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| BreachError::Config(format!("{key} has an invalid value: {raw:?}"))),
        Err(_) => Ok(default),
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

pub struct AppState {
    pub config: ApiConfig,
    pub checker: BreachChecker,
    pub started_at: Instant,
}

impl AppState {
    /// Opens the SQLite store, seeds it if asked, and starts the cache sweeper.
    pub async fn from_config(config: ApiConfig) -> Result<Self> {
        let store = SqliteStore::open(&config.db_path).await?;
        info!(path = %config.db_path.display(), "Opened breach database");

        if config.seed_database {
            match seed_sample_data(&store).await {
                Ok(inserted) => info!(inserted, "Seeded sample data"),
                Err(e) => warn!(error = %e, "Failed to seed sample data"),
            }
        }

        let cache = VerdictCache::start(&config.cache)?;
        Ok(Self::with_store(config, cache, Arc::new(store)))
    }

    pub fn with_store(
        config: ApiConfig,
        cache: Arc<VerdictCache>,
        store: Arc<dyn BreachStore>,
    ) -> Self {
        Self {
            config,
            checker: BreachChecker::new(cache, store),
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_credentials_need_both() {
        let mut config = ApiConfig::default();
        assert!(config.admin_credentials().is_none());

        config.admin_username = Some("admin".into());
        assert!(config.admin_credentials().is_none());

        config.admin_password = Some("secret".into());
        assert_eq!(config.admin_credentials(), Some(("admin", "secret")));
    }

    #[test]
    fn test_listen_addr() {
        assert_eq!(ApiConfig::default().listen_addr(), "0.0.0.0:8082");
    }

    #[tokio::test]
    async fn test_from_config_seeds_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let config = ApiConfig {
            db_path: dir.path().join("breaches.db"),
            seed_database: true,
            ..Default::default()
        };

        let state = AppState::from_config(config).await.unwrap();
        assert_eq!(state.checker.store().count().await.unwrap(), 5);
        assert!(state.checker.cache().is_sweeping());
        state.checker.cache().shutdown().await;
    }
}
