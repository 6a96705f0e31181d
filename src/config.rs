use anyhow::{Context, Result, bail};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use strum_macros::{Display, EnumString};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StorageBackend {
    Mysql,
    #[strum(to_string = "sqlite", serialize = "memory")]
    Sqlite,
}

const DEFAULT_SQLITE_URL: &str = "sqlite::memory:";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub storage: StorageBackend,
    /// Required for MySQL, SQLite falls back to a private in-memory database.
    pub database_url: String,
    pub api_prefix: String,

    // Rate limiting, per peer IP
    pub rate_per_min: u32,

    pub seed_fixtures: bool,

    pub log_dir: String,
    pub log_level: tracing::Level,
}

fn var_or<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .with_context(|| format!("{} has an invalid value", key))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let storage: StorageBackend = var_or("STORAGE_BACKEND", "sqlite")?;
        let database_url = match (env::var("DATABASE_URL"), storage) {
            (Ok(url), _) => url,
            (Err(_), StorageBackend::Sqlite) => DEFAULT_SQLITE_URL.to_string(),
            (Err(_), StorageBackend::Mysql) => {
                bail!("DATABASE_URL must be set when STORAGE_BACKEND is mysql")
            }
        };

        Ok(Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            storage,
            database_url,
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
            rate_per_min: var_or("RATE_PER_MIN", "1000")?,
            seed_fixtures: var_or("SEED_FIXTURES", "true")?,
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            log_level: var_or("LOG_LEVEL", "debug")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_backend_parses_case_insensitively() {
        assert_eq!("mysql".parse::<StorageBackend>().unwrap(), StorageBackend::Mysql);
        assert_eq!("SQLite".parse::<StorageBackend>().unwrap(), StorageBackend::Sqlite);
        assert!("postgres".parse::<StorageBackend>().is_err());
        assert_eq!(StorageBackend::Mysql.to_string(), "mysql");
        assert_eq!(StorageBackend::Sqlite.to_string(), "sqlite");
    }

    #[test]
    fn memory_is_an_alias_for_sqlite() {
        assert_eq!("memory".parse::<StorageBackend>().unwrap(), StorageBackend::Sqlite);
        assert_eq!("Memory".parse::<StorageBackend>().unwrap(), StorageBackend::Sqlite);
    }

    #[test]
    fn var_or_falls_back_to_default() {
        let rate: u32 = var_or("ACTIVITY_TRACKER_TEST_UNSET_VAR", "42").unwrap();
        assert_eq!(rate, 42);

        let level: tracing::Level = var_or("ACTIVITY_TRACKER_TEST_UNSET_VAR", "warn").unwrap();
        assert_eq!(level, tracing::Level::WARN);
    }
}
