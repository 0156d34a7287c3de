//! Startup configuration.
//!
//! Everything is read once at startup and passed down explicitly. Values
//! come from the environment first and from an optional
//! `settings.json` in the user config directory second.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, FridgeId, Result};

/// Default address the HTTP server listens on.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Default size of the database connection pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Which database backs the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseBackend {
    /// Local `SQLite` file.
    Sqlite {
        /// Path of the database file.
        path: PathBuf,
    },
    /// Hosted `PostgreSQL` database.
    Postgres {
        /// Connection URL.
        url: String,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Fridge every request operates on.
    pub fridge_id: FridgeId,
    /// Storage backend.
    pub database: DatabaseBackend,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Maximum pooled database connections.
    pub max_connections: u32,
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a variable is malformed or
    /// `DATABASE_URL` is missing in production mode.
    ///
    /// Returns [`Error::Io`] or [`Error::Serde`] if the settings file
    /// exists but cannot be read.
    pub fn from_env() -> Result<Self> {
        let settings = Settings::load(&settings_path())?;
        Self::from_lookup(|key| std::env::var(key).ok().or_else(|| settings.lookup(key)))
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Recognized keys: `FRIDGE_ID`, `PRODUCTION`, `DATABASE_URL`,
    /// `FRIDGE_DB_PATH`, `FRIDGE_BIND` and `FRIDGE_DB_MAX_CONNECTIONS`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a value is malformed or
    /// `DATABASE_URL` is missing in production mode.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let fridge_id = match value("FRIDGE_ID") {
            Some(raw) => FridgeId::new(parse(&raw, "FRIDGE_ID")?),
            None => FridgeId::DEFAULT,
        };

        let production = value("PRODUCTION").is_some_and(|v| v.eq_ignore_ascii_case("true"));
        let database = if production {
            let url = value("DATABASE_URL").ok_or_else(|| {
                Error::Config("DATABASE_URL must be set when PRODUCTION=true".to_string())
            })?;
            DatabaseBackend::Postgres { url }
        } else {
            let path = value("FRIDGE_DB_PATH").map_or_else(default_database_path, PathBuf::from);
            DatabaseBackend::Sqlite { path }
        };

        let bind_addr = parse(
            &value("FRIDGE_BIND").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            "FRIDGE_BIND",
        )?;

        let max_connections = match value("FRIDGE_DB_MAX_CONNECTIONS") {
            Some(raw) => parse(&raw, "FRIDGE_DB_MAX_CONNECTIONS")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        if max_connections == 0 {
            return Err(Error::Config(
                "FRIDGE_DB_MAX_CONNECTIONS must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            fridge_id,
            database,
            bind_addr,
            max_connections,
        })
    }
}

/// Optional on-disk settings, overridden by environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Same as `FRIDGE_ID`.
    pub fridge_id: Option<i64>,
    /// Same as `FRIDGE_DB_PATH`.
    pub database_path: Option<PathBuf>,
    /// Same as `FRIDGE_BIND`.
    pub bind_addr: Option<String>,
    /// Same as `FRIDGE_DB_MAX_CONNECTIONS`.
    pub max_connections: Option<u32>,
}

impl Settings {
    /// Load settings from `path`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        debug!("Loading settings from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// The value for an environment-variable style key.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<String> {
        match key {
            "FRIDGE_ID" => self.fridge_id.map(|id| id.to_string()),
            "FRIDGE_DB_PATH" => self
                .database_path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            "FRIDGE_BIND" => self.bind_addr.clone(),
            "FRIDGE_DB_MAX_CONNECTIONS" => self.max_connections.map(|n| n.to_string()),
            _ => None,
        }
    }
}

/// Location of the optional settings file.
#[must_use]
pub fn settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fridgeledger")
        .join("settings.json")
}

/// Default location of the local database file.
#[must_use]
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fridgeledger")
        .join("fridgeledger.db")
}

fn parse<T: std::str::FromStr>(raw: &str, key: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| Error::Config(format!("invalid value for {key}: {raw:?}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.fridge_id, FridgeId::DEFAULT);
        assert_eq!(
            config.database,
            DatabaseBackend::Sqlite {
                path: default_database_path()
            }
        );
        assert_eq!(config.bind_addr.port(), 5000);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("FRIDGE_ID", "7"),
            ("FRIDGE_DB_PATH", "/tmp/fridge.db"),
            ("FRIDGE_BIND", "127.0.0.1:8080"),
            ("FRIDGE_DB_MAX_CONNECTIONS", "2"),
        ])
        .unwrap();
        assert_eq!(config.fridge_id, FridgeId(7));
        assert_eq!(
            config.database,
            DatabaseBackend::Sqlite {
                path: PathBuf::from("/tmp/fridge.db")
            }
        );
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.max_connections, 2);
    }

    #[test]
    fn test_production_selects_postgres() {
        let config = config_from(&[
            ("PRODUCTION", "true"),
            ("DATABASE_URL", "postgres://fridge@localhost/fridge"),
        ])
        .unwrap();
        assert_eq!(
            config.database,
            DatabaseBackend::Postgres {
                url: "postgres://fridge@localhost/fridge".to_string()
            }
        );
    }

    #[test]
    fn test_production_requires_url() {
        let err = config_from(&[("PRODUCTION", "true")]).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("DATABASE_URL")));
    }

    #[test]
    fn test_production_false_stays_local() {
        let config = config_from(&[("PRODUCTION", "false"), ("DATABASE_URL", "postgres://x")])
            .unwrap();
        assert!(matches!(config.database, DatabaseBackend::Sqlite { .. }));
    }

    #[test]
    fn test_settings_lookup_and_missing_file() {
        let settings: Settings =
            serde_json::from_str(r#"{"fridge_id": 3, "bind_addr": "127.0.0.1:9000"}"#).unwrap();
        assert_eq!(settings.lookup("FRIDGE_ID").as_deref(), Some("3"));
        assert_eq!(settings.lookup("FRIDGE_BIND").as_deref(), Some("127.0.0.1:9000"));
        assert_eq!(settings.lookup("DATABASE_URL"), None);

        let config = Config::from_lookup(|key| settings.lookup(key)).unwrap();
        assert_eq!(config.fridge_id, FridgeId(3));
        assert_eq!(config.bind_addr.port(), 9000);

        let missing = Settings::load(Path::new("/nonexistent/fridgeledger/settings.json")).unwrap();
        assert_eq!(missing, Settings::default());
    }

    #[test]
    fn test_malformed_values() {
        assert!(config_from(&[("FRIDGE_ID", "abc")]).is_err());
        assert!(config_from(&[("FRIDGE_BIND", "nowhere")]).is_err());
        assert!(config_from(&[("FRIDGE_DB_MAX_CONNECTIONS", "0")]).is_err());
    }
}
