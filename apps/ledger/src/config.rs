//! # Configuration
//!
//! Ledger settings from environment variables with development defaults.
//!
//! ## Environment Variables
//! ```text
//! SHOWROOM_DB_PATH               SQLite file (default: platform data dir)
//!                                ":memory:" for a throwaway database
//! SHOWROOM_DB_MAX_CONNECTIONS    pool size (default: 5)
//! SHOWROOM_DEALERSHIP_NAME       name on reports (default: Showroom Motors)
//! ```

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use showroom_db::DbConfig;

const IN_MEMORY_PATH: &str = ":memory:";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_DEALERSHIP_NAME: &str = "Showroom Motors";

/// Ledger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of pooled connections.
    pub max_connections: u32,

    /// Dealership name shown on reports.
    pub dealership_name: String,
}

impl LedgerConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_path = match lookup("SHOWROOM_DB_PATH") {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_database_path()?,
        };

        let max_connections = match lookup("SHOWROOM_DB_MAX_CONNECTIONS") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::InvalidValue("SHOWROOM_DB_MAX_CONNECTIONS".to_string()))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let dealership_name = lookup("SHOWROOM_DEALERSHIP_NAME")
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DEALERSHIP_NAME.to_string());

        Ok(LedgerConfig {
            database_path,
            max_connections,
            dealership_name,
        })
    }

    /// Configuration for a throwaway in-memory ledger.
    pub fn in_memory() -> Self {
        LedgerConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            max_connections: 1,
            dealership_name: DEFAULT_DEALERSHIP_NAME.to_string(),
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY_PATH
    }

    /// Storage settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        if self.is_in_memory() {
            DbConfig::in_memory()
        } else {
            DbConfig::new(&self.database_path).max_connections(self.max_connections)
        }
    }
}

/// Platform data directory path for `showroom.db`.
///
/// - **macOS**: `~/Library/Application Support/com.showroom.ledger/showroom.db`
/// - **Windows**: `%APPDATA%\showroom\ledger\data\showroom.db`
/// - **Linux**: `~/.local/share/ledger/showroom.db`
pub fn default_database_path() -> Result<PathBuf, ConfigError> {
    let dirs = ProjectDirs::from("com", "showroom", "ledger").ok_or(ConfigError::NoDataDir)?;
    Ok(dirs.data_dir().join("showroom.db"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Could not determine the application data directory; set SHOWROOM_DB_PATH")]
    NoDataDir,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_explicit_values() {
        let config = LedgerConfig::from_lookup(lookup(&[
            ("SHOWROOM_DB_PATH", "/var/lib/showroom/ledger.db"),
            ("SHOWROOM_DB_MAX_CONNECTIONS", "8"),
            ("SHOWROOM_DEALERSHIP_NAME", "Lakeside Auto"),
        ]))
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/var/lib/showroom/ledger.db"));
        assert_eq!(config.max_connections, 8);
        assert_eq!(config.dealership_name, "Lakeside Auto");
        assert_eq!(config.db_config().max_connections, 8);
    }

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::from_lookup(lookup(&[("SHOWROOM_DB_PATH", "./showroom.db")])).unwrap();

        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.dealership_name, DEFAULT_DEALERSHIP_NAME);
    }

    #[test]
    fn test_invalid_pool_size() {
        for bad in ["many", "0", "-1"] {
            let err = LedgerConfig::from_lookup(lookup(&[
                ("SHOWROOM_DB_PATH", "./showroom.db"),
                ("SHOWROOM_DB_MAX_CONNECTIONS", bad),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue(ref var) if var == "SHOWROOM_DB_MAX_CONNECTIONS"));
        }
    }

    #[test]
    fn test_in_memory() {
        let config = LedgerConfig::from_lookup(lookup(&[("SHOWROOM_DB_PATH", ":memory:")])).unwrap();
        assert!(config.is_in_memory());
        assert!(config.db_config().is_in_memory());
        assert!(LedgerConfig::in_memory().is_in_memory());
    }
}
