//! # Server configuration
//!
//! Read once at startup from the process environment. A `.env` file next to the
//! binary is loaded first by `main`, so every variable can also live there.
//!
//! | Variable             | Default        |
//! |----------------------|----------------|
//! | `ADMIN_HOST`         | `127.0.0.1`    |
//! | `ADMIN_PORT`         | `8080`         |
//! | `ADMIN_DATABASE`     | `crm.sqlite`   |
//! | `ADMIN_OPEN_BROWSER` | `true`         |

use std::env;
use std::path::PathBuf;

use admin_common::config::MONITORED_TABLES;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATABASE: &str = "crm.sqlite";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a port number, got `{value}`")]
    InvalidPort { name: &'static str, value: String },
    #[error("{name} must be true or false, got `{value}`")]
    InvalidFlag { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// SQLite file the record counts are read from. Opened read-only.
    pub database: PathBuf,
    pub open_browser: bool,
    /// Tables the count endpoint answers for; anything else is a 404.
    pub monitored_tables: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: PathBuf::from(DEFAULT_DATABASE),
            open_browser: true,
            monitored_tables: MONITORED_TABLES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(host) = read("ADMIN_HOST") {
            config.host = host;
        }
        if let Some(port) = read("ADMIN_PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidPort {
                name: "ADMIN_PORT",
                value: port.clone(),
            })?;
        }
        if let Some(database) = read("ADMIN_DATABASE") {
            config.database = PathBuf::from(database);
        }
        if let Some(flag) = read("ADMIN_OPEN_BROWSER") {
            config.open_browser = match flag.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidFlag {
                        name: "ADMIN_OPEN_BROWSER",
                        value: flag,
                    })
                }
            };
        }
        Ok(config)
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.url(), "http://127.0.0.1:8080");
        assert_eq!(config.monitored_tables.len(), MONITORED_TABLES.len());
    }

    #[test]
    fn overrides_are_applied() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("ADMIN_HOST", "0.0.0.0"),
            ("ADMIN_PORT", "9090"),
            ("ADMIN_DATABASE", "/srv/crm/prod.sqlite"),
            ("ADMIN_OPEN_BROWSER", "no"),
        ]))
        .unwrap();
        assert_eq!(config.url(), "http://0.0.0.0:9090");
        assert_eq!(config.database, PathBuf::from("/srv/crm/prod.sqlite"));
        assert!(!config.open_browser);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[("ADMIN_PORT", "  ")])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert_eq!(
            ServerConfig::from_lookup(lookup(&[("ADMIN_PORT", "eighty")])),
            Err(ConfigError::InvalidPort {
                name: "ADMIN_PORT",
                value: "eighty".into()
            })
        );
        assert!(matches!(
            ServerConfig::from_lookup(lookup(&[("ADMIN_OPEN_BROWSER", "maybe")])),
            Err(ConfigError::InvalidFlag { .. })
        ));
    }
}
