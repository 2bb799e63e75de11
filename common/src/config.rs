//! Console-wide settings shared by the frontend and its tests.

use serde::{Deserialize, Serialize};

use crate::validation::ValidationErrors;

pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_REFRESH_SECS: u32 = 30;
pub const REFRESH_CHOICES: [u32; 4] = [5, 10, 30, 60];
pub const MONITORED_TABLES: [&str; 7] = [
    "contacts",
    "companies",
    "deals",
    "activities",
    "email_templates",
    "campaigns",
    "custom_fields",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleConfig {
    /// Prefix of the backend routes, without trailing slash.
    pub api_base: String,
    pub monitored_tables: Vec<String>,
    pub refresh: RefreshPolicy,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            monitored_tables: MONITORED_TABLES.iter().map(|t| t.to_string()).collect(),
            refresh: RefreshPolicy::default(),
        }
    }
}

impl ConsoleConfig {
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn count_url(&self, table: &str) -> String {
        format!("{}/tables/{table}/count", self.api_base)
    }

    pub fn tables(&self) -> Vec<&str> {
        self.monitored_tables.iter().map(String::as_str).collect()
    }
}

/// Auto-refresh settings of the performance page. Off by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshPolicy {
    pub enabled: bool,
    pub interval_secs: u32,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: DEFAULT_REFRESH_SECS,
        }
    }
}

impl RefreshPolicy {
    /// Only the offered choices are accepted.
    pub fn set_interval(&mut self, secs: u32) -> Result<(), ValidationErrors> {
        if REFRESH_CHOICES.contains(&secs) {
            self.interval_secs = secs;
            Ok(())
        } else {
            Err(ValidationErrors::single(
                "interval_secs",
                format!("Intervalo no soportado: {secs} s"),
            ))
        }
    }

    pub fn interval_millis(&self) -> u32 {
        self.interval_secs.saturating_mul(1000)
    }

    /// Interval the timer should run with, or `None` when refresh is off.
    pub fn active_interval(&self) -> Option<u32> {
        self.enabled.then(|| self.interval_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.count_url("deals"), "/api/tables/deals/count");
        assert_eq!(config.tables().len(), 7);
        assert_eq!(config.refresh.active_interval(), None);
    }

    #[test]
    fn api_base_is_normalised() {
        let config = ConsoleConfig::default().with_api_base("http://localhost:8080/api/");
        assert_eq!(
            config.count_url("contacts"),
            "http://localhost:8080/api/tables/contacts/count"
        );
    }

    #[test]
    fn interval_choices_are_enforced() {
        let mut refresh = RefreshPolicy::default();
        assert!(refresh.set_interval(7).is_err());
        assert_eq!(refresh.interval_secs, DEFAULT_REFRESH_SECS);

        refresh.set_interval(10).unwrap();
        refresh.enabled = true;
        assert_eq!(refresh.active_interval(), Some(10_000));
    }
}
