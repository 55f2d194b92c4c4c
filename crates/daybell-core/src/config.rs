//! Daybell configuration system.
//!
//! Values come from built-in defaults, an optional TOML file, and finally the
//! environment. Required credentials are checked by [`AppConfig::validate`]
//! before anything touches the network.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{DaybellError, Result};

pub const ENV_API_KEY: &str = "NOTION_API_KEY";
pub const ENV_DATABASE_ID: &str = "DATABASE_ID";
pub const ENV_WEBHOOK_URL: &str = "DISCORD_WEBHOOK_URL";
pub const ENV_DATE_PROP: &str = "NOTION_DATE_PROP";
pub const ENV_TITLE_PROP: &str = "NOTION_TITLE_PROP";
pub const ENV_NOTIFIED_PROP: &str = "NOTION_NOTIFIED_PROP";
pub const ENV_API_BASE: &str = "NOTION_API_BASE";
pub const ENV_NOTION_VERSION: &str = "NOTION_VERSION";
pub const ENV_DELAY_MS: &str = "DAYBELL_DELAY_MS";
pub const ENV_MESSAGE_TEMPLATE: &str = "DAYBELL_MESSAGE_TEMPLATE";

/// Placeholder substituted with the page title in [`AppConfig::message_template`].
pub const TITLE_PLACEHOLDER: &str = "{title}";

/// Root configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub notion_api_key: String,
    #[serde(default)]
    pub database_id: String,
    #[serde(default)]
    pub discord_webhook_url: String,
    #[serde(default)]
    pub properties: PropertyNames,
    #[serde(default = "default_api_base")]
    pub notion_api_base: String,
    #[serde(default = "default_notion_version")]
    pub notion_version: String,
    #[serde(default = "default_message_template")]
    pub message_template: String,
    /// Pause after each fully processed page, keeps us under Notion's rate limit.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_api_base() -> String { "https://api.notion.com/v1".into() }
fn default_notion_version() -> String { "2022-06-28".into() }
fn default_message_template() -> String {
    "📅 本日の予定: **{title}** が来ています！".into()
}
fn default_delay_ms() -> u64 { 1000 }
fn default_request_timeout() -> u64 { 30 }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            notion_api_key: String::new(),
            database_id: String::new(),
            discord_webhook_url: String::new(),
            properties: PropertyNames::default(),
            notion_api_base: default_api_base(),
            notion_version: default_notion_version(),
            message_template: default_message_template(),
            delay_ms: default_delay_ms(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Names of the database properties Daybell reads and writes.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PropertyNames {
    #[serde(default = "default_date_prop")]
    pub date: String,
    #[serde(default = "default_title_prop")]
    pub title: String,
    #[serde(default = "default_notified_prop")]
    pub notified: String,
}

fn default_date_prop() -> String { "Date".into() }
fn default_title_prop() -> String { "Name".into() }
fn default_notified_prop() -> String { "Notified".into() }

impl Default for PropertyNames {
    fn default() -> Self {
        Self {
            date: default_date_prop(),
            title: default_title_prop(),
            notified: default_notified_prop(),
        }
    }
}

impl AppConfig {
    /// Load config from `path`, or from the default path when none is given.
    /// A missing default file is not an error; a missing explicit file is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(p),
            None => {
                let default = Self::default_path();
                if default.exists() {
                    Self::load_from(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DaybellError::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| DaybellError::Config(format!("Failed to parse config: {e}")))?;
        tracing::debug!("📄 Loaded config from {}", path.display());
        Ok(config)
    }

    /// Overlay values from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup`. Empty values count as unset.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = get(ENV_API_KEY) { self.notion_api_key = v; }
        if let Some(v) = get(ENV_DATABASE_ID) { self.database_id = v; }
        if let Some(v) = get(ENV_WEBHOOK_URL) { self.discord_webhook_url = v; }
        if let Some(v) = get(ENV_DATE_PROP) { self.properties.date = v; }
        if let Some(v) = get(ENV_TITLE_PROP) { self.properties.title = v; }
        if let Some(v) = get(ENV_NOTIFIED_PROP) { self.properties.notified = v; }
        if let Some(v) = get(ENV_API_BASE) { self.notion_api_base = v; }
        if let Some(v) = get(ENV_NOTION_VERSION) { self.notion_version = v; }
        if let Some(v) = get(ENV_MESSAGE_TEMPLATE) { self.message_template = v; }
        if let Some(v) = get(ENV_DELAY_MS) {
            self.delay_ms = v
                .trim()
                .parse()
                .map_err(|e| DaybellError::Config(format!("Invalid {ENV_DELAY_MS} '{v}': {e}")))?;
        }
        Ok(())
    }

    /// Check that everything needed for a run is present.
    pub fn validate(&self) -> Result<()> {
        let required = [
            (ENV_API_KEY, &self.notion_api_key),
            (ENV_DATABASE_ID, &self.database_id),
            (ENV_WEBHOOK_URL, &self.discord_webhook_url),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(DaybellError::Config(format!("Missing env var: {name}")));
            }
        }
        if !self.message_template.contains(TITLE_PLACEHOLDER) {
            return Err(DaybellError::Config(format!(
                "message_template must contain {TITLE_PLACEHOLDER}"
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(DaybellError::Config("request_timeout_secs must be at least 1".into()));
        }
        Ok(())
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get the default config path (~/.daybell/config.toml).
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get the Daybell home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".daybell")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn complete() -> AppConfig {
        let mut config = AppConfig::default();
        config
            .apply_env_with(env(&[
                (ENV_API_KEY, "secret_abc"),
                (ENV_DATABASE_ID, "db123"),
                (ENV_WEBHOOK_URL, "https://discord.com/api/webhooks/1/x"),
            ]))
            .unwrap();
        config
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.properties.date, "Date");
        assert_eq!(config.properties.title, "Name");
        assert_eq!(config.properties.notified, "Notified");
        assert_eq!(config.notion_api_base, "https://api.notion.com/v1");
        assert_eq!(config.notion_version, "2022-06-28");
        assert_eq!(config.delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            database_id = "abc"
            delay_ms = 250

            [properties]
            title = "Title"
        "#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.database_id, "abc");
        assert_eq!(config.delay_ms, 250);
        assert_eq!(config.properties.title, "Title");
        assert_eq!(config.properties.date, "Date");
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.properties, PropertyNames::default());
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env_with(env(&[
                (ENV_DATE_PROP, "When"),
                (ENV_TITLE_PROP, "Event"),
                (ENV_NOTIFIED_PROP, "Sent"),
                (ENV_DELAY_MS, "0"),
            ]))
            .unwrap();
        assert_eq!(config.properties.date, "When");
        assert_eq!(config.properties.title, "Event");
        assert_eq!(config.properties.notified, "Sent");
        assert_eq!(config.delay_ms, 0);
    }

    #[test]
    fn test_empty_env_value_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_env_with(env(&[(ENV_TITLE_PROP, "")])).unwrap();
        assert_eq!(config.properties.title, "Name");
    }

    #[test]
    fn test_bad_delay_is_config_error() {
        let mut config = AppConfig::default();
        let err = config.apply_env_with(env(&[(ENV_DELAY_MS, "soon")])).unwrap_err();
        assert!(matches!(err, DaybellError::Config(_)));
    }

    #[test]
    fn test_validate_complete() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_each_missing_var() {
        for name in [ENV_API_KEY, ENV_DATABASE_ID, ENV_WEBHOOK_URL] {
            let mut config = complete();
            match name {
                ENV_API_KEY => config.notion_api_key.clear(),
                ENV_DATABASE_ID => config.database_id.clear(),
                _ => config.discord_webhook_url.clear(),
            }
            let err = config.validate().unwrap_err();
            assert_eq!(err.to_string(), format!("Missing env var: {name}"));
        }
    }

    #[test]
    fn test_validate_template_needs_title() {
        let mut config = complete();
        config.message_template = "hello".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = complete();
        config.request_timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, DaybellError::Config(_)));
        assert!(err.to_string().contains("request_timeout_secs"));

        let from_file: AppConfig = toml::from_str("request_timeout_secs = 0").unwrap();
        let mut config = complete();
        config.request_timeout_secs = from_file.request_timeout_secs;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let path = std::env::temp_dir().join("daybell-test-no-such-config.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join("daybell-test-config");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "database_id = \"from-file\"\n").unwrap();
        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.database_id, "from-file");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_home_dir() {
        let home = AppConfig::home_dir();
        assert!(home.to_string_lossy().contains("daybell"));
    }
}
