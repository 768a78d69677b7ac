//! Client configuration.
//!
//! Defaults come from `rarebooks.toml`, embedded at build time. Every field
//! can also be set through the builder methods.

use rarebooks_search::Messages;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;

use crate::logging::LogFormat;

const EMBEDDED: &str = include_str!("../rarebooks.toml");

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(String),

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Logging section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `trace`, `debug`, `info`, `warn`, `error` or `off`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Human,
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.level.parse().map_err(|_| ConfigError::Invalid {
            field: "logging.level",
            reason: format!("unknown level `{}`", self.level),
        })
    }
}

/// Configuration for the marketplace client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application name, used in logs.
    pub name: String,
    /// Document title.
    pub title: String,
    /// Prefix for every API request.
    pub api_base_url: String,
    /// Target of the teaser call-to-action.
    pub subscribe_path: String,
    /// Cookie holding the persisted session.
    pub session_cookie: String,
    pub session_days: u32,
    /// Width of the numbered page control.
    pub max_visible_pages: usize,
    pub logging: LoggingConfig,
    pub messages: Messages,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "rarebooks".to_string(),
            title: "Rare Books".to_string(),
            api_base_url: "/api".to_string(),
            subscribe_path: "/subscribe".to_string(),
            session_cookie: "rb_session".to_string(),
            session_days: 7,
            max_visible_pages: 7,
            logging: LoggingConfig::default(),
            messages: Messages::default(),
        }
    }
}

impl AppConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The configuration shipped with the build.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_toml_str(EMBEDDED)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.subscribe_path.starts_with('/') {
            return Err(ConfigError::Invalid {
                field: "subscribe_path",
                reason: "must be an absolute client path".to_string(),
            });
        }
        if self.max_visible_pages == 0 {
            return Err(ConfigError::Invalid {
                field: "max_visible_pages",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.session_cookie.is_empty()
            || self
                .session_cookie
                .contains(|c: char| c.is_whitespace() || ";,=".contains(c))
        {
            return Err(ConfigError::Invalid {
                field: "session_cookie",
                reason: format!("`{}` is not a valid cookie name", self.session_cookie),
            });
        }
        self.logging.level_filter()?;
        Ok(())
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_subscribe_path(mut self, path: impl Into<String>) -> Self {
        self.subscribe_path = path.into();
        self
    }

    pub fn with_max_visible_pages(mut self, pages: usize) -> Self {
        self.max_visible_pages = pages;
        self
    }

    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = AppConfig::default();

        assert_eq!(config.name, "rarebooks");
        assert_eq!(config.api_base_url, "/api");
        assert_eq!(config.subscribe_path, "/subscribe");
        assert_eq!(config.max_visible_pages, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_embedded_config_loads() {
        let config = AppConfig::embedded().unwrap();

        assert_eq!(config.title, "Редкие книги");
        assert_eq!(config.logging.format, LogFormat::Human);
        assert_eq!(config.messages, Messages::default());
    }

    #[test]
    fn test_config_builder_chain() {
        let config = AppConfig::new("shop")
            .with_title("Shop")
            .with_api_base_url("https://api.example")
            .with_subscribe_path("/plans")
            .with_max_visible_pages(5);

        assert_eq!(config.name, "shop");
        assert_eq!(config.title, "Shop");
        assert_eq!(config.api_base_url, "https://api.example");
        assert_eq!(config.subscribe_path, "/plans");
        assert_eq!(config.max_visible_pages, 5);
    }

    #[test]
    fn test_message_override_from_toml() {
        let config = AppConfig::from_toml_str(
            r#"
            [messages]
            nothing_found = "Nothing here"
            "#,
        )
        .unwrap();

        assert_eq!(config.messages.nothing_found, "Nothing here");
        assert_eq!(config.messages.subscribe, Messages::default().subscribe);
        assert_eq!(config.name, "rarebooks");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            AppConfig::from_toml_str("max_visible_pages = 0"),
            Err(ConfigError::Invalid { field: "max_visible_pages", .. })
        ));
        assert!(matches!(
            AppConfig::from_toml_str("subscribe_path = \"subscribe\""),
            Err(ConfigError::Invalid { field: "subscribe_path", .. })
        ));
        assert!(matches!(
            AppConfig::from_toml_str("[logging]\nlevel = \"loud\""),
            Err(ConfigError::Invalid { field: "logging.level", .. })
        ));
        assert!(matches!(
            AppConfig::from_toml_str("session_cookie = \"a b\""),
            Err(ConfigError::Invalid { field: "session_cookie", .. })
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            AppConfig::from_toml_str("name = "),
            Err(ConfigError::Parse(_))
        ));
    }
}
