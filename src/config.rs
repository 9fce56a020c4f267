use std::env;

use crate::logger::{LogFormat, LogLevel, LoggerConfig};

/// The generation endpoint the runner posts to.
pub const DEFAULT_ENDPOINT: &str = "https://aiart-zroo.onrender.com/api/generate";

pub const LOG_LEVEL_ENV: &str = "AIART_LOG_LEVEL";
pub const LOG_FORMAT_ENV: &str = "AIART_LOG_FORMAT";

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub endpoint: String,
    pub user_agent: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

impl RunnerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Diagnostics settings. These only shape stderr logging, never the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSettings {
    pub level: Option<LogLevel>,
    pub format: Option<LogFormat>,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_values(env::var(LOG_LEVEL_ENV).ok(), env::var(LOG_FORMAT_ENV).ok())
    }

    /// Unknown values fall back to the logger defaults.
    pub fn from_values(level: Option<String>, format: Option<String>) -> Self {
        LogSettings {
            level: level.as_deref().and_then(LogLevel::parse),
            format: format.as_deref().and_then(LogFormat::parse),
        }
    }

    pub fn logger_config(&self) -> LoggerConfig {
        let mut config = LoggerConfig::default();
        if let Some(level) = self.level {
            config = config.with_level(level);
        }
        if let Some(format) = self.format {
            config = config.with_format(format);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint_is_hard_coded() {
        let config = RunnerConfig::new();
        assert_eq!(config.endpoint, "https://aiart-zroo.onrender.com/api/generate");
        assert!(config.user_agent.starts_with("aiart-runner/"));
    }

    #[test]
    fn test_with_endpoint_overrides() {
        let config = RunnerConfig::new().with_endpoint("http://127.0.0.1:9/api/generate");
        assert_eq!(config.endpoint, "http://127.0.0.1:9/api/generate");
    }

    #[test]
    fn test_log_settings_from_values() {
        let settings = LogSettings::from_values(Some("debug".into()), Some("json".into()));
        assert_eq!(settings.level, Some(LogLevel::Debug));
        assert_eq!(settings.format, Some(LogFormat::Json));

        let config = settings.logger_config();
        assert_eq!(config.min_level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.show_colors);
    }

    #[test]
    fn test_unknown_log_settings_use_defaults() {
        let settings = LogSettings::from_values(Some("loud".into()), Some("xml".into()));
        assert_eq!(settings, LogSettings::default());

        let config = LogSettings::from_values(None, None).logger_config();
        assert_eq!(config.min_level, LogLevel::Warn);
        assert_eq!(config.format, LogFormat::Pretty);
    }
}
