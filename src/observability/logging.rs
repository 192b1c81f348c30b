//! Structured logging settings.

use crate::config::LoggingSettings;
use std::path::PathBuf;

/// Log line layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line human-readable output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
    /// Single-line human-readable output.
    Compact,
}

impl LogFormat {
    /// Returns the format as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
            Self::Compact => "compact",
        }
    }

    /// Parses a format name. Unknown names fall back to pretty.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// `EnvFilter` directive.
    pub filter: String,
    /// Append logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Builds the configuration from config file settings and the process environment.
    ///
    /// `RUST_LOG` wins over the configured level.
    #[must_use]
    pub fn from_settings(settings: Option<&LoggingSettings>, verbose: bool) -> Self {
        Self::resolve(settings, verbose, std::env::var("RUST_LOG").ok())
    }

    fn resolve(settings: Option<&LoggingSettings>, verbose: bool, rust_log: Option<String>) -> Self {
        let default_level = if verbose { "debug" } else { "info" };
        let configured = settings.and_then(|s| s.level.clone());
        let filter = rust_log
            .filter(|v| !v.trim().is_empty())
            .or(configured)
            .unwrap_or_else(|| default_level.to_string());

        Self {
            format: settings
                .and_then(|s| s.format.as_deref())
                .map(LogFormat::parse)
                .unwrap_or_default(),
            filter,
            file: settings.and_then(|s| s.file.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("pretty", LogFormat::Pretty)]
    #[test_case("JSON", LogFormat::Json)]
    #[test_case(" compact ", LogFormat::Compact)]
    #[test_case("xml", LogFormat::Pretty)]
    fn test_parse_format(input: &str, expected: LogFormat) {
        assert_eq!(LogFormat::parse(input), expected);
    }

    #[test]
    fn test_format_names_parse_back() {
        for format in [LogFormat::Pretty, LogFormat::Json, LogFormat::Compact] {
            assert_eq!(LogFormat::parse(format.as_str()), format);
        }
    }

    #[test]
    fn test_defaults_follow_verbosity() {
        assert_eq!(LoggingConfig::resolve(None, false, None).filter, "info");
        assert_eq!(LoggingConfig::resolve(None, true, None).filter, "debug");
    }

    #[test]
    fn test_rust_log_wins() {
        let settings = LoggingSettings {
            format: Some("json".to_string()),
            level: Some("warn".to_string()),
            file: Some(PathBuf::from("app.log")),
        };

        let config = LoggingConfig::resolve(Some(&settings), false, None);
        assert_eq!(config.filter, "warn");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.file, Some(PathBuf::from("app.log")));

        let config = LoggingConfig::resolve(Some(&settings), true, Some("trace".to_string()));
        assert_eq!(config.filter, "trace");
    }
}
