//! Configuration management.

use crate::io::DumpOptions;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the data file.
pub const DATA_FILE_ENV: &str = "STOCKROOM_DATA_FILE";

/// Data file used when nothing else names one.
pub const DEFAULT_DATA_FILE: &str = "products.csv";

/// Main configuration for stockroom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockroomConfig {
    /// Path to the collection file.
    pub data_file: PathBuf,
    /// Collection file layout.
    pub dump: DumpOptions,
    /// Logging settings, if configured.
    pub logging: Option<LoggingSettings>,
}

/// `[logging]` section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoggingSettings {
    /// Output format: `pretty`, `json` or `compact`.
    pub format: Option<String>,
    /// Filter directive such as `info` or `stockroom=debug`.
    pub level: Option<String>,
    /// Log file path. Logs go to stderr when unset.
    pub file: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Collection file path.
    pub data_file: Option<String>,
    /// Collection file layout.
    pub dump: Option<DumpOptions>,
    /// Logging configuration.
    pub logging: Option<LoggingSettings>,
}

impl Default for StockroomConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            dump: DumpOptions::default(),
            logging: None,
        }
    }
}

impl StockroomConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;

        Self::parse(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid config file.
    pub fn parse(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| Error::OperationFailed {
            operation: "parse_config_file".to_string(),
            cause: e.to_string(),
        })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/stockroom/` on macOS)
    /// 2. XDG config dir (`~/.config/stockroom/` for Unix compatibility)
    ///
    /// Returns default configuration if no config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let candidates = [
            base_dirs.config_dir().join("stockroom").join("config.toml"),
            base_dirs
                .home_dir()
                .join(".config")
                .join("stockroom")
                .join("config.toml"),
        ];

        for path in candidates.iter().filter(|path| path.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable config file");
                },
            }
        }

        Self::default()
    }

    /// Converts a `ConfigFile` to `StockroomConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(data_file) = file.data_file.filter(|path| !path.trim().is_empty()) {
            config.data_file = PathBuf::from(data_file);
        }
        if let Some(dump) = file.dump {
            config.dump = dump;
        }
        config.logging = file.logging;

        config
    }

    /// Applies overrides from the process environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_env_lookup(|key| std::env::var(key).ok())
    }

    fn with_env_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(DATA_FILE_ENV).filter(|path| !path.trim().is_empty()) {
            self.data_file = PathBuf::from(path);
        }
        self
    }

    /// Sets the data file path.
    #[must_use]
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }
}
