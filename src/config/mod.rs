//! Configuration management.
//!
//! Settings come from a TOML file and can be overridden by environment
//! variables:
//!
//! | Variable | Setting |
//! |----------|---------|
//! | `CASEFINDER_CONFIG_PATH` | config file location |
//! | `CASEFINDER_RECORDS` | `records_path` |
//! | `CASEFINDER_LOG_LEVEL` | `logging.level` |
//! | `CASEFINDER_LOG_FORMAT` | `logging.format` |
//! | `CASEFINDER_LOG_FILE` | `logging.file` |

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "CASEFINDER_CONFIG_PATH";

/// Main configuration for casefinder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CasefinderConfig {
    /// Default records file, used when `search` is given none.
    pub records_path: Option<PathBuf>,
    /// Default output format for `search`.
    pub default_format: String,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Logging section of the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Level or `EnvFilter` directive (e.g. `info`, `casefinder=debug`).
    pub level: Option<String>,
    /// `pretty` or `json`.
    pub format: Option<String>,
    /// Log file path; logs go to stderr when unset.
    pub file: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Records file.
    pub records_path: Option<String>,
    /// Output format.
    pub default_format: Option<String>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
}

impl Default for CasefinderConfig {
    fn default() -> Self {
        Self {
            records_path: None,
            default_format: "table".to_string(),
            logging: LoggingSettings::default(),
        }
    }
}

impl CasefinderConfig {
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
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

        Self::from_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed.
    pub fn from_toml(contents: &str) -> crate::Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/casefinder/` on macOS)
    /// 2. XDG config dir (`~/.config/casefinder/` for Unix compatibility)
    ///
    /// Returns default configuration if no config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let candidates = [
            base_dirs.config_dir().join("casefinder").join("config.toml"),
            base_dirs
                .home_dir()
                .join(".config")
                .join("casefinder")
                .join("config.toml"),
        ];

        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
                },
            }
        }

        Self::default()
    }

    /// Applies `CASEFINDER_*` environment overrides.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    #[must_use]
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = get("CASEFINDER_RECORDS") {
            self.records_path = Some(PathBuf::from(path));
        }
        if let Some(level) = get("CASEFINDER_LOG_LEVEL") {
            self.logging.level = Some(level);
        }
        if let Some(format) = get("CASEFINDER_LOG_FORMAT") {
            self.logging.format = Some(format);
        }
        if let Some(file) = get("CASEFINDER_LOG_FILE") {
            self.logging.file = Some(PathBuf::from(file));
        }
        self
    }

    /// Converts a `ConfigFile` to `CasefinderConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(records_path) = file.records_path {
            config.records_path = Some(PathBuf::from(records_path));
        }
        if let Some(format) = file.default_format {
            config.default_format = format;
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        config
    }

    /// Sets the records path.
    #[must_use]
    pub fn with_records_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.records_path = Some(path.into());
        self
    }
}
