#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

pub use crate::domain::ports::ConfigProvider;
pub use toml_config::{LayeredConfigProvider, StaticConfigProvider, TomlConfigProvider};

use crate::utils::error::{QuikBakError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_non_negative, validate_path, Validate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const KEY_NAMING_PATTERN: &str = "namingPattern";
pub const KEY_TIMESTAMP_FORMAT: &str = "timestampFormat";
pub const KEY_INCLUDE_TIMESTAMP: &str = "includeTimestamp";
pub const KEY_SHOW_PROGRESS: &str = "showProgressNotification";
pub const KEY_LARGE_FILE_SIZE_MB: &str = "largeFileSizeMB";

pub const DEFAULT_NAMING_PATTERN: &str = "{filename}{timestamp}.{ext}";
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "YYYY-MM-DD_HHmmss";

/// User settings, read fresh for every command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuikBakConfig {
    pub naming_pattern: String,
    pub timestamp_format: String,
    pub include_timestamp: bool,
    pub show_progress_notification: bool,
    #[serde(rename = "largeFileSizeMB")]
    pub large_file_size_mb: f64,
}

impl Default for QuikBakConfig {
    fn default() -> Self {
        Self {
            naming_pattern: DEFAULT_NAMING_PATTERN.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            include_timestamp: true,
            show_progress_notification: true,
            large_file_size_mb: 5.0,
        }
    }
}

impl QuikBakConfig {
    /// Reads every key from `provider`, falling back to the default for keys
    /// the user has not set.
    pub fn from_provider(provider: &dyn ConfigProvider) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            naming_pattern: get_or(provider, KEY_NAMING_PATTERN, defaults.naming_pattern)?,
            timestamp_format: get_or(provider, KEY_TIMESTAMP_FORMAT, defaults.timestamp_format)?,
            include_timestamp: get_or(provider, KEY_INCLUDE_TIMESTAMP, defaults.include_timestamp)?,
            show_progress_notification: get_or(
                provider,
                KEY_SHOW_PROGRESS,
                defaults.show_progress_notification,
            )?,
            large_file_size_mb: get_or(
                provider,
                KEY_LARGE_FILE_SIZE_MB,
                defaults.large_file_size_mb,
            )?,
        })
    }

    /// The configuration as a `[quikbak]` TOML document.
    pub fn to_toml_string(&self) -> Result<String> {
        #[derive(Serialize)]
        struct Document<'a> {
            quikbak: &'a QuikBakConfig,
        }

        toml::to_string_pretty(&Document { quikbak: self }).map_err(|e| QuikBakError::ConfigError {
            message: format!("could not serialize configuration: {}", e),
        })
    }
}

impl Validate for QuikBakConfig {
    fn validate(&self) -> Result<()> {
        validate_path(KEY_NAMING_PATTERN, &self.naming_pattern)?;
        validate_non_empty_string(KEY_NAMING_PATTERN, &self.naming_pattern)?;

        if self.include_timestamp {
            validate_non_empty_string(KEY_TIMESTAMP_FORMAT, &self.timestamp_format)?;
        }

        validate_non_negative(KEY_LARGE_FILE_SIZE_MB, self.large_file_size_mb)
    }
}

/// Returns the value stored under `key`, or `default` when the user has not
/// set it. A value of the wrong type is an error, not a silent fallback.
pub fn get_or<T: DeserializeOwned>(
    provider: &dyn ConfigProvider,
    key: &str,
    default: T,
) -> Result<T> {
    match provider.get(key)? {
        None => Ok(default),
        Some(value) => {
            let shown = value.to_string();
            value
                .try_into()
                .map_err(|e: toml::de::Error| QuikBakError::InvalidConfigValueError {
                    field: key.to_string(),
                    value: shown,
                    reason: e.message().to_string(),
                })
        }
    }
}
