use crate::config::toml_config::{LayeredConfigProvider, TomlConfigProvider, DEFAULT_CONFIG_FILE};
use crate::config::{
    KEY_INCLUDE_TIMESTAMP, KEY_LARGE_FILE_SIZE_MB, KEY_NAMING_PATTERN, KEY_SHOW_PROGRESS,
    KEY_TIMESTAMP_FORMAT,
};
use crate::domain::model::CommandKind;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "quikbak")]
#[command(about = "Timestamped backups, zip compression and extraction for files and folders")]
pub struct CliConfig {
    /// Path to the TOML settings file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Override `namingPattern`
    #[arg(long, global = true)]
    pub naming_pattern: Option<String>,

    /// Override `timestampFormat`
    #[arg(long, global = true)]
    pub timestamp_format: Option<String>,

    /// Leave the timestamp out of backup and archive names
    #[arg(long, global = true)]
    pub no_timestamp: bool,

    /// Never show progress output
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Override `largeFileSizeMB`
    #[arg(long, global = true)]
    pub large_file_size_mb: Option<f64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Back up a file or folder next to the original
    Backup { path: PathBuf },
    /// Compress a file or folder to a zip archive
    Compress { path: PathBuf },
    /// Extract a zip archive into a sibling folder
    Decompress { path: PathBuf },
    /// Inspect or create the settings file
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective settings
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Write the default settings file
    Init {
        #[arg(long)]
        force: bool,
    },
}

impl Command {
    /// The file command and its target, if this is one.
    pub fn file_command(&self) -> Option<(CommandKind, &Path)> {
        match self {
            Command::Backup { path } => Some((CommandKind::Backup, path)),
            Command::Compress { path } => Some((CommandKind::Compress, path)),
            Command::Decompress { path } => Some((CommandKind::Decompress, path)),
            Command::Config(_) => None,
        }
    }
}

impl CliConfig {
    /// Settings file with the command-line overrides layered on top.
    pub fn config_provider(&self) -> LayeredConfigProvider<TomlConfigProvider> {
        let mut provider = LayeredConfigProvider::new(TomlConfigProvider::new(&self.config));

        if let Some(pattern) = &self.naming_pattern {
            provider = provider.with_override(KEY_NAMING_PATTERN, pattern.as_str());
        }
        if let Some(format) = &self.timestamp_format {
            provider = provider.with_override(KEY_TIMESTAMP_FORMAT, format.as_str());
        }
        if self.no_timestamp {
            provider = provider.with_override(KEY_INCLUDE_TIMESTAMP, false);
        }
        if self.no_progress {
            provider = provider.with_override(KEY_SHOW_PROGRESS, false);
        }
        if let Some(size) = self.large_file_size_mb {
            provider = provider.with_override(KEY_LARGE_FILE_SIZE_MB, size);
        }

        provider
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("config", &self.config.to_string_lossy())?;
        if let Some((_, path)) = self.command.file_command() {
            validate_path("path", &path.to_string_lossy())?;
        }
        Ok(())
    }
}
