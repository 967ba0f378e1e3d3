pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{ConsoleReporter, ZipArchiveService};
pub use app::CommandHandlers;
pub use config::{LayeredConfigProvider, QuikBakConfig, StaticConfigProvider, TomlConfigProvider};
pub use domain::model::{CommandKind, CommandOutcome, ProgressNeed};
pub use utils::error::{QuikBakError, Result};
