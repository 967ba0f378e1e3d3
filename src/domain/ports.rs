use crate::domain::model::ArchiveSummary;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Source of user settings. Implementations re-read their backing store on
/// every call; nothing is cached.
pub trait ConfigProvider: Send + Sync {
    /// Returns the user-set value for `key`, or `None` when it is unset.
    fn get(&self, key: &str) -> Result<Option<toml::Value>>;
}

#[async_trait]
pub trait ArchiveService: Send + Sync {
    /// Writes `source` (a file or a folder) into a new zip at `destination`.
    async fn compress(&self, source: &Path, destination: &Path) -> Result<ArchiveSummary>;

    /// Unpacks every entry of `archive` below `destination`.
    async fn extract(&self, archive: &Path, destination: &Path) -> Result<ArchiveSummary>;
}

/// Notification and progress surface for command handlers.
pub trait Reporter: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
    fn begin(&self, title: &str);
    fn report(&self, increment: u8, message: Option<&str>);
    fn finish(&self);
}
