use crate::adapters::zip_archive::run_blocking;
use crate::config::{QuikBakConfig, KEY_INCLUDE_TIMESTAMP, KEY_NAMING_PATTERN};
use crate::core::backup_path::{build_backup_path, timestamp_suffix};
use crate::core::progress::check_progress_need;
use crate::core::replicate::replicate_folder;
use crate::core::sanitize::{sanitize_anchored, sanitize_path};
use crate::core::timestamp::{format_timestamp_now, now_local, FOLDER_TIMESTAMP_FORMAT};
use crate::domain::model::{display_name, CommandKind, CommandOutcome, PathSegments, ProgressNeed};
use crate::domain::ports::{ArchiveService, ConfigProvider, Reporter};
use crate::utils::error::{QuikBakError, Result};
use crate::utils::validation::Validate;
use std::fs;
use std::future::Future;
use std::path::{Component, Path, PathBuf};

const ZIP_SUFFIX: &str = ".zip";

/// Orchestrates the backup, compress and decompress commands.
///
/// Every command reads a fresh configuration from the provider, reports its
/// own success or failure through the reporter, and also hands the result
/// back so the caller can pick an exit code.
pub struct CommandHandlers<C: ConfigProvider, A: ArchiveService, R: Reporter> {
    config: C,
    archive: A,
    reporter: R,
}

impl<C: ConfigProvider, A: ArchiveService, R: Reporter> CommandHandlers<C, A, R> {
    pub fn new(config: C, archive: A, reporter: R) -> Self {
        Self {
            config,
            archive,
            reporter,
        }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub async fn run(&self, command: CommandKind, path: &Path) -> Result<CommandOutcome> {
        tracing::debug!("Running {} on {}", command, path.display());
        match command {
            CommandKind::Backup => self.backup(path).await,
            CommandKind::Compress => self.compress(path).await,
            CommandKind::Decompress => self.decompress(path).await,
        }
    }

    fn load_config(&self) -> Result<QuikBakConfig> {
        let config = QuikBakConfig::from_provider(&self.config)?;
        config.validate()?;
        Ok(config)
    }

    fn fail(&self, context: &str, error: QuikBakError) -> QuikBakError {
        self.reporter.error(&format!("{}: {}", context, error));
        error
    }

    async fn with_progress<T, F>(
        &self,
        need: ProgressNeed,
        title: &str,
        start: Option<&str>,
        done: Option<&str>,
        work: F,
    ) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if !need.is_required() {
            return work.await;
        }

        self.reporter.begin(title);
        self.reporter.report(0, start);
        let result = work.await;
        if result.is_ok() {
            self.reporter.report(100, done);
        }
        self.reporter.finish();
        result
    }

    /// Backs up a file next to itself using the naming pattern, or a folder
    /// as a sibling `<name>_<YYYY-MM-DD_HHmmss>` copy.
    pub async fn backup(&self, path: &Path) -> Result<CommandOutcome> {
        const FAILED: &str = "Failed to create backup";

        let config = self.load_config().map_err(|e| self.fail(FAILED, e))?;
        let source = sanitize_anchored(path);
        let metadata = stat_source(&source).map_err(|e| self.fail(FAILED, e))?;
        let progress = check_progress_need(&source, &config);

        if metadata.is_dir() {
            let dir_name = sanitize_path(&display_name(&source));
            let parent = sanitize_anchored(source.parent().unwrap_or(Path::new("")));
            let backup_path = parent.join(format!(
                "{}_{}",
                dir_name,
                format_timestamp_now(FOLDER_TIMESTAMP_FORMAT)
            ));

            let (from, to) = (source.clone(), backup_path.clone());
            let stats = self
                .with_progress(
                    progress,
                    &format!("Backing up folder: {}", dir_name),
                    None,
                    None,
                    run_blocking(move || replicate_folder(&from, &to)),
                )
                .await
                .map_err(|e| self.fail("Failed to backup folder", e))?;

            tracing::info!(
                "📁 {} -> {} ({} files, {} bytes)",
                source.display(),
                backup_path.display(),
                stats.files,
                stats.bytes
            );
            self.reporter.info(&format!(
                "Folder backup created: {}",
                display_name(&backup_path)
            ));

            return Ok(CommandOutcome {
                command: CommandKind::Backup,
                source,
                output: backup_path,
                is_directory: true,
                progress_shown: progress.is_required(),
            });
        }

        let backup_path = build_backup_path(&source, &config);
        if backup_path == source {
            return Err(self.fail(
                FAILED,
                QuikBakError::ConfigValidationError {
                    field: KEY_NAMING_PATTERN.to_string(),
                    message: format!("backup name resolves to the source {}", source.display()),
                },
            ));
        }

        let (from, to) = (source.clone(), backup_path.clone());
        let copied = self
            .with_progress(
                progress,
                &format!("Backing up: {}", display_name(&source)),
                None,
                None,
                run_blocking(move || {
                    fs::copy(&from, &to).map_err(|e| QuikBakError::io_at(&to, e))
                }),
            )
            .await
            .map_err(|e| self.fail(FAILED, e))?;

        tracing::info!(
            "📄 {} -> {} ({} bytes)",
            source.display(),
            backup_path.display(),
            copied
        );
        self.reporter
            .info(&format!("Backup created: {}", display_name(&backup_path)));

        Ok(CommandOutcome {
            command: CommandKind::Backup,
            source,
            output: backup_path,
            is_directory: false,
            progress_shown: progress.is_required(),
        })
    }

    /// Zips a file or folder into `<parent>/<stem>[_timestamp].zip`.
    pub async fn compress(&self, path: &Path) -> Result<CommandOutcome> {
        const FAILED: &str = "Failed to compress";

        let config = self.load_config().map_err(|e| self.fail(FAILED, e))?;
        let source = sanitize_anchored(path);
        let metadata = stat_source(&source).map_err(|e| self.fail(FAILED, e))?;
        let is_directory = metadata.is_dir();
        let kind = if is_directory { "folder" } else { "file" };

        let zip_path = compress_destination(&source, &config);
        if zip_path == source {
            return Err(self.fail(
                &format!("Failed to compress {}", kind),
                QuikBakError::ConfigValidationError {
                    field: KEY_INCLUDE_TIMESTAMP.to_string(),
                    message: format!("archive name resolves to the source {}", source.display()),
                },
            ));
        }

        let base_name = sanitize_path(&display_name(&source));
        let progress = check_progress_need(&source, &config);

        let summary = self
            .with_progress(
                progress,
                &format!("Compressing {}: {}", kind, base_name),
                Some("Starting compression..."),
                Some("Compression complete"),
                self.archive.compress(&source, &zip_path),
            )
            .await
            .map_err(|e| self.fail(&format!("Failed to compress {}", kind), e))?;

        tracing::info!(
            "🗜️ {} -> {} ({} entries, {} bytes)",
            source.display(),
            zip_path.display(),
            summary.entries,
            summary.bytes
        );
        self.reporter.info(&format!(
            "{} compressed: {}",
            if is_directory { "Folder" } else { "File" },
            display_name(&zip_path)
        ));

        Ok(CommandOutcome {
            command: CommandKind::Compress,
            source,
            output: zip_path,
            is_directory,
            progress_shown: progress.is_required(),
        })
    }

    /// Extracts `<parent>/<name>.zip` into `<parent>/<name>/`.
    pub async fn decompress(&self, path: &Path) -> Result<CommandOutcome> {
        const FAILED: &str = "Failed to extract";

        let source = sanitize_anchored(path);
        let Some(extract_path) = extract_destination(&source) else {
            self.reporter.info("No zip file selected to extract");
            return Err(QuikBakError::NotAnArchive { path: source });
        };

        let config = self.load_config().map_err(|e| self.fail(FAILED, e))?;

        if !extract_path.exists() {
            fs::create_dir_all(&extract_path)
                .map_err(|e| self.fail(FAILED, QuikBakError::io_at(&extract_path, e)))?;
        }

        let progress = check_progress_need(&source, &config);
        let summary = self
            .with_progress(
                progress,
                &format!("Extracting: {}", display_name(&source)),
                Some("Starting extraction..."),
                Some("Extraction complete"),
                self.archive.extract(&source, &extract_path),
            )
            .await
            .map_err(|e| self.fail(FAILED, e))?;

        tracing::info!(
            "📦 {} -> {} ({} entries, {} bytes)",
            source.display(),
            extract_path.display(),
            summary.entries,
            summary.bytes
        );
        self.reporter
            .info(&format!("Extracted to: {}", display_name(&extract_path)));

        Ok(CommandOutcome {
            command: CommandKind::Decompress,
            source,
            output: extract_path,
            is_directory: true,
            progress_shown: progress.is_required(),
        })
    }
}

fn stat_source(source: &Path) -> Result<fs::Metadata> {
    fs::metadata(source).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => QuikBakError::SourceNotFound {
            path: source.to_path_buf(),
        },
        _ => QuikBakError::io_at(source, e),
    })
}

fn compress_destination(source: &Path, config: &QuikBakConfig) -> PathBuf {
    let base_name = sanitize_path(&display_name(source));
    let parent = sanitize_anchored(source.parent().unwrap_or(Path::new("")));
    let stem = PathSegments::parse(Path::new(&base_name)).name;
    let suffix = timestamp_suffix(config, &now_local());
    parent.join(format!("{}{}{}", stem, suffix, ZIP_SUFFIX))
}

/// Folder a zip is extracted into, or `None` when `source` is not a `.zip`
/// or nothing of its name is left to name a folder after.
fn extract_destination(source: &Path) -> Option<PathBuf> {
    let file_name = display_name(source);
    let split = file_name.len().checked_sub(ZIP_SUFFIX.len())?;
    if !file_name.is_char_boundary(split) || !file_name[split..].eq_ignore_ascii_case(ZIP_SUFFIX) {
        return None;
    }

    let stem = sanitize_path(&file_name[..split]);
    if Path::new(&stem)
        .components()
        .all(|c| matches!(c, Component::CurDir))
    {
        return None;
    }

    let parent = sanitize_anchored(source.parent().unwrap_or(Path::new("")));
    Some(parent.join(stem))
}
