use crate::domain::model::{display_name, ArchiveSummary};
use crate::domain::ports::ArchiveService;
use crate::utils::error::{QuikBakError, Result};
use async_trait::async_trait;
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Zip backend. The blocking zip work runs on tokio's blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiveService;

impl ZipArchiveService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ArchiveService for ZipArchiveService {
    async fn compress(&self, source: &Path, destination: &Path) -> Result<ArchiveSummary> {
        let source = source.to_path_buf();
        let destination = destination.to_path_buf();
        run_blocking(move || compress_path(&source, &destination)).await
    }

    async fn extract(&self, archive: &Path, destination: &Path) -> Result<ArchiveSummary> {
        let archive = archive.to_path_buf();
        let destination = destination.to_path_buf();
        run_blocking(move || extract_archive(&archive, &destination)).await
    }
}

/// Runs blocking filesystem work off the async executor.
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| QuikBakError::TaskFailed {
            message: e.to_string(),
        })?
}

/// Writes `source` into a new zip at `destination`. A file becomes one entry
/// named after it; a folder contributes its contents relative to itself.
pub fn compress_path(source: &Path, destination: &Path) -> Result<ArchiveSummary> {
    let metadata = fs::metadata(source).map_err(|e| QuikBakError::io_at(source, e))?;

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| QuikBakError::io_at(parent, e))?;
    }

    let file = File::create(destination).map_err(|e| QuikBakError::io_at(destination, e))?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut summary = ArchiveSummary::default();

    if metadata.is_dir() {
        add_directory_contents(&mut writer, source, "", options, &mut summary)?;
    } else {
        add_file(&mut writer, source, &display_name(source), options, &mut summary)?;
    }

    writer.finish()?;

    tracing::debug!(
        "Wrote {} entries ({} bytes) to {}",
        summary.entries,
        summary.bytes,
        destination.display()
    );
    Ok(summary)
}

fn add_directory_contents(
    writer: &mut ZipWriter<File>,
    dir: &Path,
    prefix: &str,
    options: SimpleFileOptions,
    summary: &mut ArchiveSummary,
) -> Result<()> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| QuikBakError::io_at(dir, e))?
        .collect::<io::Result<Vec<_>>>()
        .map_err(|e| QuikBakError::io_at(dir, e))?;
    // 固定順序，讓產出的壓縮檔可重現
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        let entry_name = if prefix.is_empty() {
            name
        } else {
            format!("{}/{}", prefix, name)
        };

        let metadata = fs::metadata(&path).map_err(|e| QuikBakError::io_at(&path, e))?;
        let is_link = entry
            .file_type()
            .map_err(|e| QuikBakError::io_at(&path, e))?
            .is_symlink();
        if is_link && metadata.is_dir() {
            tracing::warn!("Skipping linked folder {}", path.display());
            continue;
        }

        if metadata.is_dir() {
            writer.add_directory(format!("{}/", entry_name), options)?;
            summary.entries += 1;
            add_directory_contents(writer, &path, &entry_name, options, summary)?;
        } else {
            add_file(writer, &path, &entry_name, options, summary)?;
        }
    }

    Ok(())
}

fn add_file(
    writer: &mut ZipWriter<File>,
    path: &Path,
    entry_name: &str,
    options: SimpleFileOptions,
    summary: &mut ArchiveSummary,
) -> Result<()> {
    writer.start_file(entry_name, options)?;
    let mut src = File::open(path).map_err(|e| QuikBakError::io_at(path, e))?;
    let copied = io::copy(&mut src, writer).map_err(|e| QuikBakError::io_at(path, e))?;

    summary.entries += 1;
    summary.bytes += copied;
    Ok(())
}

/// Relative path of an entry below the extraction root, or `None` when the
/// name is absolute or climbs out with `..`.
fn safe_entry_path(name: &str) -> Option<PathBuf> {
    let mut clean = PathBuf::new();
    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(clean)
}

/// Unpacks every entry of `archive` below `destination`, overwriting files
/// that already exist. All entry names are checked before anything is
/// written, so an archive with a single unsafe name leaves no trace.
pub fn extract_archive(archive: &Path, destination: &Path) -> Result<ArchiveSummary> {
    let file = File::open(archive).map_err(|e| QuikBakError::io_at(archive, e))?;
    let mut zip = ZipArchive::new(file)?;

    if let Some(unsafe_name) = zip.file_names().find(|name| safe_entry_path(name).is_none()) {
        return Err(QuikBakError::UnsafeArchiveEntry {
            name: unsafe_name.to_string(),
        });
    }

    fs::create_dir_all(destination).map_err(|e| QuikBakError::io_at(destination, e))?;
    let mut summary = ArchiveSummary::default();

    for idx in 0..zip.len() {
        let mut entry = zip.by_index(idx)?;
        let relative = safe_entry_path(entry.name()).ok_or_else(|| {
            QuikBakError::UnsafeArchiveEntry {
                name: entry.name().to_string(),
            }
        })?;
        let out_path = destination.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|e| QuikBakError::io_at(&out_path, e))?;
        } else {
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent).map_err(|e| QuikBakError::io_at(parent, e))?;
            }
            let mut out = File::create(&out_path).map_err(|e| QuikBakError::io_at(&out_path, e))?;
            let copied =
                io::copy(&mut entry, &mut out).map_err(|e| QuikBakError::io_at(&out_path, e))?;
            summary.bytes += copied;
        }
        summary.entries += 1;
    }

    tracing::debug!(
        "Extracted {} entries ({} bytes) into {}",
        summary.entries,
        summary.bytes,
        destination.display()
    );
    Ok(summary)
}
