use crate::core::sanitize::{sanitize_anchored, sanitize_path};
use crate::domain::model::ReplicationStats;
use crate::utils::error::{QuikBakError, Result};
use std::fs;
use std::path::Path;

/// Recursively copies `source` into `target`.
///
/// The copy is additive: files already in `target` that have no counterpart in
/// `source` are left alone, same-named files are overwritten. The first
/// filesystem error aborts the walk and is returned as-is; anything copied up
/// to that point stays in place.
pub fn replicate_folder(source: &Path, target: &Path) -> Result<ReplicationStats> {
    let source = sanitize_anchored(source);
    let target = sanitize_anchored(target);

    let mut stats = ReplicationStats::default();
    replicate_into(&source, &target, &mut stats)?;

    tracing::debug!(
        "Replicated {} -> {} ({} files, {} directories, {} bytes)",
        source.display(),
        target.display(),
        stats.files,
        stats.directories,
        stats.bytes
    );

    Ok(stats)
}

fn replicate_into(source: &Path, target: &Path, stats: &mut ReplicationStats) -> Result<()> {
    if !target.exists() {
        fs::create_dir_all(target).map_err(|e| QuikBakError::io_at(target, e))?;
        stats.directories += 1;
    }

    let entries = fs::read_dir(source).map_err(|e| QuikBakError::io_at(source, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| QuikBakError::io_at(source, e))?;
        let raw_name = entry.file_name();
        let name = sanitize_path(&raw_name.to_string_lossy());

        if name.is_empty() {
            tracing::warn!(
                "Skipping {:?} in {}: nothing left of the name after sanitizing",
                raw_name,
                source.display()
            );
            continue;
        }

        let source_item = entry.path();
        let target_item = target.join(&name);

        let file_type = entry
            .file_type()
            .map_err(|e| QuikBakError::io_at(&source_item, e))?;
        let is_dir = if file_type.is_symlink() {
            // 連結到資料夾時不跟隨，避免指回上層造成無限遞迴
            let resolved =
                fs::metadata(&source_item).map_err(|e| QuikBakError::io_at(&source_item, e))?;
            if resolved.is_dir() {
                tracing::warn!("Skipping linked folder {}", source_item.display());
                continue;
            }
            false
        } else {
            file_type.is_dir()
        };

        if is_dir {
            replicate_into(&source_item, &target_item, stats)?;
        } else {
            let copied = fs::copy(&source_item, &target_item)
                .map_err(|e| QuikBakError::io_at(&source_item, e))?;
            tracing::debug!("Copied {} ({} bytes)", source_item.display(), copied);
            stats.files += 1;
            stats.bytes += copied;
        }
    }

    Ok(())
}
