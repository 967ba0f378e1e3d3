use crate::config::QuikBakConfig;
use crate::core::sanitize::{sanitize_anchored, sanitize_path};
use crate::core::timestamp::{format_timestamp, now_local, DATE_FORMAT};
use crate::domain::model::PathSegments;
use chrono::NaiveDateTime;
use std::path::{Component, Path, PathBuf};

/// `"_" + formatted timestamp` when timestamps are enabled, otherwise empty.
pub fn timestamp_suffix(config: &QuikBakConfig, at: &NaiveDateTime) -> String {
    if config.include_timestamp {
        format!("_{}", format_timestamp(&config.timestamp_format, at))
    } else {
        String::new()
    }
}

/// Expands the first occurrence of each placeholder in `pattern`, in the
/// order `{filename}`, `{timestamp}`, `{ext}`, `{date}`.
pub fn expand_naming_pattern(
    pattern: &str,
    filename: &str,
    timestamp: &str,
    ext: &str,
    date: &str,
) -> String {
    pattern
        .replacen("{filename}", filename, 1)
        .replacen("{timestamp}", timestamp, 1)
        .replacen("{ext}", ext, 1)
        .replacen("{date}", date, 1)
}

/// Destination for a backup of `source` taken at `at`.
pub fn build_backup_path_at(source: &Path, config: &QuikBakConfig, at: &NaiveDateTime) -> PathBuf {
    let segments = PathSegments::parse(source);

    let dir = sanitize_anchored(Path::new(&segments.dir));
    let name = sanitize_path(&segments.name);
    let ext = sanitize_path(&segments.ext);

    let file_name = expand_naming_pattern(
        &config.naming_pattern,
        &name,
        &timestamp_suffix(config, at),
        &ext,
        &format_timestamp(DATE_FORMAT, at),
    );

    tracing::debug!(
        "Backup name for {} resolved to {}",
        source.display(),
        file_name
    );

    join_below(dir, &file_name)
}

/// Appends `name` under `dir`, dropping any root or drive prefix in `name`
/// so a pattern such as `/{filename}.{ext}` cannot escape `dir`.
fn join_below(mut dir: PathBuf, name: &str) -> PathBuf {
    for component in Path::new(name).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {}
            other => dir.push(other.as_os_str()),
        }
    }
    dir
}

/// Destination for a backup of `source` taken now. The clock is read once, so
/// `{timestamp}` and `{date}` always agree.
pub fn build_backup_path(source: &Path, config: &QuikBakConfig) -> PathBuf {
    build_backup_path_at(source, config, &now_local())
}
