use crate::config::QuikBakConfig;
use crate::domain::model::ProgressNeed;
use std::fs;
use std::path::Path;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Decides whether work on `path` deserves a progress indicator.
///
/// Disabled notifications win without touching the filesystem. A failed stat
/// is reported as [`ProgressNeed::Unknown`] rather than as an error.
pub fn check_progress_need(path: &Path, config: &QuikBakConfig) -> ProgressNeed {
    if !config.show_progress_notification {
        return ProgressNeed::NotRequired;
    }

    match fs::metadata(path) {
        Ok(metadata) => {
            let size_mb = metadata.len() as f64 / BYTES_PER_MB;
            if size_mb >= config.large_file_size_mb {
                ProgressNeed::Required
            } else {
                ProgressNeed::NotRequired
            }
        }
        Err(e) => {
            tracing::debug!("Size lookup for {} failed: {}", path.display(), e);
            ProgressNeed::Unknown
        }
    }
}

pub fn needs_progress_indicator(path: &Path, config: &QuikBakConfig) -> bool {
    check_progress_need(path, config).is_required()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn sized_file(dir: &TempDir, name: &str, bytes: u64) -> std::path::PathBuf {
        let path = dir.path().join(name);
        File::create(&path).unwrap().set_len(bytes).unwrap();
        path
    }

    #[test]
    fn test_small_and_large_files() {
        let temp = TempDir::new().unwrap();
        let small = sized_file(&temp, "small.bin", 1024 * 1024);
        let large = sized_file(&temp, "large.bin", 10 * 1024 * 1024);
        let config = QuikBakConfig::default();

        assert!(!needs_progress_indicator(&small, &config));
        assert!(needs_progress_indicator(&large, &config));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let temp = TempDir::new().unwrap();
        let exact = sized_file(&temp, "exact.bin", 5 * 1024 * 1024);
        assert_eq!(
            check_progress_need(&exact, &QuikBakConfig::default()),
            ProgressNeed::Required
        );
    }

    #[test]
    fn test_disabled_notifications_ignore_size() {
        let temp = TempDir::new().unwrap();
        let large = sized_file(&temp, "large.bin", 10 * 1024 * 1024);
        let config = QuikBakConfig {
            show_progress_notification: false,
            ..QuikBakConfig::default()
        };

        assert_eq!(check_progress_need(&large, &config), ProgressNeed::NotRequired);
        assert_eq!(
            check_progress_need(&temp.path().join("missing"), &config),
            ProgressNeed::NotRequired
        );
    }

    #[test]
    fn test_custom_fractional_threshold() {
        let temp = TempDir::new().unwrap();
        let small = sized_file(&temp, "small.bin", 1024 * 1024);
        let config = QuikBakConfig {
            large_file_size_mb: 0.5,
            ..QuikBakConfig::default()
        };
        assert!(needs_progress_indicator(&small, &config));
    }

    #[test]
    fn test_missing_file_is_unknown_not_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nonexistent.txt");
        let config = QuikBakConfig::default();

        assert_eq!(check_progress_need(&missing, &config), ProgressNeed::Unknown);
        assert!(!needs_progress_indicator(&missing, &config));
    }
}
