use chrono::{NaiveDate, NaiveDateTime};
use quikbak::core::{build_backup_path, build_backup_path_at};
use quikbak::QuikBakConfig;
use std::path::{Path, PathBuf};

fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 15)
        .unwrap()
        .and_hms_opt(14, 30, 45)
        .unwrap()
}

#[cfg(unix)]
const SOURCE: &str = "/test/document.txt";
#[cfg(windows)]
const SOURCE: &str = "C:\\test\\document.txt";

fn expected(file_name: &str) -> PathBuf {
    Path::new(SOURCE).parent().unwrap().join(file_name)
}

#[test]
fn test_default_pattern_with_timestamp() {
    let config = QuikBakConfig {
        include_timestamp: true,
        ..QuikBakConfig::default()
    };
    let result = build_backup_path_at(Path::new(SOURCE), &config, &fixed_time());
    assert_eq!(result, expected("document_2024-06-15_143045.txt"));
}

#[test]
fn test_default_pattern_without_timestamp() {
    let config = QuikBakConfig {
        include_timestamp: false,
        ..QuikBakConfig::default()
    };
    let result = build_backup_path_at(Path::new(SOURCE), &config, &fixed_time());
    assert_eq!(result, expected("document.txt"));
}

#[test]
fn test_custom_pattern_without_timestamp_placeholder() {
    let config = QuikBakConfig {
        include_timestamp: true,
        naming_pattern: "{filename}_bak.{ext}".to_string(),
        ..QuikBakConfig::default()
    };
    let result = build_backup_path_at(Path::new(SOURCE), &config, &fixed_time());
    assert_eq!(result, expected("document_bak.txt"));
}

#[test]
fn test_date_placeholder() {
    let config = QuikBakConfig {
        include_timestamp: false,
        naming_pattern: "{filename}-{date}.{ext}.bak".to_string(),
        ..QuikBakConfig::default()
    };
    let result = build_backup_path_at(Path::new(SOURCE), &config, &fixed_time());
    assert_eq!(result, expected("document-2024-06-15.txt.bak"));
}

#[test]
fn test_file_without_extension() {
    let config = QuikBakConfig {
        include_timestamp: false,
        ..QuikBakConfig::default()
    };
    let result = build_backup_path_at(Path::new("Makefile"), &config, &fixed_time());
    assert_eq!(result, PathBuf::from("Makefile."));
}

#[test]
fn test_live_clock_keeps_directory_and_name() {
    let config = QuikBakConfig::default();
    let result = build_backup_path(Path::new(SOURCE), &config);

    assert_eq!(result.parent(), Path::new(SOURCE).parent());
    let name = result.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("document_"));
    assert!(name.ends_with(".txt"));
    assert_eq!(name.len(), "document_2024-06-15_143045.txt".len());
}
