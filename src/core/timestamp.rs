use chrono::{Datelike, Local, NaiveDateTime, Timelike};

/// Format used for `{date}` and for folder backup names.
pub const DATE_FORMAT: &str = "YYYY-MM-DD";
pub const FOLDER_TIMESTAMP_FORMAT: &str = "YYYY-MM-DD_HHmmss";

/// Replaces the first occurrence of each token (`YYYY`, `MM`, `DD`, `HH`,
/// `mm`, `ss`) with the matching zero-padded field of `at`. Later occurrences
/// of the same token are left as-is so existing naming patterns keep
/// producing the same names.
pub fn format_timestamp(format: &str, at: &NaiveDateTime) -> String {
    format
        .replacen("YYYY", &format!("{:04}", at.year()), 1)
        .replacen("MM", &format!("{:02}", at.month()), 1)
        .replacen("DD", &format!("{:02}", at.day()), 1)
        .replacen("HH", &format!("{:02}", at.hour()), 1)
        .replacen("mm", &format!("{:02}", at.minute()), 1)
        .replacen("ss", &format!("{:02}", at.second()), 1)
}

pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn format_timestamp_now(format: &str) -> String {
    format_timestamp(format, &now_local())
}
