//! Denylist-based stripping of traversal sequences and reserved characters.
//!
//! This is not a canonicaliser: `.` segments and repeated separators are left
//! alone, and absolute paths are not rejected.

use regex::Regex;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR_STR};
use std::sync::LazyLock;

static DRIVE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]:[/\\]").expect("drive prefix pattern"));

static RESERVED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"|?*]"#).expect("reserved chars pattern"));

/// Strips null bytes, `..`, one leading separator, a leading drive prefix and
/// the characters `< > : " | ? *`, in that order, then strips `..` again
/// until none is left.
pub fn sanitize_path(path: &str) -> String {
    let mut cleaned = path.replace('\0', "");
    cleaned = cleaned.replace("..", "");

    if let Some(rest) = cleaned
        .strip_prefix('/')
        .or_else(|| cleaned.strip_prefix('\\'))
    {
        cleaned = rest.to_string();
    }

    cleaned = DRIVE_PREFIX.replace(&cleaned, "").into_owned();
    cleaned = RESERVED_CHARS.replace_all(&cleaned, "").into_owned();

    // Removing reserved characters can join two dots (".:." -> "..").
    while cleaned.contains("..") {
        cleaned = cleaned.replace("..", "");
    }

    cleaned
}

/// Sanitizes the part of `path` below its root and keeps the root itself, so
/// `/srv/../data` stays absolute while losing the traversal.
pub fn sanitize_anchored(path: &Path) -> PathBuf {
    let mut anchor = PathBuf::new();
    let mut rest: Vec<String> = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => anchor.push(component.as_os_str()),
            other => rest.push(other.as_os_str().to_string_lossy().into_owned()),
        }
    }

    let cleaned = sanitize_path(&rest.join(MAIN_SEPARATOR_STR));
    if cleaned.is_empty() {
        anchor
    } else {
        anchor.join(cleaned)
    }
}
