use serde::Serialize;
use std::path::{Path, PathBuf};

/// A path split into directory, base name and extension (without the dot).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathSegments {
    pub dir: String,
    pub name: String,
    pub ext: String,
}

impl PathSegments {
    /// Splits on the last dot of the final component. A leading dot does not
    /// start an extension, so `.bashrc` has no extension.
    pub fn parse(path: &Path) -> Self {
        let dir = path
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();

        let (name, ext) = match file_name.rfind('.') {
            Some(idx) if idx > 0 => (
                file_name[..idx].to_string(),
                file_name[idx + 1..].to_string(),
            ),
            _ => (file_name, String::new()),
        };

        Self { dir, name, ext }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Backup,
    Compress,
    Decompress,
}

impl CommandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Backup => "backup",
            Self::Compress => "compress",
            Self::Decompress => "decompress",
        }
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether an operation on a path should be wrapped in progress reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressNeed {
    Required,
    NotRequired,
    /// The size lookup failed.
    Unknown,
}

impl ProgressNeed {
    pub fn is_required(&self) -> bool {
        matches!(self, Self::Required)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ArchiveSummary {
    pub entries: usize,
    pub bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplicationStats {
    pub files: usize,
    pub directories: usize,
    pub bytes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommandOutcome {
    pub command: CommandKind,
    pub source: PathBuf,
    pub output: PathBuf,
    pub is_directory: bool,
    pub progress_shown: bool,
}

impl CommandOutcome {
    /// Final component of the output path, as shown in notifications.
    pub fn output_name(&self) -> String {
        display_name(&self.output)
    }
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_regular_file() {
        let segments = PathSegments::parse(Path::new("/test/document.txt"));
        assert_eq!(segments.dir, "/test");
        assert_eq!(segments.name, "document");
        assert_eq!(segments.ext, "txt");
    }

    #[test]
    fn test_parse_dotfile_and_multi_extension() {
        let dotfile = PathSegments::parse(Path::new("home/.bashrc"));
        assert_eq!(dotfile.name, ".bashrc");
        assert_eq!(dotfile.ext, "");

        let tarball = PathSegments::parse(Path::new("archive.tar.gz"));
        assert_eq!(tarball.dir, "");
        assert_eq!(tarball.name, "archive.tar");
        assert_eq!(tarball.ext, "gz");
    }

    #[test]
    fn test_parse_empty_path() {
        assert_eq!(PathSegments::parse(Path::new("")), PathSegments::default());
    }

    #[test]
    fn test_progress_need_only_required_counts() {
        assert!(ProgressNeed::Required.is_required());
        assert!(!ProgressNeed::NotRequired.is_required());
        assert!(!ProgressNeed::Unknown.is_required());
    }
}
