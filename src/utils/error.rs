use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuikBakError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("IO error at {path}: {source}")]
    PathIoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration field '{field}' is invalid: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Not a zip archive: {}", path.display())]
    NotAnArchive { path: PathBuf },

    #[error("Archive entry escapes the destination: {name}")]
    UnsafeArchiveEntry { name: String },

    #[error("Background task failed: {message}")]
    TaskFailed { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Filesystem,
    Archive,
    Configuration,
    Input,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl QuikBakError {
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PathIoError {
            path: path.into(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) | Self::PathIoError { .. } | Self::SourceNotFound { .. } => {
                ErrorCategory::Filesystem
            }
            Self::ZipError(_) | Self::UnsafeArchiveEntry { .. } => ErrorCategory::Archive,
            Self::SerializationError(_)
            | Self::TomlError(_)
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::NotAnArchive { .. } => ErrorCategory::Input,
            Self::TaskFailed { .. } => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Filesystem | ErrorCategory::Archive => ErrorSeverity::High,
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    /// Short message suitable for the terminal, without source chains.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) => format!("File operation failed: {}", e),
            Self::PathIoError { path, source } => {
                format!("Could not access {}: {}", path.display(), source)
            }
            Self::SourceNotFound { path } => format!("Nothing to back up at {}", path.display()),
            Self::NotAnArchive { path } => format!(
                "{} is not a .zip file, nothing to extract",
                path.display()
            ),
            Self::UnsafeArchiveEntry { name } => {
                format!("Refusing to extract '{}' outside the destination folder", name)
            }
            Self::ZipError(e) => format!("The archive could not be processed: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Filesystem => {
                "Check that the path exists and that you have read/write permission"
            }
            ErrorCategory::Archive => "Make sure the archive is a valid, trusted zip file",
            ErrorCategory::Configuration => {
                "Review quikbak.toml or run `quikbak config init` to regenerate the defaults"
            }
            ErrorCategory::Input => "Pass a path ending in .zip",
            ErrorCategory::Internal => "Re-run with --verbose and report the log output",
        }
    }

    /// Process exit code for this error when it ends a CLI run.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, QuikBakError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_an_archive_is_input_error() {
        let err = QuikBakError::NotAnArchive {
            path: PathBuf::from("notes.txt"),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.exit_code(), 2);
        assert!(err.user_friendly_message().contains("notes.txt"));
    }

    #[test]
    fn test_io_error_maps_to_filesystem() {
        let err: QuikBakError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.category(), ErrorCategory::Filesystem);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_config_errors_share_suggestion() {
        let err = QuikBakError::ConfigValidationError {
            field: "namingPattern".to_string(),
            message: "resolves to the source".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.recovery_suggestion().contains("config init"));
    }
}
