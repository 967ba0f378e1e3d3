pub mod backup_path;
pub mod progress;
pub mod replicate;
pub mod sanitize;
pub mod timestamp;

pub use crate::domain::model::{PathSegments, ProgressNeed, ReplicationStats};
pub use crate::domain::ports::{ArchiveService, ConfigProvider, Reporter};
pub use crate::utils::error::Result;
pub use backup_path::{build_backup_path, build_backup_path_at};
pub use progress::{check_progress_need, needs_progress_indicator};
pub use replicate::replicate_folder;
pub use sanitize::{sanitize_anchored, sanitize_path};
pub use timestamp::{format_timestamp, format_timestamp_now};
