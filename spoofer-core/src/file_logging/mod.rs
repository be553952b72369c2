//! File logging for export runs.
//!
//! When a log directory is requested, every run writes a timestamped log
//! file next to the console output. The setup lives in [`setup`].

mod setup;

pub use setup::setup_file_logging;

use std::path::{Path, PathBuf};

/// Prefix of every run log file.
pub const RUN_LOG_PREFIX: &str = "spoofer_export_run";

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Log file path for a run started at `timestamp`.
pub fn run_log_path(log_dir: &Path, timestamp: &str) -> PathBuf {
    log_dir.join(format!("{RUN_LOG_PREFIX}_{timestamp}.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_log_path() {
        let path = run_log_path(Path::new("/logs"), "20240601_123045");
        assert_eq!(
            path,
            PathBuf::from("/logs/spoofer_export_run_20240601_123045.log")
        );
    }

    #[test]
    fn test_timestamp_shape() {
        let timestamp = get_timestamp();
        assert_eq!(timestamp.len(), 15);
        assert_eq!(timestamp.as_bytes()[8], b'_');
    }
}
