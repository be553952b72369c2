// ============================================================================
// spoofer-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP
//
// Without --log-dir the CLI logs through env_logger, honoring RUST_LOG:
// - RUST_LOG=info (default): Normal operation logs
// - RUST_LOG=debug (or --verbose): ffmpeg commands and filter chains
//
// With --log-dir, spoofer-core's file_logging module configures log4rs to
// write to stderr and to a timestamped run log.

use crate::error::{CliErrorContext, CliResult};
use log::LevelFilter;
use spoofer_core::file_logging::{get_timestamp, run_log_path, setup_file_logging};
use std::path::{Path, PathBuf};

/// Level used when RUST_LOG is not set.
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes logging for the process and returns the run log path, if any.
pub fn init_logging(verbose: bool, log_dir: Option<&Path>) -> CliResult<Option<PathBuf>> {
    let level = default_level(verbose);

    match log_dir {
        Some(dir) => {
            let log_path = run_log_path(dir, &get_timestamp());
            setup_file_logging(&log_path, level)
                .map_err(|e| spoofer_core::CoreError::OperationFailed(e.to_string()))
                .cli_with_context(|| format!("Failed to set up logging in {}", dir.display()))?;
            Ok(Some(log_path))
        }
        None => {
            env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(level.to_string().to_lowercase()),
            )
            .format_timestamp(None)
            .format_target(false)
            .init();
            Ok(None)
        }
    }
}
