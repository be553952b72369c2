//! Error types for the spoofer-core library.
//!
//! All fallible operations in the crate return [`CoreResult`]. Recoverable
//! validation problems (out-of-range rotation, scale or CRF values) never
//! reach this type; they are clamped during normalization.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

/// Errors produced by the core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Required external command '{0}' not found. Install ffmpeg and make sure it is on PATH")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, std::io::Error),

    #[error("Failed to wait for command '{0}': {1}")]
    CommandWait(String, std::io::Error),

    #[error("Command '{command}' failed with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("ffmpeg failed for {file} ({output}): {diagnostics}")]
    TranscodeFailed {
        file: String,
        output: String,
        diagnostics: String,
    },

    #[error("Command '{command}' timed out after {}s", .timeout.as_secs())]
    Timeout { command: String, timeout: Duration },

    #[error("Unsupported input file '{0}': extension must be one of mp4, mov, m4v, webm, mkv, avi, mpeg, mpg, wmv")]
    UnsupportedInput(String),

    #[error("No processable video files found")]
    NoFilesFound,

    #[error("Archive path '{path}' would be written twice (from '{first}' and '{second}')")]
    ArchivePathCollision {
        path: String,
        first: String,
        second: String,
    },

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Invalid options file '{}': {source}", .path.display())]
    OptionsFile {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Path error: {0}")]
    PathError(String),

    #[error("{0}")]
    OperationFailed(String),
}

/// Result alias used throughout the crate.
pub type CoreResult<T> = Result<T, CoreError>;

/// Builds a [`CoreError::CommandStart`] for a command that could not be spawned.
pub fn command_start_error(command: impl Into<String>, error: std::io::Error) -> CoreError {
    CoreError::CommandStart(command.into(), error)
}

/// Builds a [`CoreError::CommandWait`] for a command whose exit could not be collected.
pub fn command_wait_error(command: impl Into<String>, error: std::io::Error) -> CoreError {
    CoreError::CommandWait(command.into(), error)
}

/// Builds a [`CoreError::CommandFailed`] for a command that exited unsuccessfully.
pub fn command_failed_error(
    command: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        command: command.into(),
        status,
        stderr: stderr.into(),
    }
}
