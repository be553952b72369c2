//! Temporary file management utilities.
//!
//! The export working directory is a `tempfile::TempDir`, so it is removed
//! when dropped, including when a run fails halfway.

use crate::discovery::InputFile;
use crate::error::CoreResult;

use std::path::{Path, PathBuf};
use tempfile::{Builder as TempFileBuilder, TempDir};

/// Prefix of every run's working directory.
pub const WORK_DIR_PREFIX: &str = "spoofer_video_";

/// Prefix of the persisted copy of each input.
pub const INPUT_FILE_PREFIX: &str = "input__";

/// Creates a temporary directory with prefix. Auto-cleaned when dropped.
///
/// Uses `parent` when given (creating it if needed), otherwise the system
/// temporary directory.
pub fn create_temp_dir(parent: Option<&Path>, prefix: &str) -> CoreResult<TempDir> {
    let mut builder = TempFileBuilder::new();
    builder.prefix(prefix);
    match parent {
        Some(parent) => {
            std::fs::create_dir_all(parent)?;
            Ok(builder.tempdir_in(parent)?)
        }
        None => Ok(builder.tempdir()?),
    }
}

/// Path of the persisted copy of `input` inside `dir`.
///
/// The original extension is kept because ffmpeg uses it to pick a demuxer.
pub fn input_copy_path(dir: &Path, input: &InputFile) -> PathBuf {
    dir.join(format!(
        "{INPUT_FILE_PREFIX}{}.{}",
        input.base_name(),
        input.extension()
    ))
}

/// Writes the bytes of `input` into `dir` and returns the path.
pub fn persist_input(dir: &Path, input: &InputFile) -> CoreResult<PathBuf> {
    let path = input_copy_path(dir, input);
    std::fs::write(&path, input.bytes())?;
    log::debug!("Persisted {} to {}", input.name(), path.display());
    Ok(path)
}
