//! Input files and discovery of processable videos.
//!
//! An [`InputFile`] is an uploaded clip held in memory: its name, raw bytes
//! and lower-cased extension. Only extensions in [`SUPPORTED_EXTENSIONS`]
//! are accepted.

use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};

/// Container extensions accepted as input, matched case-insensitively.
pub const SUPPORTED_EXTENSIONS: [&str; 9] = [
    "mp4", "mov", "m4v", "webm", "mkv", "avi", "mpeg", "mpg", "wmv",
];

/// Returns the lower-cased extension of `name` if it is supported.
pub fn supported_extension(name: &str) -> Option<String> {
    let extension = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    SUPPORTED_EXTENSIONS
        .contains(&extension.as_str())
        .then_some(extension)
}

/// An uploaded media file.
#[derive(Clone, PartialEq, Eq)]
pub struct InputFile {
    name: String,
    bytes: Vec<u8>,
    extension: String,
}

impl InputFile {
    /// Creates an input file, rejecting unsupported extensions.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> CoreResult<Self> {
        let name = name.into();
        let extension =
            supported_extension(&name).ok_or_else(|| CoreError::UnsupportedInput(name.clone()))?;
        Ok(Self {
            name,
            bytes,
            extension,
        })
    }

    /// Reads a file from disk. The file name becomes the input's identity.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let name = path
            .file_name()
            .ok_or_else(|| {
                CoreError::PathError(format!("Failed to get filename for {}", path.display()))
            })?
            .to_string_lossy()
            .into_owned();
        if supported_extension(&name).is_none() {
            return Err(CoreError::UnsupportedInput(name));
        }
        let bytes = std::fs::read(path)?;
        Self::new(name, bytes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lower-cased extension without the dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// File name without its extension, used to name every output.
    pub fn base_name(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(&self.name)
    }
}

impl std::fmt::Debug for InputFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputFile")
            .field("name", &self.name)
            .field("size", &self.bytes.len())
            .field("extension", &self.extension)
            .finish()
    }
}

/// Finds video files eligible for processing in the specified directory.
///
/// Only the top level of `input_dir` is scanned. The result is sorted by
/// path so runs are reproducible.
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - The supported files found
/// * `Err(CoreError::Io)` - If the directory cannot be read
/// * `Err(CoreError::NoFilesFound)` - If no supported file is present
///
/// # Examples
///
/// ```rust,no_run
/// use spoofer_core::find_processable_files;
/// use std::path::Path;
///
/// match find_processable_files(Path::new("/path/to/clips")) {
///     Ok(files) => println!("Found {} video files", files.len()),
///     Err(e) => println!("Error finding video files: {e}"),
/// }
/// ```
pub fn find_processable_files(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let read_dir = std::fs::read_dir(input_dir)?;
    let mut files: Vec<PathBuf> = read_dir
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if !path.is_file() {
                return None;
            }
            let name = path.file_name()?.to_str()?;
            supported_extension(name).map(|_| path.clone())
        })
        .collect();

    if files.is_empty() {
        return Err(CoreError::NoFilesFound);
    }
    files.sort();
    Ok(files)
}
