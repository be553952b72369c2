//! Core library for exporting video variants with ffmpeg.
//!
//! Given uploaded clips, a rotation per clip and one options record, the
//! crate produces every requested combination of effect and mirror state,
//! transcodes each through ffmpeg and packs the results into a single zip
//! archive.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use spoofer_core::config::ExportOptionsBuilder;
//! use spoofer_core::external::SidecarSpawner;
//! use spoofer_core::processing::RotationDelta;
//! use spoofer_core::{ExportSession, InputFile, export_batch, find_processable_files};
//! use std::path::Path;
//!
//! let files: Vec<InputFile> = find_processable_files(Path::new("/path/to/clips"))
//!     .unwrap()
//!     .iter()
//!     .map(|path| InputFile::from_path(path).unwrap())
//!     .collect();
//!
//! let mut session = ExportSession::new();
//! session.observe_uploads(files.iter().map(|f| f.name()));
//! session.rotate(files[0].name(), RotationDelta::Clockwise);
//!
//! let options = ExportOptionsBuilder::new()
//!     .mirror_both(true)
//!     .effects(["normal", "bw"])
//!     .build();
//!
//! let archive = export_batch(
//!     &SidecarSpawner::new(),
//!     &files,
//!     &session.rotation_map(),
//!     &options,
//!     |_| {},
//! )
//! .unwrap();
//! std::fs::write(&archive.file_name, &archive.bytes).unwrap();
//! ```

pub mod archive;
pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod file_logging;
pub mod processing;
pub mod session;
pub mod temp_files;
pub mod utils;

// Re-exports for public API
pub use archive::{ArchiveEntry, ArchiveWriter, ExportArchive};
pub use config::{ExportOptions, ExportOptionsBuilder, QualityMode};
pub use discovery::{InputFile, SUPPORTED_EXTENSIONS, find_processable_files};
pub use error::{CoreError, CoreResult};
pub use processing::{ExportProgress, export_batch};
pub use session::{ExportSession, RotationMap};
pub use temp_files::create_temp_dir;
pub use utils::{format_bytes, format_duration};
