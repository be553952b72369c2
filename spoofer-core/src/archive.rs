//! In-memory zip archive assembly.
//!
//! Entries are stored uncompressed: the payloads are already-compressed
//! video, so deflate would only cost time.

use crate::error::{CoreError, CoreResult};

use std::collections::HashMap;
use std::io::{Cursor, Write};

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::FileOptions;

/// One written entry: its path inside the archive and its size in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: String,
    pub size: u64,
}

/// The finished archive for one export run.
#[derive(Debug, Clone)]
pub struct ExportArchive {
    /// Suggested download name, reflecting the quality mode
    pub file_name: String,
    /// Complete zip file content
    pub bytes: Vec<u8>,
    /// Entries in export order
    pub entries: Vec<ArchiveEntry>,
}

impl ExportArchive {
    pub fn entry_paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.path.as_str())
    }

    /// Total size of the stored payloads.
    pub fn payload_size(&self) -> u64 {
        self.entries.iter().map(|entry| entry.size).sum()
    }
}

/// Write-once archive builder.
///
/// Insertion order is preserved and a path can only be written once.
pub struct ArchiveWriter {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    entries: Vec<ArchiveEntry>,
    sources: HashMap<String, String>,
}

impl ArchiveWriter {
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            entries: Vec::new(),
            sources: HashMap::new(),
        }
    }

    /// Adds a stored entry. `source` names the input the entry came from
    /// and is only used to report collisions.
    pub fn add_entry(&mut self, path: &str, source: &str, bytes: &[u8]) -> CoreResult<()> {
        if let Some(first) = self.sources.get(path) {
            return Err(CoreError::ArchivePathCollision {
                path: path.to_string(),
                first: first.clone(),
                second: source.to_string(),
            });
        }

        let options = FileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .large_file(bytes.len() as u64 >= u64::from(u32::MAX));
        self.zip.start_file(path, options)?;
        self.zip.write_all(bytes)?;

        log::debug!("Added {path} ({} bytes) to archive", bytes.len());
        self.sources.insert(path.to_string(), source.to_string());
        self.entries.push(ArchiveEntry {
            path: path.to_string(),
            size: bytes.len() as u64,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finalizes the zip directory and returns the archive.
    pub fn finish(mut self, file_name: String) -> CoreResult<ExportArchive> {
        let cursor = self.zip.finish()?;
        Ok(ExportArchive {
            file_name,
            bytes: cursor.into_inner(),
            entries: self.entries,
        })
    }
}

impl Default for ArchiveWriter {
    fn default() -> Self {
        Self::new()
    }
}
