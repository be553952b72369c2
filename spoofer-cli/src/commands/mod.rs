//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// The `export` command: builds every variant and writes the archive.
pub mod export;

/// The `check` command: verifies that ffmpeg can be executed.
pub mod check;
