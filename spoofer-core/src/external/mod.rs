// ============================================================================
// spoofer-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the ffmpeg Command-Line Tool
//
// This module encapsulates every interaction with ffmpeg: the dependency
// check, the structured codec settings, the spawner/process abstraction and
// the single-variant export driver.
//
// KEY COMPONENTS:
// - check_dependency: precondition check run before any export
// - CodecConfig: named codec settings serialized to ffmpeg arguments
// - FfmpegSpawner / FfmpegProcess: traits for running ffmpeg, with the
//   ffmpeg-sidecar implementation and a mock for tests
// - run_variant_export: one blocking ffmpeg invocation per variant

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Structured codec settings
pub mod codec;

/// Export command construction and execution
pub mod ffmpeg;

/// Traits and implementations for executing ffmpeg commands
pub mod ffmpeg_executor;

/// Mock spawner for tests
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use codec::CodecConfig;
pub use ffmpeg::{ExportJob, build_export_command, run_variant_export};
pub use ffmpeg_executor::{FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks if a required external command is available and executable.
///
/// Runs the command with `-version` and reports whether it could be started.
///
/// # Returns
///
/// * `Ok(())` - If the command ran and exited successfully
/// * `Err(CoreError::DependencyNotFound)` - If the command is not found
/// * `Err(CoreError::CommandStart)` - If the command exists but fails to start
pub fn check_dependency(program: &Path) -> CoreResult<()> {
    let display_name = program.display().to_string();

    let result = Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(status) if status.success() => {
            log::debug!("Found dependency: {display_name}");
            Ok(())
        }
        Ok(status) => {
            log::warn!("Dependency '{display_name}' exited with {status} for -version");
            Err(CoreError::DependencyNotFound(display_name))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{display_name}' not found.");
            Err(CoreError::DependencyNotFound(display_name))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{display_name}': {e}");
            Err(CoreError::CommandStart(display_name, e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Serializes process spawns so no child inherits a script's open write fd
    static SPAWN_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_missing_dependency_is_reported() {
        let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let result = check_dependency(Path::new("/definitely/not/here/ffmpeg"));
        assert!(matches!(result, Err(CoreError::DependencyNotFound(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_version_exit_status_decides_availability() {
        use std::os::unix::fs::PermissionsExt;

        let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let write_script = |name: &str, body: &str| {
            let path = dir.path().join(name);
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        };

        let working = write_script("ffmpeg-ok", "exit 0");
        let broken = write_script("ffmpeg-broken", "exit 3");

        assert!(check_dependency(&working).is_ok());
        assert!(matches!(
            check_dependency(&broken),
            Err(CoreError::DependencyNotFound(_))
        ));
    }
}
