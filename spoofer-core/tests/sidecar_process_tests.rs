// spoofer-core/tests/sidecar_process_tests.rs
//
// Runs the real ffmpeg-sidecar process path against small shell scripts
// standing in for the ffmpeg binary.

#![cfg(unix)]

use spoofer_core::config::ExportOptionsBuilder;
use spoofer_core::error::CoreError;
use spoofer_core::external::SidecarSpawner;
use spoofer_core::{InputFile, RotationMap, export_batch};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tempfile::tempdir;

// Scripts are written and executed under this lock so a concurrent fork
// never holds a script open for writing ("Text file busy").
static SPAWN_LOCK: Mutex<()> = Mutex::new(());

/// Answers `-version` like ffmpeg and runs `body` for every other call.
fn fake_ffmpeg(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("ffmpeg");
    let script = format!(
        "#!/bin/sh\nif [ \"$1\" = \"-version\" ]; then\n  echo \"ffmpeg version 6.0\"\n  exit 0\nfi\n{body}\n"
    );
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn input(name: &str) -> InputFile {
    InputFile::new(name, b"dummy content".to_vec()).expect("supported extension")
}

#[test]
fn test_nonzero_exit_reports_stderr() -> Result<(), Box<dyn std::error::Error>> {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let bin_dir = tempdir()?;
    let temp_parent = tempdir()?;
    let ffmpeg = fake_ffmpeg(
        bin_dir.path(),
        "echo \"Error while filtering: Invalid argument\" >&2\nexit 1",
    );
    let spawner = SidecarSpawner::new().with_ffmpeg_path(ffmpeg);
    let options = ExportOptionsBuilder::new()
        .temp_dir(temp_parent.path().to_path_buf())
        .build();

    let result = export_batch(&spawner, &[input("clip.mov")], &RotationMap::new(), &options, |_| {});

    match result {
        Err(CoreError::TranscodeFailed {
            file,
            output,
            diagnostics,
        }) => {
            assert_eq!(file, "clip.mov");
            assert_eq!(output, "clip_normal.mp4");
            assert!(diagnostics.contains("Error while filtering: Invalid argument"));
        }
        other => panic!("expected TranscodeFailed, got {other:?}"),
    }
    assert_eq!(std::fs::read_dir(temp_parent.path())?.count(), 0);
    Ok(())
}

#[test]
fn test_output_written_by_ffmpeg_is_archived() -> Result<(), Box<dyn std::error::Error>> {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let bin_dir = tempdir()?;
    let temp_parent = tempdir()?;
    // The output path is always the last argument
    let ffmpeg = fake_ffmpeg(
        bin_dir.path(),
        "for last; do :; done\nprintf 'encoded' > \"$last\"\nexit 0",
    );
    let spawner = SidecarSpawner::new().with_ffmpeg_path(ffmpeg);
    let options = ExportOptionsBuilder::new()
        .effects(["normal", "bw"])
        .temp_dir(temp_parent.path().to_path_buf())
        .build();

    let mut progress = Vec::new();
    let archive = export_batch(
        &spawner,
        &[input("clip.mov")],
        &RotationMap::new(),
        &options,
        |p| progress.push(p.current),
    )?;

    assert_eq!(
        archive.entry_paths().collect::<Vec<_>>(),
        vec!["clip/Normal/clip_normal.mp4", "clip/Normal/clip_bw.mp4"]
    );
    assert!(archive.entries.iter().all(|entry| entry.size == 7));
    assert_eq!(progress, vec![1, 2]);
    assert_eq!(std::fs::read_dir(temp_parent.path())?.count(), 0);
    Ok(())
}

#[test]
fn test_hung_ffmpeg_is_killed_after_timeout() -> Result<(), Box<dyn std::error::Error>> {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let bin_dir = tempdir()?;
    let temp_parent = tempdir()?;
    let ffmpeg = fake_ffmpeg(bin_dir.path(), "exec sleep 30");
    let spawner = SidecarSpawner::new()
        .with_ffmpeg_path(ffmpeg)
        .with_timeout(Duration::from_secs(1));
    let options = ExportOptionsBuilder::new()
        .temp_dir(temp_parent.path().to_path_buf())
        .build();

    let start = Instant::now();
    let result = export_batch(&spawner, &[input("clip.mov")], &RotationMap::new(), &options, |_| {});

    assert!(start.elapsed() < Duration::from_secs(10));
    match result {
        Err(CoreError::TranscodeFailed {
            file,
            output,
            diagnostics,
        }) => {
            assert_eq!(file, "clip.mov");
            assert_eq!(output, "clip_normal.mp4");
            assert!(diagnostics.contains("timed out after 1s"));
        }
        other => panic!("expected TranscodeFailed, got {other:?}"),
    }
    assert_eq!(std::fs::read_dir(temp_parent.path())?.count(), 0);
    Ok(())
}
