// ============================================================================
// spoofer-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: FFmpeg Process Management and Abstraction
//
// This module provides abstractions for spawning and interacting with FFmpeg
// processes. The export driver only talks to the traits defined here, so
// tests can substitute a mock spawner for the real binary.
//
// KEY COMPONENTS:
// - FfmpegProcess: Trait representing an active FFmpeg process
// - FfmpegSpawner: Trait for creating new FFmpeg processes
// - SidecarSpawner: Concrete implementation using ffmpeg-sidecar, with an
//   optional binary path and per-invocation timeout

use crate::error::{CoreError, CoreResult, command_start_error, command_wait_error};
use crate::external::check_dependency;

use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use ffmpeg_sidecar::log_parser::FfmpegLogParser;

use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// Default program name looked up on PATH.
pub const FFMPEG_PROGRAM: &str = "ffmpeg";

// --- FFmpeg Execution Abstraction ---

/// Trait representing an active ffmpeg process instance.
pub trait FfmpegProcess {
    /// Processes events from the running command using a provided handler closure.
    /// Returns once the process closes its stderr stream.
    fn handle_events<F>(&mut self, handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>;

    /// Waits for the command to complete and returns its exit status.
    fn wait(&mut self) -> CoreResult<ExitStatus>;
}

/// Trait representing something that can spawn an FfmpegProcess.
pub trait FfmpegSpawner {
    type Process: FfmpegProcess;

    /// Creates an empty command pointing at the spawner's ffmpeg binary.
    fn command(&self) -> FfmpegCommand {
        FfmpegCommand::new()
    }

    /// Spawns the ffmpeg command, consuming the command object.
    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;

    /// Verifies the transcoder can be executed at all.
    fn ensure_available(&self) -> CoreResult<()> {
        Ok(())
    }
}

// --- Concrete Implementation using ffmpeg-sidecar ---

/// Wrapper around `ffmpeg_sidecar::child::FfmpegChild` implementing `FfmpegProcess`.
pub struct SidecarProcess {
    child: FfmpegChild,
    timeout: Option<Duration>,
}

impl FfmpegProcess for SidecarProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let stderr = self.child.take_stderr().ok_or_else(|| {
            CoreError::OperationFailed("ffmpeg stderr was not captured".to_string())
        })?;

        // The parser blocks on the pipe, so it runs on its own thread and the
        // deadline is enforced here.
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut parser = FfmpegLogParser::new(stderr);
            loop {
                match parser.parse_next_event() {
                    Ok(FfmpegEvent::LogEOF) | Err(_) => break,
                    Ok(event) => {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        let deadline = self.timeout.map(|timeout| Instant::now() + timeout);
        loop {
            let received = match deadline {
                Some(deadline) => {
                    rx.recv_timeout(deadline.saturating_duration_since(Instant::now()))
                }
                None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };

            match received {
                Ok(event) => handler(event)?,
                Err(RecvTimeoutError::Disconnected) => return Ok(()),
                Err(RecvTimeoutError::Timeout) => {
                    let timeout = self.timeout.unwrap_or_default();
                    log::error!("ffmpeg exceeded timeout of {}s, killing it", timeout.as_secs());
                    if let Err(e) = self.child.kill() {
                        log::warn!("Failed to kill ffmpeg: {e}");
                    }
                    if let Err(e) = self.child.wait() {
                        log::warn!("Failed to reap killed ffmpeg: {e}");
                    }
                    return Err(CoreError::Timeout {
                        command: FFMPEG_PROGRAM.to_string(),
                        timeout,
                    });
                }
            }
        }
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        self.child
            .wait()
            .map_err(|e| command_wait_error("ffmpeg (sidecar)", e))
    }
}

/// Concrete implementation of `FfmpegSpawner` using `ffmpeg-sidecar`.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner {
    ffmpeg_path: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl SidecarSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a specific ffmpeg binary instead of the one on PATH.
    #[must_use]
    pub fn with_ffmpeg_path(mut self, path: PathBuf) -> Self {
        self.ffmpeg_path = Some(path);
        self
    }

    /// Kills any invocation that runs longer than `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn ffmpeg_path(&self) -> &Path {
        self.ffmpeg_path
            .as_deref()
            .unwrap_or_else(|| Path::new(FFMPEG_PROGRAM))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl FfmpegSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn command(&self) -> FfmpegCommand {
        FfmpegCommand::new_with_path(self.ffmpeg_path())
    }

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        cmd.spawn()
            .map(|child| SidecarProcess {
                child,
                timeout: self.timeout,
            })
            .map_err(|e| command_start_error("ffmpeg (sidecar)", e))
    }

    fn ensure_available(&self) -> CoreResult<()> {
        check_dependency(self.ffmpeg_path())
    }
}
