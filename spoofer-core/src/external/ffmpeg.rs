//! FFmpeg command building and execution for variant exports
//!
//! One export is one blocking ffmpeg invocation: quiet logging, overwrite
//! without prompting, a single `-vf` chain, the structured codec arguments,
//! optional metadata stripping and `+faststart` so the MP4 index sits at the
//! front of the file.

use crate::error::{CoreError, CoreResult, command_failed_error};
use crate::external::codec::CodecConfig;
use crate::external::ffmpeg_executor::{FfmpegProcess, FfmpegSpawner};

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use log::{debug, error};

use std::path::Path;
use std::time::Instant;

/// Parameters for a single variant export.
#[derive(Debug, Clone)]
pub struct ExportJob<'a> {
    pub input_path: &'a Path,
    pub output_path: &'a Path,
    pub filter_chain: &'a str,
    pub codec: &'a CodecConfig,
    pub strip_metadata: bool,
}

/// Builds the ffmpeg command for one export.
pub fn build_export_command<S: FfmpegSpawner>(spawner: &S, job: &ExportJob<'_>) -> FfmpegCommand {
    let mut cmd = spawner.command();
    cmd.overwrite()
        .hide_banner()
        .args(["-loglevel", "error"])
        .input(job.input_path)
        .args(["-vf", job.filter_chain])
        .args(job.codec.to_args());

    if job.strip_metadata {
        cmd.args(["-map_metadata", "-1"]);
    }

    cmd.args(["-movflags", "+faststart"])
        .output(job.output_path);
    cmd
}

/// Runs one export and blocks until ffmpeg exits.
///
/// On a non-zero exit the returned error carries everything ffmpeg wrote to
/// stderr. On success the output file is guaranteed to exist.
pub fn run_variant_export<S: FfmpegSpawner>(spawner: &S, job: &ExportJob<'_>) -> CoreResult<()> {
    let cmd = build_export_command(spawner, job);
    debug!("Running export command: {cmd:?}");

    let start = Instant::now();
    let mut process = spawner.spawn(cmd)?;

    let mut diagnostics = String::new();
    process.handle_events(|event| {
        match event {
            FfmpegEvent::Log(_, line) | FfmpegEvent::Error(line) => {
                diagnostics.push_str(line.trim_end());
                diagnostics.push('\n');
            }
            _ => {}
        }
        Ok(())
    })?;

    let status = process.wait()?;
    if !status.success() {
        let diagnostics = diagnostics.trim();
        error!(
            "ffmpeg exited with {status} for {}: {diagnostics}",
            job.output_path.display()
        );
        let message = if diagnostics.is_empty() {
            "ffmpeg produced no diagnostic output".to_string()
        } else {
            diagnostics.to_string()
        };
        return Err(command_failed_error("ffmpeg", status, message));
    }

    if !job.output_path.is_file() {
        return Err(CoreError::OperationFailed(format!(
            "ffmpeg reported success but '{}' was not created",
            job.output_path.display()
        )));
    }

    debug!(
        "Export of {} finished in {:.1}s",
        job.output_path.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
