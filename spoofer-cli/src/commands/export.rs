// ============================================================================
// spoofer-cli/src/commands/export.rs
// ============================================================================
//
// EXPORT COMMAND: Front end for spoofer_core::export_batch
//
// WORKFLOW:
// 1. Collect the input clips (files or top-level directory scans)
// 2. Replay the --rotate clicks through an ExportSession
// 3. Merge the options file with command-line flags
// 4. Run the export with a progress display
// 5. Write the archive and print a summary

// ---- Internal crate imports ----
use crate::cli::{ExportArgs, GlobalArgs, QualityModeArg};
use crate::error::{CliErrorContext, CliResult};
use crate::progress::ExportProgressBar;
use crate::terminal;

// ---- External crate imports ----
use log::{debug, info};
use spoofer_core::config::{
    DEFAULT_CONFIGURABLE_CRF, DEFAULT_CONFIGURABLE_PRESET, DEFAULT_SCALE_PERCENT,
};
use spoofer_core::external::SidecarSpawner;
use spoofer_core::processing::RotationDelta;
use spoofer_core::{
    CoreError, ExportOptions, ExportOptionsBuilder, ExportSession, InputFile, QualityMode,
    export_batch, find_processable_files, format_bytes, format_duration,
};

// ---- Standard library imports ----
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Reads every input path into memory.
///
/// Directories contribute their supported top-level files; a plain file
/// must have a supported extension.
pub fn collect_inputs(paths: &[PathBuf]) -> CliResult<Vec<InputFile>> {
    let mut inputs = Vec::new();
    for path in paths {
        let metadata = std::fs::metadata(path)
            .cli_with_context(|| format!("Invalid input path '{}'", path.display()))?;
        if metadata.is_dir() {
            for file in find_processable_files(path)? {
                inputs.push(InputFile::from_path(&file)?);
            }
        } else {
            inputs.push(InputFile::from_path(path)?);
        }
    }
    Ok(inputs)
}

/// Splits a `NAME=DELTA` rotation argument.
pub fn parse_rotate_arg(arg: &str) -> CliResult<(&str, RotationDelta)> {
    let (name, delta) = arg
        .rsplit_once('=')
        .filter(|(name, _)| !name.is_empty())
        .cli_with_context(|| format!("Invalid --rotate '{arg}', expected NAME=DELTA"))?;
    Ok((name, delta.parse()?))
}

/// Builds the session for `inputs` and applies the rotation clicks in order.
pub fn build_session(inputs: &[InputFile], rotate_args: &[String]) -> CliResult<ExportSession> {
    let mut session = ExportSession::new();
    session.observe_uploads(inputs.iter().map(InputFile::name));

    for arg in rotate_args {
        let (name, delta) = parse_rotate_arg(arg)?;
        if !session.select(name) {
            return Err(CoreError::OperationFailed(format!(
                "--rotate refers to '{name}', which is not among the inputs"
            )));
        }
        let rotation = session.rotate(name, delta);
        debug!("Rotated {name} to {rotation}");
    }
    Ok(session)
}

/// Merges the options file (if any) with the command-line flags.
pub fn build_options(args: &ExportArgs) -> CliResult<ExportOptions> {
    let base = match &args.options {
        Some(path) => ExportOptions::from_json_file(path)?,
        None => ExportOptions::default(),
    };
    let mut builder = ExportOptionsBuilder::from_options(base.clone());

    if args.mirror_both {
        builder = builder.mirror_both(true);
    }
    if args.mirror {
        builder = builder.mirror(true);
    }
    if args.flat {
        builder = builder.flat_layout(true);
    }
    if args.keep_metadata {
        builder = builder.strip_metadata(false);
    }
    if let Some(scale) = args.scale {
        builder = builder.scale_percent(scale);
    }
    if let Some(effects) = &args.effects {
        builder = builder.effects(effects);
    }
    if let Some(dir) = &args.temp_dir {
        builder = builder.temp_dir(dir.clone());
    }
    if let Some(quality) = quality_from_args(args, &base.quality) {
        builder = builder.quality(quality);
    }

    Ok(builder.build())
}

/// Quality mode requested on the command line, or `None` to keep `current`.
fn quality_from_args(args: &ExportArgs, current: &QualityMode) -> Option<QualityMode> {
    let wants_configurable = args.quality_mode == Some(QualityModeArg::Configurable)
        || (args.quality_mode.is_none() && (args.preset.is_some() || args.crf.is_some()));

    if args.quality_mode == Some(QualityModeArg::Locked) {
        return Some(QualityMode::Locked);
    }
    if !wants_configurable {
        return None;
    }

    let (current_preset, current_crf) = match current {
        QualityMode::Configurable { preset, crf } => (preset.clone(), *crf),
        QualityMode::Locked => (
            DEFAULT_CONFIGURABLE_PRESET.to_string(),
            DEFAULT_CONFIGURABLE_CRF,
        ),
    };
    Some(QualityMode::Configurable {
        preset: args.preset.clone().unwrap_or(current_preset),
        crf: args.crf.unwrap_or(current_crf),
    })
}

/// Final archive location: a directory receives the default archive name.
pub fn resolve_output_path(output: &Path, file_name: &str) -> PathBuf {
    if output.is_dir() {
        output.join(file_name)
    } else {
        output.to_path_buf()
    }
}

/// Runs the `export` command.
pub fn run_export(args: ExportArgs, global: &GlobalArgs) -> CliResult<()> {
    let start = Instant::now();

    let inputs = collect_inputs(&args.inputs)?;
    let session = build_session(&inputs, &args.rotate)?;
    let options = build_options(&args)?;

    let mut spawner = SidecarSpawner::new();
    if let Some(path) = &global.ffmpeg {
        spawner = spawner.with_ffmpeg_path(path.clone());
    }
    if let Some(secs) = args.timeout.filter(|&secs| secs > 0) {
        spawner = spawner.with_timeout(Duration::from_secs(secs));
    }

    let total = options.total_exports(inputs.len());
    terminal::print_section("Export configuration");
    terminal::print_status("Files", inputs.len());
    terminal::print_status(
        "Effects",
        options
            .effects
            .iter()
            .map(|effect| effect.name())
            .collect::<Vec<_>>()
            .join(", "),
    );
    terminal::print_status(
        "Mirror",
        if options.mirror_both {
            "both".to_string()
        } else {
            options.mirror.to_string()
        },
    );
    terminal::print_status(
        "Scale",
        format!("{}%", options.scale_percent.unwrap_or(DEFAULT_SCALE_PERCENT)),
    );
    terminal::print_status("Layout", if options.flat_layout { "flat" } else { "nested" });
    terminal::print_status("Exports", total);
    for input in &inputs {
        let rotation = session.rotation_of(input.name());
        if !rotation.is_identity() {
            terminal::print_status("Rotation", format!("{} {rotation}", input.name()));
        }
    }

    terminal::print_section("Exporting");
    for input in &inputs {
        terminal::print_processing(input.name());
    }
    let progress = ExportProgressBar::new(total, ExportProgressBar::stderr_is_terminal());
    let archive = export_batch(
        &spawner,
        &inputs,
        &session.rotation_map(),
        &options,
        |p| progress.update(p),
    )?;
    progress.finish();

    let output_path = resolve_output_path(&args.output, &archive.file_name);
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .cli_with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(&output_path, &archive.bytes)
        .cli_with_context(|| format!("Failed to write archive to {}", output_path.display()))?;
    info!("Archive written to {}", output_path.display());

    terminal::print_section("Summary");
    terminal::print_success(&format!("Exported {} variants", archive.entries.len()));
    terminal::print_status("Archive", output_path.display());
    terminal::print_status("Size", format_bytes(archive.bytes.len() as u64));
    terminal::print_status("Elapsed", format_duration(start.elapsed().as_secs_f64()));
    Ok(())
}
