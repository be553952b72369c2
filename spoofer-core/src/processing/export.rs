// ============================================================================
// spoofer-core/src/processing/export.rs
// ============================================================================
//
// BATCH EXPORT: Main Export Orchestration
//
// This module turns a set of uploaded files, their rotations and one options
// record into a single zip archive holding every requested variant.
//
// WORKFLOW:
// 1. Check that ffmpeg can be executed
// 2. Plan every (file, variant) export up front, rejecting archive path
//    collisions before any transcoding starts
// 3. Create a scoped working directory
// 4. For each file, persist its bytes and for each variant:
//    a. Run ffmpeg with the composed filter chain
//    b. Move the produced file into the archive
//    c. Report progress
// 5. Abort on the first failure; the working directory is removed on every
//    exit path when the TempDir guard is dropped

// ---- Internal crate imports ----
use crate::archive::{ArchiveWriter, ExportArchive};
use crate::config::ExportOptions;
use crate::discovery::InputFile;
use crate::error::{CoreError, CoreResult};
use crate::external::ffmpeg::{ExportJob, run_variant_export};
use crate::external::ffmpeg_executor::FfmpegSpawner;
use crate::processing::filters::compose_for_variant;
use crate::processing::naming::{self, ResolvedName};
use crate::processing::rotation::Rotation;
use crate::processing::variants::{VariantSpec, variants_for};
use crate::session::RotationMap;
use crate::temp_files::{WORK_DIR_PREFIX, create_temp_dir, persist_input};

// ---- External crate imports ----
use log::{debug, error, info};

// ---- Standard library imports ----
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Working sub-directory for flat-layout outputs.
const FLAT_OUTPUT_DIR: &str = "out_flat";

/// Working sub-directory for nested-layout outputs.
const NESTED_OUTPUT_DIR: &str = "out";

// ============================================================================
// PLAN
// ============================================================================

/// One planned output of one input file.
#[derive(Debug, Clone)]
pub struct PlannedVariant {
    pub spec: VariantSpec,
    pub filter_chain: String,
    pub name: ResolvedName,
}

/// All planned outputs of one input file.
#[derive(Debug, Clone)]
pub struct FilePlan<'a> {
    pub input: &'a InputFile,
    pub rotation: Rotation,
    pub variants: Vec<PlannedVariant>,
}

/// The complete, collision-free work list of a run.
#[derive(Debug, Clone)]
pub struct ExportPlan<'a> {
    pub files: Vec<FilePlan<'a>>,
}

impl ExportPlan<'_> {
    /// Number of ffmpeg invocations the run will make.
    pub fn total(&self) -> usize {
        self.files.iter().map(|file| file.variants.len()).sum()
    }
}

/// Plans every export of a run without touching the filesystem.
///
/// Files missing from `rotations` are exported unrotated.
///
/// # Errors
///
/// * `CoreError::NoFilesFound` - If `files` is empty
/// * `CoreError::ArchivePathCollision` - If two variants would be written to
///   the same archive path, e.g. `clip.mov` and `clip.mp4` in one run
pub fn plan_exports<'a>(
    files: &'a [InputFile],
    rotations: &RotationMap,
    options: &ExportOptions,
) -> CoreResult<ExportPlan<'a>> {
    if files.is_empty() {
        return Err(CoreError::NoFilesFound);
    }

    let mut claimed: HashMap<String, &str> = HashMap::new();
    let mut plans = Vec::with_capacity(files.len());

    for input in files {
        let rotation = rotations.get(input.name()).copied().unwrap_or_default();
        let base = input.base_name();

        let mut variants = Vec::new();
        for spec in variants_for(options, rotation) {
            let name = naming::resolve(base, &spec, options.flat_layout);
            if let Some(first) = claimed.insert(name.archive_path.clone(), input.name()) {
                return Err(CoreError::ArchivePathCollision {
                    path: name.archive_path,
                    first: first.to_string(),
                    second: input.name().to_string(),
                });
            }
            variants.push(PlannedVariant {
                filter_chain: compose_for_variant(&spec),
                spec,
                name,
            });
        }

        plans.push(FilePlan {
            input,
            rotation,
            variants,
        });
    }

    Ok(ExportPlan { files: plans })
}

// ============================================================================
// PROGRESS
// ============================================================================

/// Progress after one completed variant export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportProgress<'a> {
    /// Completed exports, starting at 1
    pub current: usize,
    /// Exports planned for the run
    pub total: usize,
    /// Input file the finished variant came from
    pub file: &'a str,
    /// Archive path of the finished variant
    pub archive_path: &'a str,
}

impl ExportProgress<'_> {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f64 / self.total as f64
        }
    }
}

// ============================================================================
// MAIN EXPORT FUNCTION
// ============================================================================

/// Exports every requested variant of `files` into one archive.
///
/// The run is sequential and fail-fast: the first failing ffmpeg invocation
/// aborts it, no archive is returned, and the working directory is removed.
/// `on_progress` is called after each completed variant with a strictly
/// increasing counter.
///
/// # Examples
///
/// ```rust,no_run
/// use spoofer_core::config::ExportOptionsBuilder;
/// use spoofer_core::external::SidecarSpawner;
/// use spoofer_core::{ExportSession, InputFile, export_batch};
///
/// let files = vec![InputFile::new("clip.mov", std::fs::read("clip.mov").unwrap()).unwrap()];
/// let mut session = ExportSession::new();
/// session.observe_uploads(files.iter().map(|f| f.name()));
///
/// let options = ExportOptionsBuilder::new().mirror_both(true).build();
/// let archive = export_batch(
///     &SidecarSpawner::new(),
///     &files,
///     &session.rotation_map(),
///     &options,
///     |p| println!("{}/{} {}", p.current, p.total, p.archive_path),
/// )
/// .unwrap();
/// std::fs::write(&archive.file_name, &archive.bytes).unwrap();
/// ```
pub fn export_batch<S, F>(
    spawner: &S,
    files: &[InputFile],
    rotations: &RotationMap,
    options: &ExportOptions,
    mut on_progress: F,
) -> CoreResult<ExportArchive>
where
    S: FfmpegSpawner,
    F: FnMut(&ExportProgress<'_>),
{
    spawner.ensure_available()?;

    let options = options.clone().normalized();
    let plan = plan_exports(files, rotations, &options)?;
    let total = plan.total();
    let codec = options.quality.codec_config();
    info!(
        "Exporting {total} variants for {} file(s) (preset {}, crf {})",
        plan.files.len(),
        codec.preset,
        codec.crf
    );

    let work_dir = create_temp_dir(options.temp_dir.as_deref(), WORK_DIR_PREFIX)?;
    debug!("Working directory: {}", work_dir.path().display());
    let output_root = work_dir.path().join(if options.flat_layout {
        FLAT_OUTPUT_DIR
    } else {
        NESTED_OUTPUT_DIR
    });

    let start = Instant::now();
    let mut archive = ArchiveWriter::new();
    let mut current = 0;

    for file_plan in &plan.files {
        let input = file_plan.input;
        info!("Processing: {} (rotation {})", input.name(), file_plan.rotation);
        let input_path = persist_input(work_dir.path(), input)?;

        for variant in &file_plan.variants {
            let output_path = output_path(&output_root, &variant.name);
            if let Some(parent) = output_path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            debug!(
                "Variant {}: filter chain '{}'",
                variant.name.archive_path, variant.filter_chain
            );
            let job = ExportJob {
                input_path: &input_path,
                output_path: &output_path,
                filter_chain: &variant.filter_chain,
                codec: &codec,
                strip_metadata: options.strip_metadata,
            };
            run_variant_export(spawner, &job)
                .map_err(|e| transcode_error(input, &variant.name, e))?;

            let bytes = std::fs::read(&output_path)?;
            archive.add_entry(&variant.name.archive_path, input.name(), &bytes)?;
            std::fs::remove_file(&output_path)?;

            current += 1;
            on_progress(&ExportProgress {
                current,
                total,
                file: input.name(),
                archive_path: &variant.name.archive_path,
            });
        }
    }

    let archive = archive.finish(options.quality.archive_file_name())?;
    info!(
        "Export complete: {} entries in {:.1}s",
        archive.entries.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(archive)
}

/// Location of a variant's output inside the working directory.
fn output_path(output_root: &Path, name: &ResolvedName) -> PathBuf {
    name.archive_path
        .split('/')
        .fold(output_root.to_path_buf(), |path, part| path.join(part))
}

/// Attaches the failing file and variant to an export error.
fn transcode_error(input: &InputFile, name: &ResolvedName, err: CoreError) -> CoreError {
    error!("Export of {} from {} failed: {err}", name.file_name, input.name());
    match err {
        CoreError::CommandFailed { status, stderr, .. } => CoreError::TranscodeFailed {
            file: input.name().to_string(),
            output: name.file_name.clone(),
            diagnostics: format!("{status}: {stderr}"),
        },
        CoreError::CommandStart(..)
        | CoreError::CommandWait(..)
        | CoreError::Timeout { .. }
        | CoreError::OperationFailed(_) => {
            CoreError::TranscodeFailed {
                file: input.name().to_string(),
                output: name.file_name.clone(),
                diagnostics: err.to_string(),
            }
        }
        other => other,
    }
}
