// spoofer-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Spoofer: video variant exporter",
    long_about = "Exports every combination of rotation, mirror and color effect for a set of \
                  clips through ffmpeg and packs the results into one zip archive."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Optional: Directory for run log files (spoofer_export_run_<timestamp>.log)
    #[arg(long, global = true, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Optional: ffmpeg binary to use instead of the one on PATH
    #[arg(long, global = true, value_name = "FFMPEG", env = "SPOOFER_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Exports all variants of the given clips into a zip archive
    Export(ExportArgs),
    /// Checks that ffmpeg can be executed
    Check,
}

/// Encoder quality mode selectable on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityModeArg {
    /// Lossless H.264, fixed settings
    Locked,
    /// Choose --preset and --crf
    Configurable,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Input video files or directories containing them
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Archive file, or directory receiving the default archive name
    #[arg(short = 'o', long = "output", default_value = ".", value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Rotate one clip before export; repeatable, applied in order
    /// (DELTA is -90, +90, 180, ccw, cw or flip)
    #[arg(long = "rotate", value_name = "NAME=DELTA")]
    pub rotate: Vec<String>,

    /// Export every variant both unmirrored and mirrored
    #[arg(long)]
    pub mirror_both: bool,

    /// Mirror every variant (ignored with --mirror-both)
    #[arg(long)]
    pub mirror: bool,

    /// Put all outputs at the archive root instead of <base>/<Normal|Mirror>/
    #[arg(long)]
    pub flat: bool,

    /// Keep source metadata in the outputs (stripped by default)
    #[arg(long)]
    pub keep_metadata: bool,

    /// Resize percentage (10-200, 100 keeps the original size)
    #[arg(long, value_name = "PERCENT")]
    pub scale: Option<u16>,

    /// Comma-separated effects: normal, bw, bwcontrast, goldenhour
    #[arg(long, value_delimiter = ',', value_name = "EFFECTS")]
    pub effects: Option<Vec<String>>,

    /// Encoder quality mode
    #[arg(long, value_enum, value_name = "MODE")]
    pub quality_mode: Option<QualityModeArg>,

    /// x264 preset in configurable mode (implies --quality-mode configurable)
    #[arg(long, value_name = "PRESET")]
    pub preset: Option<String>,

    /// CRF in configurable mode, 0-51 (implies --quality-mode configurable)
    #[arg(long, value_name = "CRF")]
    pub crf: Option<u8>,

    /// JSON options file; flags given on the command line take precedence
    #[arg(long, value_name = "OPTIONS_JSON")]
    pub options: Option<PathBuf>,

    /// Parent directory for the temporary working directory
    #[arg(long, value_name = "DIR", env = "SPOOFER_TEMP_DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Kill any single ffmpeg invocation running longer than this
    #[arg(long, value_name = "SECONDS", env = "SPOOFER_FFMPEG_TIMEOUT")]
    pub timeout: Option<u64>,
}
