//! Configuration structures and constants for the spoofer-core library.
//!
//! [`ExportOptions`] is the immutable options record for one export run.
//! Every value in it goes through [`ExportOptions::normalize`] before use,
//! which clamps out-of-range numbers and fills defaults instead of failing.

mod builder;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::external::codec::CodecConfig;
use crate::processing::variants::EffectSelection;

pub use builder::ExportOptionsBuilder;

// Default constants

/// Smallest accepted resize percentage.
pub const MIN_SCALE_PERCENT: u16 = 10;

/// Largest accepted resize percentage.
pub const MAX_SCALE_PERCENT: u16 = 200;

/// Resize percentage that leaves the frame untouched.
pub const NO_OP_SCALE_PERCENT: u16 = 100;

/// Resize percentage used when none is given.
pub const DEFAULT_SCALE_PERCENT: u16 = NO_OP_SCALE_PERCENT;

/// Default x264 preset in configurable quality mode.
pub const DEFAULT_CONFIGURABLE_PRESET: &str = "medium";

/// Default CRF in configurable quality mode.
pub const DEFAULT_CONFIGURABLE_CRF: u8 = 18;

/// Highest CRF accepted by libx264 for 8-bit output.
pub const MAX_CRF: u8 = 51;

/// x264 presets accepted in configurable quality mode, fastest first.
pub const X264_PRESETS: [&str; 9] = [
    "ultrafast",
    "superfast",
    "veryfast",
    "faster",
    "fast",
    "medium",
    "slow",
    "slower",
    "veryslow",
];

/// Prefix shared by every archive name.
pub const ARCHIVE_NAME_PREFIX: &str = "spoofer_video_export";

/// Encoder quality settings.
///
/// `Locked` pins the encoder to lossless H.264 with fixed speed settings;
/// `Configurable` lets the caller choose the preset and CRF.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum QualityMode {
    #[default]
    Locked,
    Configurable { preset: String, crf: u8 },
}

impl QualityMode {
    /// Configurable mode with default preset and CRF.
    pub fn configurable() -> Self {
        QualityMode::Configurable {
            preset: DEFAULT_CONFIGURABLE_PRESET.to_string(),
            crf: DEFAULT_CONFIGURABLE_CRF,
        }
    }

    /// Replaces unknown presets with the default and clamps the CRF.
    pub fn normalized(self) -> Self {
        match self {
            QualityMode::Locked => QualityMode::Locked,
            QualityMode::Configurable { preset, crf } => {
                let preset = preset.trim().to_ascii_lowercase();
                let preset = if X264_PRESETS.contains(&preset.as_str()) {
                    preset
                } else {
                    log::warn!(
                        "Unknown encoder preset '{preset}', using '{DEFAULT_CONFIGURABLE_PRESET}'"
                    );
                    DEFAULT_CONFIGURABLE_PRESET.to_string()
                };
                if crf > MAX_CRF {
                    log::debug!("CRF {crf} clamped to {MAX_CRF}");
                }
                QualityMode::Configurable {
                    preset,
                    crf: crf.min(MAX_CRF),
                }
            }
        }
    }

    /// The codec settings this mode produces.
    pub fn codec_config(&self) -> CodecConfig {
        match self {
            QualityMode::Locked => CodecConfig::max_quality(),
            QualityMode::Configurable { preset, crf } => {
                CodecConfig::max_quality().with_quality(preset, *crf)
            }
        }
    }

    /// Archive file name reflecting the quality mode.
    pub fn archive_file_name(&self) -> String {
        match self {
            QualityMode::Locked => format!("{ARCHIVE_NAME_PREFIX}_MAX_QUALITY.zip"),
            QualityMode::Configurable { preset, crf } => {
                format!("{ARCHIVE_NAME_PREFIX}_{preset}_crf{crf}.zip")
            }
        }
    }
}

/// Options snapshot for one export run.
///
/// # Examples
///
/// ```rust
/// use spoofer_core::config::{ExportOptionsBuilder, QualityMode};
///
/// let options = ExportOptionsBuilder::new()
///     .mirror_both(true)
///     .flat_layout(true)
///     .effects(["bw", "goldenhour"])
///     .scale_percent(50)
///     .quality(QualityMode::configurable())
///     .build();
///
/// assert_eq!(options.effects.len(), 2);
/// assert_eq!(options.scale_percent, Some(50));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Export every variant both unmirrored and mirrored
    pub mirror_both: bool,

    /// Mirror state used when `mirror_both` is off
    pub mirror: bool,

    /// Put every output at the archive root instead of `<base>/<Normal|Mirror>/`
    pub flat_layout: bool,

    /// Drop all source metadata from the outputs
    pub strip_metadata: bool,

    /// Resize percentage (10-200); `None` or 100 leaves the size unchanged
    pub scale_percent: Option<u16>,

    /// Effects to export, never empty
    pub effects: EffectSelection,

    /// Encoder quality settings
    pub quality: QualityMode,

    /// Parent directory for the run's temporary working directory
    /// (defaults to the system temp directory)
    pub temp_dir: Option<PathBuf>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            mirror_both: false,
            mirror: false,
            flat_layout: false,
            strip_metadata: true,
            scale_percent: None,
            effects: EffectSelection::default(),
            quality: QualityMode::Locked,
            temp_dir: None,
        }
    }
}

impl ExportOptions {
    /// Clamps every value into its allowed range.
    ///
    /// A scale of exactly 100 is dropped, since it is a no-op.
    pub fn normalize(&mut self) {
        self.scale_percent = self.scale_percent.and_then(normalize_scale);
        self.quality = std::mem::take(&mut self.quality).normalized();
    }

    /// Returns a normalized copy.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Loads and normalizes options from a JSON file.
    pub fn from_json_file(path: &Path) -> CoreResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let options: ExportOptions =
            serde_json::from_str(&contents).map_err(|source| CoreError::OptionsFile {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(options.normalized())
    }

    /// Number of mirror states exported per effect.
    pub fn mirror_state_count(&self) -> usize {
        if self.mirror_both { 2 } else { 1 }
    }

    /// Outputs produced for each input file.
    pub fn variants_per_file(&self) -> usize {
        self.mirror_state_count() * self.effects.len()
    }

    /// Total outputs for a run over `file_count` inputs.
    pub fn total_exports(&self, file_count: usize) -> usize {
        file_count * self.variants_per_file()
    }
}

/// Clamps a resize percentage into range, mapping the no-op value to `None`.
pub fn normalize_scale(percent: u16) -> Option<u16> {
    let clamped = percent.clamp(MIN_SCALE_PERCENT, MAX_SCALE_PERCENT);
    if clamped != percent {
        log::debug!("Scale {percent}% clamped to {clamped}%");
    }
    (clamped != NO_OP_SCALE_PERCENT).then_some(clamped)
}
