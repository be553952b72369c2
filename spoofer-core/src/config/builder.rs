// ============================================================================
// spoofer-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for ExportOptions
//
// This module implements the builder pattern for the ExportOptions structure,
// providing a fluent API for assembling an options record. `build` runs the
// single normalization step, so every ExportOptions produced here is already
// clamped and has a non-empty effect selection.

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- Internal crate imports ----
use super::{ExportOptions, QualityMode};
use crate::processing::effects::Effect;
use crate::processing::variants::EffectSelection;

/// Builder for creating ExportOptions instances.
///
/// # Examples
///
/// ```rust
/// use spoofer_core::config::ExportOptionsBuilder;
///
/// let options = ExportOptionsBuilder::new()
///     .mirror_both(true)
///     .strip_metadata(false)
///     .scale_percent(100)
///     .build();
///
/// assert_eq!(options.scale_percent, None);
/// assert_eq!(options.variants_per_file(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExportOptionsBuilder {
    options: ExportOptions,
}

impl ExportOptionsBuilder {
    /// Creates a builder holding the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing options record, e.g. one loaded from JSON.
    pub fn from_options(options: ExportOptions) -> Self {
        Self { options }
    }

    pub fn mirror_both(mut self, enabled: bool) -> Self {
        self.options.mirror_both = enabled;
        self
    }

    /// Sets the mirror state used when mirror-both is off.
    pub fn mirror(mut self, enabled: bool) -> Self {
        self.options.mirror = enabled;
        self
    }

    pub fn flat_layout(mut self, enabled: bool) -> Self {
        self.options.flat_layout = enabled;
        self
    }

    pub fn strip_metadata(mut self, enabled: bool) -> Self {
        self.options.strip_metadata = enabled;
        self
    }

    /// Sets the resize percentage. Clamped to 10-200 on build; 100 disables resizing.
    pub fn scale_percent(mut self, percent: u16) -> Self {
        self.options.scale_percent = Some(percent);
        self
    }

    /// Selects effects by name. Unknown names count as "normal".
    pub fn effects<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.options.effects = EffectSelection::from_names(names);
        self
    }

    pub fn effect_selection<I>(mut self, effects: I) -> Self
    where
        I: IntoIterator<Item = Effect>,
    {
        self.options.effects = EffectSelection::new(effects);
        self
    }

    pub fn quality(mut self, quality: QualityMode) -> Self {
        self.options.quality = quality;
        self
    }

    /// Sets the parent directory for the run's temporary working directory.
    pub fn temp_dir(mut self, temp_dir: PathBuf) -> Self {
        self.options.temp_dir = Some(temp_dir);
        self
    }

    /// Builds a normalized ExportOptions.
    pub fn build(self) -> ExportOptions {
        self.options.normalized()
    }
}
