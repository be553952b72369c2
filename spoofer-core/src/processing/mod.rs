//! Variant generation and export orchestration.
//!
//! This module organizes the pure building blocks of an export (effects,
//! rotation, filter chains, variant enumeration, naming) and the batch
//! orchestrator that drives ffmpeg over them.

/// Named color effects and their filter fragments
pub mod effects;

/// Quarter-turn rotations and rotation deltas
pub mod rotation;

/// Filter-chain composition
pub mod filters;

/// Variant enumeration for one input file
pub mod variants;

/// Output file names and archive layout
pub mod naming;

/// Main batch export orchestration
pub mod export;

pub use effects::Effect;
pub use export::{ExportPlan, ExportProgress, export_batch, plan_exports};
pub use rotation::{Rotation, RotationDelta};
pub use variants::{EffectSelection, VariantSpec};
