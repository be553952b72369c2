//! Variant enumeration: the set of outputs required for one input file.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::ExportOptions;
use crate::processing::effects::Effect;
use crate::processing::rotation::Rotation;

/// A normalized, never-empty set of effects in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct EffectSelection {
    effects: BTreeSet<Effect>,
}

impl EffectSelection {
    /// Builds a selection, falling back to `{normal}` when nothing is selected.
    pub fn new<I>(effects: I) -> Self
    where
        I: IntoIterator<Item = Effect>,
    {
        let mut effects: BTreeSet<Effect> = effects.into_iter().collect();
        if effects.is_empty() {
            log::debug!("No effect selected, defaulting to 'normal'");
            effects.insert(Effect::Normal);
        }
        Self { effects }
    }

    /// Builds a selection from effect names. Unknown names count as "normal".
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(names.into_iter().map(|name| Effect::from_name(name.as_ref())))
    }

    pub fn iter(&self) -> impl Iterator<Item = Effect> + '_ {
        self.effects.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Never true for a normalized selection.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn contains(&self, effect: Effect) -> bool {
        self.effects.contains(&effect)
    }
}

impl Default for EffectSelection {
    fn default() -> Self {
        Self::new([Effect::Normal])
    }
}

impl From<Vec<String>> for EffectSelection {
    fn from(names: Vec<String>) -> Self {
        Self::from_names(names)
    }
}

impl From<EffectSelection> for Vec<String> {
    fn from(selection: EffectSelection) -> Self {
        selection.iter().map(|e| e.name().to_string()).collect()
    }
}

/// One concrete output configuration for an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantSpec {
    pub effect: Effect,
    pub mirror: bool,
    pub rotation: Rotation,
    pub scale_percent: Option<u16>,
}

/// The mirror states to export: both when `mirror_both` is set, otherwise
/// only the single-state mirror flag.
pub fn mirror_states(mirror_both: bool, mirror: bool) -> Vec<bool> {
    if mirror_both {
        vec![false, true]
    } else {
        vec![mirror]
    }
}

/// Enumerates the variants for one file in mirror-major order.
pub fn enumerate_variants(
    effects: &EffectSelection,
    mirror_both: bool,
    mirror: bool,
    rotation: Rotation,
    scale_percent: Option<u16>,
) -> Vec<VariantSpec> {
    mirror_states(mirror_both, mirror)
        .into_iter()
        .flat_map(|mirror| {
            effects.iter().map(move |effect| VariantSpec {
                effect,
                mirror,
                rotation,
                scale_percent,
            })
        })
        .collect()
}

/// Enumerates the variants for one file using a run's options.
pub fn variants_for(options: &ExportOptions, rotation: Rotation) -> Vec<VariantSpec> {
    enumerate_variants(
        &options.effects,
        options.mirror_both,
        options.mirror,
        rotation,
        options.scale_percent,
    )
}
