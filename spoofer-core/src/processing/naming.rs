//! Output file names and archive layout.
//!
//! A generated name has the shape
//! `<base>[_rot<angle>][_mir]_<effect>[_scale<pct>].mp4`. Every marker that
//! distinguishes two variants of the same file is present in the name,
//! whatever the archive layout, so outputs never collide and a name can be
//! decoded back into its variant.

use crate::processing::effects::Effect;
use crate::processing::filters::is_active_scale;
use crate::processing::rotation::Rotation;
use crate::processing::variants::VariantSpec;

/// Extension of every output file. The container is always MP4.
pub const OUTPUT_EXTENSION: &str = "mp4";

const ROTATION_MARKER: &str = "_rot";
const MIRROR_MARKER: &str = "_mir";
const SCALE_MARKER: &str = "_scale";

/// Archive sub-directory for non-mirrored variants in nested layout.
pub const NORMAL_DIR: &str = "Normal";
/// Archive sub-directory for mirrored variants in nested layout.
pub const MIRROR_DIR: &str = "Mirror";

/// Where one variant lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    /// Output file name, e.g. `clip_rot90_mir_bw.mp4`.
    pub file_name: String,
    /// Path inside the archive, `/`-separated.
    pub archive_path: String,
}

/// Builds the transformation suffix for a variant (without extension).
pub fn variant_suffix(variant: &VariantSpec) -> String {
    let mut suffix = String::new();
    if !variant.rotation.is_identity() {
        suffix.push_str(ROTATION_MARKER);
        suffix.push_str(&variant.rotation.degrees().to_string());
    }
    if variant.mirror {
        suffix.push_str(MIRROR_MARKER);
    }
    suffix.push('_');
    suffix.push_str(variant.effect.name());
    if let Some(percent) = variant.scale_percent.filter(|&p| is_active_scale(p)) {
        suffix.push_str(SCALE_MARKER);
        suffix.push_str(&percent.to_string());
    }
    suffix
}

/// Resolves the output file name and archive path for a variant.
pub fn resolve(base: &str, variant: &VariantSpec, flat_layout: bool) -> ResolvedName {
    let file_name = format!("{base}{}.{OUTPUT_EXTENSION}", variant_suffix(variant));
    let archive_path = if flat_layout {
        file_name.clone()
    } else {
        format!("{base}/{}/{file_name}", mirror_dir(variant.mirror))
    };
    ResolvedName {
        file_name,
        archive_path,
    }
}

/// Sub-directory name for a mirror state.
pub fn mirror_dir(mirror: bool) -> &'static str {
    if mirror { MIRROR_DIR } else { NORMAL_DIR }
}

/// A variant recovered from a generated file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedName {
    pub rotation: Rotation,
    pub mirror: bool,
    pub effect: Effect,
    pub scale_percent: Option<u16>,
}

/// Decodes a file name produced by [`resolve`] for the given base name.
///
/// Returns `None` when the name was not generated for `base`.
pub fn decode(base: &str, file_name: &str) -> Option<DecodedName> {
    let stem = file_name
        .strip_suffix(OUTPUT_EXTENSION)?
        .strip_suffix('.')?
        .strip_prefix(base)?;

    let mut rest = stem;
    let mut rotation = Rotation::R0;
    if let Some(after) = rest.strip_prefix(ROTATION_MARKER) {
        let digits = after.find(|c: char| !c.is_ascii_digit()).unwrap_or(after.len());
        let degrees: i32 = after[..digits].parse().ok()?;
        rotation = Rotation::from_degrees(degrees);
        if rotation.is_identity() {
            return None;
        }
        rest = &after[digits..];
    }

    let mirror = match rest.strip_prefix(MIRROR_MARKER) {
        Some(after) if after.starts_with('_') => {
            rest = after;
            true
        }
        _ => false,
    };

    let rest = rest.strip_prefix('_')?;
    let (effect_token, scale_percent) = match rest.rsplit_once(SCALE_MARKER) {
        Some((effect, percent)) => (effect, Some(percent.parse::<u16>().ok()?)),
        None => (rest, None),
    };
    let effect = Effect::parse_exact(effect_token)?;

    Some(DecodedName {
        rotation,
        mirror,
        effect,
        scale_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(effect: Effect, mirror: bool, rotation: Rotation, scale: Option<u16>) -> VariantSpec {
        VariantSpec {
            effect,
            mirror,
            rotation,
            scale_percent: scale,
        }
    }

    #[test]
    fn test_plain_variant_nested() {
        let name = resolve("clip", &variant(Effect::Normal, false, Rotation::R0, None), false);
        assert_eq!(name.file_name, "clip_normal.mp4");
        assert_eq!(name.archive_path, "clip/Normal/clip_normal.mp4");
    }

    #[test]
    fn test_all_markers_in_order() {
        let name = resolve(
            "clip",
            &variant(Effect::BwContrast, true, Rotation::R270, Some(50)),
            false,
        );
        assert_eq!(name.file_name, "clip_rot270_mir_bwcontrast_scale50.mp4");
        assert_eq!(
            name.archive_path,
            "clip/Mirror/clip_rot270_mir_bwcontrast_scale50.mp4"
        );
    }

    #[test]
    fn test_flat_layout_keeps_mirror_marker() {
        let plain = resolve("clip", &variant(Effect::Bw, false, Rotation::R90, None), true);
        let mirrored = resolve("clip", &variant(Effect::Bw, true, Rotation::R90, None), true);
        assert_eq!(plain.archive_path, "clip_rot90_bw.mp4");
        assert_eq!(mirrored.archive_path, "clip_rot90_mir_bw.mp4");
        assert_ne!(plain.archive_path, mirrored.archive_path);
    }

    #[test]
    fn test_scale_100_never_named() {
        let name = resolve("clip", &variant(Effect::Normal, false, Rotation::R0, Some(100)), true);
        assert_eq!(name.file_name, "clip_normal.mp4");
    }

    #[test]
    fn test_round_trip_decoding() {
        let rotations = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];
        let scales = [None, Some(10), Some(75), Some(200)];
        for base in ["clip", "my_holiday_rot", "a_mir_b"] {
            for effect in Effect::ALL {
                for mirror in [false, true] {
                    for rotation in rotations {
                        for scale in scales {
                            let spec = variant(effect, mirror, rotation, scale);
                            let name = resolve(base, &spec, true);
                            let decoded = decode(base, &name.file_name)
                                .unwrap_or_else(|| panic!("failed to decode {}", name.file_name));
                            assert_eq!(decoded.rotation, rotation);
                            assert_eq!(decoded.mirror, mirror);
                            assert_eq!(decoded.effect, effect);
                            assert_eq!(decoded.scale_percent, scale);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_decode_rejects_foreign_names() {
        assert_eq!(decode("clip", "other_normal.mp4"), None);
        assert_eq!(decode("clip", "clip_normal.mov"), None);
        assert_eq!(decode("clip", "clip_sepia.mp4"), None);
        assert_eq!(decode("clip", "clip_rot45_bw.mp4"), None);
    }
}
