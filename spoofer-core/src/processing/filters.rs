//! Filter-chain composition for the `-vf` argument.
//!
//! Filters are always emitted in the order rotation, mirror, effect, scale.
//! Rotation has to come before the horizontal flip because the flip acts on
//! the frame's current orientation, and scaling runs last so color
//! operations are not resampled twice.

use crate::config::{MAX_SCALE_PERCENT, MIN_SCALE_PERCENT, NO_OP_SCALE_PERCENT};
use crate::processing::rotation::Rotation;
use crate::processing::variants::VariantSpec;

/// Filter passed to ffmpeg when no transformation applies. ffmpeg rejects an
/// empty `-vf` argument.
pub const IDENTITY_FILTER: &str = "null";

/// Builder for constructing a video filter chain.
#[derive(Debug, Default)]
pub struct VideoFilterChain {
    filters: Vec<String>,
}

impl VideoFilterChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the transpose/rotate filter for a rotation.
    #[must_use]
    pub fn add_rotation(mut self, rotation: Rotation) -> Self {
        match rotation {
            Rotation::R0 => {}
            Rotation::R90 => self.filters.push("transpose=1".to_string()),
            Rotation::R180 => self.filters.push("rotate=PI".to_string()),
            Rotation::R270 => self.filters.push("transpose=2".to_string()),
        }
        self
    }

    #[must_use]
    pub fn add_mirror(mut self, mirror: bool) -> Self {
        if mirror {
            self.filters.push("hflip".to_string());
        }
        self
    }

    /// Adds an effect fragment; an empty fragment adds nothing.
    #[must_use]
    pub fn add_filter(mut self, fragment: &str) -> Self {
        if !fragment.is_empty() {
            self.filters.push(fragment.to_string());
        }
        self
    }

    /// Adds a proportional scale filter when the percentage is active.
    #[must_use]
    pub fn add_scale(mut self, scale_percent: Option<u16>) -> Self {
        if let Some(percent) = scale_percent.filter(|&p| is_active_scale(p)) {
            let factor = f64::from(percent) / 100.0;
            self.filters.push(format!(
                "scale=trunc(iw*{factor}/2)*2:trunc(ih*{factor}/2)*2"
            ));
        }
        self
    }

    /// Joins the chain, or `None` when it is empty.
    #[must_use]
    pub fn build(self) -> Option<String> {
        if self.filters.is_empty() {
            None
        } else {
            Some(self.filters.join(","))
        }
    }
}

/// Whether a scale percentage changes the output size at all.
pub fn is_active_scale(percent: u16) -> bool {
    (MIN_SCALE_PERCENT..=MAX_SCALE_PERCENT).contains(&percent) && percent != NO_OP_SCALE_PERCENT
}

/// Composes the full filter expression from its parts.
pub fn compose(
    effect_fragment: &str,
    mirror: bool,
    rotation: Rotation,
    scale_percent: Option<u16>,
) -> String {
    VideoFilterChain::new()
        .add_rotation(rotation)
        .add_mirror(mirror)
        .add_filter(effect_fragment)
        .add_scale(scale_percent)
        .build()
        .unwrap_or_else(|| IDENTITY_FILTER.to_string())
}

/// Composes the filter expression for one variant.
pub fn compose_for_variant(variant: &VariantSpec) -> String {
    compose(
        variant.effect.filter(),
        variant.mirror,
        variant.rotation,
        variant.scale_percent,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::effects::Effect;

    #[test]
    fn test_empty_chain_is_identity() {
        assert_eq!(compose("", false, Rotation::R0, None), "null");
        assert_eq!(compose("", false, Rotation::R0, Some(100)), "null");
    }

    #[test]
    fn test_order_is_rotation_mirror_effect_scale() {
        let chain = compose(Effect::Bw.filter(), true, Rotation::R90, Some(50));
        assert_eq!(
            chain,
            "transpose=1,hflip,hue=s=0,scale=trunc(iw*0.5/2)*2:trunc(ih*0.5/2)*2"
        );
    }

    #[test]
    fn test_rotation_mapping() {
        assert_eq!(compose("", false, Rotation::R90, None), "transpose=1");
        assert_eq!(compose("", false, Rotation::R270, None), "transpose=2");
        assert_eq!(compose("", false, Rotation::R180, None), "rotate=PI");
    }

    #[test]
    fn test_scale_100_and_out_of_range_are_omitted() {
        for percent in [100, 0, 5, 201, 500] {
            let chain = compose("", true, Rotation::R0, Some(percent));
            assert_eq!(chain, "hflip", "percent {percent}");
        }
        assert!(compose("", false, Rotation::R0, Some(200)).contains("iw*2/2"));
        assert!(compose("", false, Rotation::R0, Some(125)).contains("iw*1.25/2"));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let first = compose(Effect::GoldenHour.filter(), true, Rotation::R180, Some(75));
        for _ in 0..10 {
            assert_eq!(
                compose(Effect::GoldenHour.filter(), true, Rotation::R180, Some(75)),
                first
            );
        }
    }
}
