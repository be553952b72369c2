//! Effect catalog: symbolic effect names and their ffmpeg filter fragments.

use std::fmt;

/// A color effect that can be applied to a variant.
///
/// Declaration order is the catalog order and drives the order in which
/// variants are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Effect {
    Normal,
    Bw,
    BwContrast,
    GoldenHour,
}

impl Effect {
    /// Every effect in catalog order.
    pub const ALL: [Effect; 4] = [
        Effect::Normal,
        Effect::Bw,
        Effect::BwContrast,
        Effect::GoldenHour,
    ];

    /// Looks up an effect by name (case-insensitive).
    ///
    /// Unknown names resolve to [`Effect::Normal`], so an unrecognized effect
    /// never emits a filter.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "normal" => Effect::Normal,
            "bw" => Effect::Bw,
            "bwcontrast" => Effect::BwContrast,
            "goldenhour" => Effect::GoldenHour,
            other => {
                log::warn!("Unknown effect '{other}', treating it as 'normal'");
                Effect::Normal
            }
        }
    }

    /// Parses an effect name strictly, returning `None` for unknown names.
    pub fn parse_exact(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|effect| effect.name() == name)
    }

    /// The token used for this effect in option records and file names.
    pub fn name(self) -> &'static str {
        match self {
            Effect::Normal => "normal",
            Effect::Bw => "bw",
            Effect::BwContrast => "bwcontrast",
            Effect::GoldenHour => "goldenhour",
        }
    }

    /// The filter fragment for this effect; empty for [`Effect::Normal`].
    pub fn filter(self) -> &'static str {
        match self {
            Effect::Normal => "",
            Effect::Bw => "hue=s=0",
            Effect::BwContrast => "hue=s=0,eq=contrast=1.35:brightness=0.0",
            Effect::GoldenHour => {
                "colorbalance=rs=.10:gs=.05:bs=-.05,hue=s=1.12,eq=contrast=1.06:brightness=0.03"
            }
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the filter fragment for an effect name, or `""` for "normal" and
/// for names the catalog does not know.
pub fn filter_for(name: &str) -> &'static str {
    Effect::from_name(name).filter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_emits_no_filter() {
        assert_eq!(filter_for("normal"), "");
    }

    #[test]
    fn test_unknown_effect_falls_back_to_normal() {
        assert_eq!(Effect::from_name("sepia"), Effect::Normal);
        assert_eq!(filter_for("sepia"), "");
    }

    #[test]
    fn test_known_fragments() {
        assert_eq!(filter_for("bw"), "hue=s=0");
        assert!(filter_for("bwcontrast").starts_with("hue=s=0,eq=contrast=1.35"));
        assert!(filter_for("GoldenHour").starts_with("colorbalance="));
    }

    #[test]
    fn test_names_are_stable() {
        for effect in Effect::ALL {
            assert_eq!(Effect::parse_exact(effect.name()), Some(effect));
            assert_eq!(Effect::from_name(effect.name()), effect);
        }
    }
}
