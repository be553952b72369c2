//! Rotation angles and the discrete rotation deltas offered to users.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A clockwise rotation restricted to quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "u16")]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// Maps an angle in degrees onto the allowed set.
    ///
    /// Only exactly 0, 90, 180 and 270 are accepted; any other value
    /// collapses to [`Rotation::R0`].
    pub fn from_degrees(degrees: i32) -> Self {
        match degrees {
            90 => Rotation::R90,
            180 => Rotation::R180,
            270 => Rotation::R270,
            0 => Rotation::R0,
            other => {
                log::debug!("Rotation {other} is not a quarter turn, using 0");
                Rotation::R0
            }
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }

    pub fn is_identity(self) -> bool {
        self == Rotation::R0
    }

    /// Applies a delta, wrapping modulo 360.
    pub fn apply(self, delta: RotationDelta) -> Self {
        let wrapped = (i32::from(self.degrees()) + delta.degrees()).rem_euclid(360);
        Self::from_degrees(wrapped)
    }
}

impl From<i32> for Rotation {
    fn from(degrees: i32) -> Self {
        Self::from_degrees(degrees)
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// One click of the rotation controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDelta {
    CounterClockwise,
    Clockwise,
    HalfTurn,
}

impl RotationDelta {
    pub fn degrees(self) -> i32 {
        match self {
            RotationDelta::CounterClockwise => -90,
            RotationDelta::Clockwise => 90,
            RotationDelta::HalfTurn => 180,
        }
    }
}

impl FromStr for RotationDelta {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "-90" | "ccw" => Ok(RotationDelta::CounterClockwise),
            "+90" | "90" | "cw" => Ok(RotationDelta::Clockwise),
            "180" | "+180" | "-180" | "flip" => Ok(RotationDelta::HalfTurn),
            other => Err(CoreError::OperationFailed(format!(
                "Invalid rotation delta '{other}' (expected -90, +90, 180, ccw, cw or flip)"
            ))),
        }
    }
}
