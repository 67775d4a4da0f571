//! Unit instances and placements.
//!
//! A `UnitInstance` is identified purely by value: owning side, unit type
//! and instance number. Two instances with the same three values are the
//! same unit wherever they appear, so derived `Eq`/`Hash`/`Ord` are the
//! identity used by every unit set in the engine.

use serde::{Deserialize, Serialize};

use super::definition::UnitTypeId;
use crate::board::{Coordinate, Facing};
use crate::core::PlayerSide;

/// A specific unit in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitInstance {
    /// Owning side.
    pub side: PlayerSide,
    /// Unit type.
    pub unit_type: UnitTypeId,
    /// Distinguishes units of the same type on the same side.
    pub instance: u8,
}

impl UnitInstance {
    /// Create a unit instance.
    #[must_use]
    pub const fn new(side: PlayerSide, unit_type: UnitTypeId, instance: u8) -> Self {
        Self {
            side,
            unit_type,
            instance,
        }
    }

    /// Check if two units are on the same side.
    #[must_use]
    pub fn is_friendly_to(&self, other: &UnitInstance) -> bool {
        self.side == other.side
    }
}

impl std::fmt::Display for UnitInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} unit {}#{}", self.side, self.unit_type.0, self.instance)
    }
}

/// Where a unit stands and which way it faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitPlacement {
    pub coordinate: Coordinate,
    pub facing: Facing,
}

impl UnitPlacement {
    /// Create a placement.
    #[must_use]
    pub const fn new(coordinate: Coordinate, facing: Facing) -> Self {
        Self { coordinate, facing }
    }
}

impl std::fmt::Display for UnitPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} facing {}", self.coordinate, self.facing)
    }
}

/// A unit together with its placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitWithPlacement {
    pub unit: UnitInstance,
    pub placement: UnitPlacement,
}

impl UnitWithPlacement {
    /// Create a unit with placement.
    #[must_use]
    pub const fn new(unit: UnitInstance, placement: UnitPlacement) -> Self {
        Self { unit, placement }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_value_identity() {
        let a = UnitInstance::new(PlayerSide::One, UnitTypeId::new(4), 2);
        let b = UnitInstance::new(PlayerSide::One, UnitTypeId::new(4), 2);
        let c = UnitInstance::new(PlayerSide::Two, UnitTypeId::new(4), 2);

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<_> = [a].into_iter().collect();
        assert!(set.contains(&b));
        assert!(!set.contains(&c));
    }

    #[test]
    fn test_friendliness() {
        let a = UnitInstance::new(PlayerSide::One, UnitTypeId::new(1), 1);
        let b = UnitInstance::new(PlayerSide::One, UnitTypeId::new(2), 1);
        let c = UnitInstance::new(PlayerSide::Two, UnitTypeId::new(1), 1);

        assert!(a.is_friendly_to(&b));
        assert!(!a.is_friendly_to(&c));
    }

    #[test]
    fn test_serialization() {
        let unit = UnitInstance::new(PlayerSide::Two, UnitTypeId::new(3), 1);
        let json = serde_json::to_string(&unit).unwrap();
        assert!(json.contains("\"unitType\""));
        let back: UnitInstance = serde_json::from_str(&json).unwrap();
        assert_eq!(unit, back);
    }
}
