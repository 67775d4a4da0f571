//! Unit type definitions - static unit data.
//!
//! `UnitType` holds the stats every instance of a unit type shares: how far
//! it moves, how easily friendly units pass through it, and its combat
//! values. Instance-specific data (side, instance number, placement) lives
//! elsewhere.

use serde::{Deserialize, Serialize};

/// Unique identifier for a unit type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitTypeId(pub u16);

impl UnitTypeId {
    /// Create a new unit type ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for UnitTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UnitType({})", self.0)
    }
}

/// Ranged attack capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangedProfile {
    /// Depth of the forward firing arc.
    pub range: u8,
    /// Added to the attack die.
    pub strength: u8,
}

/// Static unit type definition.
///
/// ## Example
///
/// ```
/// use rust_wargame::units::{UnitType, UnitTypeId};
///
/// let archers = UnitType::new(UnitTypeId::new(3), "Archers")
///     .with_speed(3)
///     .with_flexibility(2)
///     .with_ranged(4, 2)
///     .with_trait("missile");
///
/// assert!(archers.has_trait("missile"));
/// assert_eq!(archers.ranged.unwrap().range, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitType {
    /// Unique identifier.
    pub id: UnitTypeId,

    /// Display name.
    pub name: String,

    /// Movement points per move.
    pub speed: u8,

    /// Pass-through stat; two friendly units may pass through each other
    /// when their combined flexibility reaches the configured threshold.
    pub flexibility: u8,

    /// Melee attack value.
    pub attack: u8,

    /// Defense value, used against both melee and ranged attacks.
    pub defense: u8,

    /// Ranged attack, if any.
    pub ranged: Option<RangedProfile>,

    /// Free-form traits used by command restrictions.
    pub traits: Vec<String>,
}

impl UnitType {
    /// Create a unit type with baseline stats.
    pub fn new(id: UnitTypeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            speed: 2,
            flexibility: 2,
            attack: 2,
            defense: 2,
            ranged: None,
            traits: Vec::new(),
        }
    }

    /// Set speed.
    #[must_use]
    pub fn with_speed(mut self, speed: u8) -> Self {
        self.speed = speed;
        self
    }

    /// Set flexibility.
    #[must_use]
    pub fn with_flexibility(mut self, flexibility: u8) -> Self {
        self.flexibility = flexibility;
        self
    }

    /// Set melee attack and defense.
    #[must_use]
    pub fn with_combat(mut self, attack: u8, defense: u8) -> Self {
        self.attack = attack;
        self.defense = defense;
        self
    }

    /// Give the unit a ranged attack.
    #[must_use]
    pub fn with_ranged(mut self, range: u8, strength: u8) -> Self {
        self.ranged = Some(RangedProfile { range, strength });
        self
    }

    /// Add a trait.
    #[must_use]
    pub fn with_trait(mut self, name: impl Into<String>) -> Self {
        self.traits.push(name.into());
        self
    }

    /// Check for a trait.
    #[must_use]
    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.iter().any(|t| t == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let unit = UnitType::new(UnitTypeId::new(1), "Spearmen");

        assert_eq!(unit.speed, 2);
        assert_eq!(unit.flexibility, 2);
        assert!(unit.ranged.is_none());
        assert!(!unit.has_trait("missile"));
    }

    #[test]
    fn test_builder() {
        let unit = UnitType::new(UnitTypeId::new(2), "Knights")
            .with_speed(5)
            .with_flexibility(1)
            .with_combat(4, 3)
            .with_trait("mounted");

        assert_eq!(unit.speed, 5);
        assert_eq!(unit.attack, 4);
        assert_eq!(unit.defense, 3);
        assert!(unit.has_trait("mounted"));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", UnitTypeId::new(7)), "UnitType(7)");
    }
}
