//! Commands - the authorizations a played card grants.
//!
//! A card carries one or more commands. Each command authorizes up to
//! `quantity` unit activations (a move or a ranged attack) during the
//! issue-commands phase, limited by its restrictions and modifiers.

use serde::{Deserialize, Serialize};

use crate::units::{UnitInstance, UnitType};

/// Organizational size class of a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommandSize {
    Units,
    Lines,
    Groups,
}

/// Which units a command may be issued to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum UnitRestriction {
    /// Only units of this type.
    UnitType(crate::units::UnitTypeId),
    /// Only units with this trait.
    Trait(String),
}

impl UnitRestriction {
    fn admits(&self, unit_type: &UnitType) -> bool {
        match self {
            UnitRestriction::UnitType(id) => unit_type.id == *id,
            UnitRestriction::Trait(name) => unit_type.has_trait(name),
        }
    }
}

/// Optional adjustments to what a command allows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum CommandModifier {
    /// Extra movement points for units moved with this command.
    SpeedBonus(u8),
    /// The command may only be used to move.
    MoveOnly,
    /// The command may only be used for ranged attacks.
    RangedOnly,
}

/// What a unit activation is used for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivationKind {
    Move,
    RangedAttack,
}

/// A card-granted authorization.
///
/// ## Example
///
/// ```
/// use rust_wargame::cards::{Command, CommandModifier, CommandSize};
///
/// let charge = Command::new(CommandSize::Units, 2)
///     .with_trait_restriction("mounted")
///     .with_modifier(CommandModifier::SpeedBonus(1));
///
/// assert_eq!(charge.quantity, 2);
/// assert_eq!(charge.speed_bonus(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Command {
    /// Size class.
    pub size: CommandSize,

    /// Remaining activations.
    pub quantity: u8,

    /// Any one restriction must admit the unit; empty admits every unit.
    #[serde(default)]
    pub restrictions: Vec<UnitRestriction>,

    /// Optional modifiers.
    #[serde(default)]
    pub modifiers: Vec<CommandModifier>,
}

impl Command {
    /// Create an unrestricted command.
    #[must_use]
    pub fn new(size: CommandSize, quantity: u8) -> Self {
        Self {
            size,
            quantity,
            restrictions: Vec::new(),
            modifiers: Vec::new(),
        }
    }

    /// Restrict to a unit type.
    #[must_use]
    pub fn with_unit_restriction(mut self, unit_type: crate::units::UnitTypeId) -> Self {
        self.restrictions.push(UnitRestriction::UnitType(unit_type));
        self
    }

    /// Restrict to units with a trait.
    #[must_use]
    pub fn with_trait_restriction(mut self, name: impl Into<String>) -> Self {
        self.restrictions.push(UnitRestriction::Trait(name.into()));
        self
    }

    /// Add a modifier.
    #[must_use]
    pub fn with_modifier(mut self, modifier: CommandModifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// Total speed bonus granted.
    #[must_use]
    pub fn speed_bonus(&self) -> u8 {
        self.modifiers
            .iter()
            .map(|m| match m {
                CommandModifier::SpeedBonus(b) => *b,
                _ => 0,
            })
            .sum()
    }

    /// Whether this command can activate `unit` (of type `unit_type`) for `kind`.
    #[must_use]
    pub fn admits(&self, unit: &UnitInstance, unit_type: &UnitType, kind: ActivationKind) -> bool {
        if self.quantity == 0 || unit.unit_type != unit_type.id {
            return false;
        }
        let kind_allowed = match kind {
            ActivationKind::Move => !self.modifiers.contains(&CommandModifier::RangedOnly),
            ActivationKind::RangedAttack => !self.modifiers.contains(&CommandModifier::MoveOnly),
        };
        kind_allowed
            && (self.restrictions.is_empty() || self.restrictions.iter().any(|r| r.admits(unit_type)))
    }

    /// Copy with one activation used.
    #[must_use]
    pub fn consumed(&self) -> Self {
        Self {
            quantity: self.quantity.saturating_sub(1),
            ..self.clone()
        }
    }
}
