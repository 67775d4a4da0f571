//! The static rules of one game: constants plus unit and card data.
//!
//! A `Ruleset` never changes during play. Legality checks, reducers and the
//! expected-event oracle all read from it; none write to it.

use crate::board::BoardGeometry;
use crate::cards::{CardDefinition, CardId, CardRegistry};
use crate::core::{InvariantViolation, PlayerSide, RuleViolation, RulesConfig};
use crate::units::{UnitInstance, UnitRegistry, UnitType};

/// Rule constants and registries for a game.
#[derive(Clone, Debug, Default)]
pub struct Ruleset {
    pub config: RulesConfig,
    pub units: UnitRegistry,
    pub cards: CardRegistry,
}

impl Ruleset {
    /// Create a ruleset.
    #[must_use]
    pub fn new(config: RulesConfig, units: UnitRegistry, cards: CardRegistry) -> Self {
        Self { config, units, cards }
    }

    /// Stats of a unit, as a player-facing check.
    pub fn unit_type(&self, unit: &UnitInstance) -> Result<&UnitType, RuleViolation> {
        self.units
            .type_of(unit)
            .ok_or(RuleViolation::UnknownUnitType(unit.unit_type))
    }

    /// Stats of a unit that is already in the game.
    pub fn known_unit_type(&self, unit: &UnitInstance) -> Result<&UnitType, InvariantViolation> {
        self.units
            .type_of(unit)
            .ok_or(InvariantViolation::UnknownUnitType(unit.unit_type))
    }

    /// A card that is already in the game.
    pub fn card(&self, id: CardId) -> Result<&CardDefinition, InvariantViolation> {
        self.cards.get(id).ok_or(InvariantViolation::UnknownCard(id))
    }

    /// Rows a side may deploy into: the top rows for side one, the bottom
    /// rows for side two.
    #[must_use]
    pub fn deployment_rows(&self, side: PlayerSide) -> std::ops::Range<u8> {
        let rows = self.config.board.rows();
        let depth = self.config.deployment_depth.min(rows);
        match side {
            PlayerSide::One => 0..depth,
            PlayerSide::Two => rows - depth..rows,
        }
    }
}
