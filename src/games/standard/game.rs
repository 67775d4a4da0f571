//! Standard game implementation.

use crate::board::{Board, BoardGeometry, Coordinate, Terrain};
use crate::cards::{CardDefinition, CardId, CardRegistry, CardState, Command, CommandModifier, CommandSize};
use crate::core::{GameState, PlayerSide, RulesConfig};
use crate::events::PlayerChoice;
use crate::protocol::default_facing;
use crate::rules::{Ruleset, Session};
use crate::units::{UnitInstance, UnitPlacement, UnitRegistry, UnitType, UnitTypeId, UnitWithPlacement};

pub const INFANTRY: UnitTypeId = UnitTypeId::new(1);
pub const CAVALRY: UnitTypeId = UnitTypeId::new(2);
pub const ARCHERS: UnitTypeId = UnitTypeId::new(3);
pub const PIKES: UnitTypeId = UnitTypeId::new(4);

/// Unit types of the standard game.
#[must_use]
pub fn standard_unit_types() -> UnitRegistry {
    let mut units = UnitRegistry::new();
    units.register(UnitType::new(INFANTRY, "Infantry").with_combat(3, 3));
    units.register(
        UnitType::new(CAVALRY, "Cavalry")
            .with_speed(4)
            .with_flexibility(1)
            .with_combat(4, 2)
            .with_trait("mounted"),
    );
    units.register(
        UnitType::new(ARCHERS, "Archers")
            .with_flexibility(3)
            .with_combat(1, 2)
            .with_ranged(4, 3)
            .with_trait("missile"),
    );
    units.register(
        UnitType::new(PIKES, "Pikes")
            .with_speed(1)
            .with_flexibility(1)
            .with_combat(2, 5),
    );
    units
}

/// Cards of the standard game, initiative 1 (fastest) to 6.
#[must_use]
pub fn standard_cards() -> CardRegistry {
    let mut cards = CardRegistry::new();
    cards.register(
        CardDefinition::new(CardId::new(1), "Skirmish", 1)
            .with_command(Command::new(CommandSize::Units, 1).with_modifier(CommandModifier::RangedOnly)),
    );
    cards.register(
        CardDefinition::new(CardId::new(2), "Cavalry Charge", 2).with_command(
            Command::new(CommandSize::Units, 2)
                .with_trait_restriction("mounted")
                .with_modifier(CommandModifier::SpeedBonus(1)),
        ),
    );
    cards.register(
        CardDefinition::new(CardId::new(3), "Volley", 3).with_command(
            Command::new(CommandSize::Units, 2)
                .with_unit_restriction(ARCHERS)
                .with_modifier(CommandModifier::RangedOnly),
        ),
    );
    cards.register(
        CardDefinition::new(CardId::new(4), "Probe", 4).with_command(Command::new(CommandSize::Units, 2)),
    );
    cards.register(
        CardDefinition::new(CardId::new(5), "General Advance", 5)
            .with_command(Command::new(CommandSize::Lines, 3).with_modifier(CommandModifier::MoveOnly)),
    );
    cards.register(
        CardDefinition::new(CardId::new(6), "Hold the Line", 6)
            .with_command(Command::new(CommandSize::Groups, 1))
            .with_command(Command::new(CommandSize::Units, 1).with_unit_restriction(PIKES)),
    );
    cards
}

/// Builder for the standard game.
#[derive(Clone, Debug)]
pub struct StandardGameBuilder {
    config: RulesConfig,
    seed: u64,
    army: Vec<(UnitTypeId, u8)>,
    terrain: Vec<(Coordinate, Terrain)>,
}

impl Default for StandardGameBuilder {
    fn default() -> Self {
        Self {
            config: RulesConfig::default(),
            seed: 0,
            army: vec![(INFANTRY, 3), (CAVALRY, 2), (ARCHERS, 1), (PIKES, 1)],
            terrain: vec![
                (Coordinate::new(5, 3), Terrain::Forest),
                (Coordinate::new(6, 3), Terrain::Forest),
                (Coordinate::new(5, 8), Terrain::Hill),
                (Coordinate::new(6, 9), Terrain::Hill),
                (Coordinate::new(5, 14), Terrain::Water),
                (Coordinate::new(6, 14), Terrain::Water),
            ],
        }
    }
}

impl StandardGameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed for the dice.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace each side's army with `count` units of each listed type.
    #[must_use]
    pub fn with_army(mut self, army: Vec<(UnitTypeId, u8)>) -> Self {
        self.army = army;
        self
    }

    /// Replace the terrain of spaces; everything else is plain.
    #[must_use]
    pub fn with_terrain(mut self, terrain: Vec<(Coordinate, Terrain)>) -> Self {
        self.terrain = terrain;
        self
    }

    /// One side's army, all in reserve.
    #[must_use]
    pub fn army_of(&self, side: PlayerSide) -> Vec<UnitInstance> {
        self.army
            .iter()
            .flat_map(|&(unit_type, count)| (1..=count).map(move |n| UnitInstance::new(side, unit_type, n)))
            .collect()
    }

    /// Build the ruleset and the opening state.
    #[must_use]
    pub fn build(self) -> (Ruleset, GameState) {
        let cards = standard_cards();
        let hand: Vec<CardId> = cards.iter().map(|card| card.id).collect();

        let board = self
            .terrain
            .iter()
            .filter(|(coordinate, _)| self.config.board.contains(*coordinate))
            .fold(Board::new(self.config.board), |board, &(coordinate, terrain)| {
                board.with_terrain(coordinate, terrain)
            });

        let reserves = self
            .army_of(PlayerSide::One)
            .into_iter()
            .chain(self.army_of(PlayerSide::Two));
        let state = GameState::new(board, CardState::with_hands(hand.clone(), hand), reserves, self.seed);

        tracing::debug!(seed = self.seed, units = state.reserved_units.len(), "standard game built");
        (Ruleset::new(self.config, standard_unit_types(), cards), state)
    }

    /// Build and wrap in a session.
    #[must_use]
    pub fn build_session(self) -> Session {
        let (ruleset, state) = self.build();
        Session::new(ruleset, state)
    }
}

/// A setup choice deploying a side's whole reserve in one line.
///
/// Units stand on the deployment row nearest the centre, facing the enemy,
/// in columns centred on the board; the commander stands behind the middle
/// of the line. Returns `None` when the reserve is empty or too wide for
/// the board.
#[must_use]
pub fn line_deployment(ruleset: &Ruleset, state: &GameState, side: PlayerSide) -> Option<PlayerChoice> {
    let rows = ruleset.deployment_rows(side);
    if rows.is_empty() {
        return None;
    }
    let (line, back) = match side {
        PlayerSide::One => (rows.end - 1, rows.start),
        PlayerSide::Two => (rows.start, rows.end - 1),
    };

    let units: Vec<UnitInstance> = state.reserve_of(side).copied().collect();
    let columns = ruleset.config.board.columns();
    let width = u8::try_from(units.len()).ok()?;
    if width == 0 || width > columns {
        return None;
    }
    let first = (columns - width) / 2;

    let placements = units
        .iter()
        .zip(first..)
        .map(|(unit, column)| {
            UnitWithPlacement::new(
                *unit,
                UnitPlacement::new(Coordinate::new(line, column), default_facing(side)),
            )
        })
        .collect();

    Some(PlayerChoice::SetupUnits {
        player: side,
        placements,
        commander: Coordinate::new(back, first + width / 2),
    })
}
