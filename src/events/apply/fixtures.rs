//! Builders shared by the reducer tests.

use crate::board::{Board, BoardShape, Coordinate};
use crate::cards::{CardDefinition, CardId, CardRegistry, CardState, Command, CommandSize};
use crate::core::{GameState, PlayerSide, RulesConfig};
use crate::phases::{PhaseState, RoundState};
use crate::rules::Ruleset;
use crate::units::{UnitInstance, UnitRegistry, UnitType, UnitTypeId};

pub const FOOT: UnitTypeId = UnitTypeId::new(1);
/// Always wins a melee outright.
pub const CHAMPION: UnitTypeId = UnitTypeId::new(2);
/// Always hits.
pub const ARCHERS: UnitTypeId = UnitTypeId::new(3);
/// Never hit at range.
pub const SHIELDWALL: UnitTypeId = UnitTypeId::new(4);

pub const ADVANCE: CardId = CardId::new(1);
pub const VOLLEY: CardId = CardId::new(2);
pub const HOLD: CardId = CardId::new(3);

pub fn ruleset() -> Ruleset {
    let mut units = UnitRegistry::new();
    units.register(UnitType::new(FOOT, "Foot").with_combat(2, 0));
    units.register(UnitType::new(CHAMPION, "Champion").with_combat(20, 2));
    units.register(UnitType::new(ARCHERS, "Archers").with_ranged(4, 20));
    units.register(UnitType::new(SHIELDWALL, "Shieldwall").with_combat(1, 20));

    let mut cards = CardRegistry::new();
    cards.register(CardDefinition::new(ADVANCE, "Advance", 5).with_command(Command::new(CommandSize::Units, 2)));
    cards.register(CardDefinition::new(VOLLEY, "Volley", 3).with_command(Command::new(CommandSize::Units, 1)));
    cards.register(CardDefinition::new(HOLD, "Hold", 5).with_command(Command::new(CommandSize::Lines, 1)));

    Ruleset::new(RulesConfig::default(), units, cards)
}

pub fn c(text: &str) -> Coordinate {
    text.parse().unwrap()
}

pub fn foot(side: PlayerSide, instance: u8) -> UnitInstance {
    UnitInstance::new(side, FOOT, instance)
}

pub fn unit(side: PlayerSide, unit_type: UnitTypeId, instance: u8) -> UnitInstance {
    UnitInstance::new(side, unit_type, instance)
}

pub fn empty_board() -> Board {
    Board::new(BoardShape::STANDARD)
}

/// A round-one state sitting in `phase`.
pub fn state_in(phase: PhaseState, board: Board, cards: CardState) -> GameState {
    GameState::new(board, cards, Vec::new(), 17).with_round_state(RoundState::new(1).with_phase_state(phase))
}
