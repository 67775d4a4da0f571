//! Game state.
//!
//! ## GameState
//!
//! Complete, immutable game state:
//! - Round number and nested round/phase state
//! - Initiative holder
//! - Board (spaces, units, commanders)
//! - Card locations
//! - Lost commanders, routed, defeated and reserved units
//! - RNG position
//!
//! Every collection is an `im` persistent structure, so `clone()` is O(1)
//! and a reducer's copy-with-replacement shares every untouched branch with
//! the state it was derived from. No method here mutates `self`.

use im::OrdSet;
use serde::{Deserialize, Serialize};

use super::player::PlayerSide;
use super::rng::{GameRng, GameRngState};
use crate::board::Board;
use crate::cards::CardState;
use crate::phases::{Phase, PhaseState, RoundState};
use crate::units::UnitInstance;

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Current round number (starts at 1).
    pub current_round_number: u32,

    /// Where play stands within the round.
    pub round_state: RoundState,

    /// Side that acts first this round.
    pub initiative: PlayerSide,

    pub board: Board,

    pub cards: CardState,

    /// Sides whose commander has been lost.
    pub lost_commanders: OrdSet<PlayerSide>,

    /// Units removed by a rout.
    pub routed_units: OrdSet<UnitInstance>,

    /// Units removed by defeat in melee.
    pub defeated_units: OrdSet<UnitInstance>,

    /// Units not yet deployed.
    pub reserved_units: OrdSet<UnitInstance>,

    /// Dice position.
    pub rng: GameRngState,
}

impl GameState {
    /// Opening state: round 1, setup phase, side one holding initiative.
    #[must_use]
    pub fn new(
        board: Board,
        cards: CardState,
        reserves: impl IntoIterator<Item = UnitInstance>,
        seed: u64,
    ) -> Self {
        Self {
            current_round_number: 1,
            round_state: RoundState::opening(),
            initiative: PlayerSide::One,
            board,
            cards,
            lost_commanders: OrdSet::new(),
            routed_units: OrdSet::new(),
            defeated_units: OrdSet::new(),
            reserved_units: reserves.into_iter().collect(),
            rng: GameRngState::from_seed(seed),
        }
    }

    /// Side acting first this round.
    #[must_use]
    pub fn first_player(&self) -> PlayerSide {
        self.initiative
    }

    /// Side acting second this round.
    #[must_use]
    pub fn second_player(&self) -> PlayerSide {
        self.initiative.opponent()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.round_state.phase()
    }

    /// Current phase sub-state.
    #[must_use]
    pub fn phase_state(&self) -> &PhaseState {
        &self.round_state.current_phase
    }

    /// Check if a side's commander has been lost.
    #[must_use]
    pub fn is_commander_lost(&self, side: PlayerSide) -> bool {
        self.lost_commanders.contains(&side)
    }

    /// A side's units still in reserve.
    pub fn reserve_of(&self, side: PlayerSide) -> impl Iterator<Item = &UnitInstance> {
        self.reserved_units.iter().filter(move |u| u.side == side)
    }

    /// Restore the dice for a reducer.
    #[must_use]
    pub fn dice(&self) -> GameRng {
        GameRng::from_state(&self.rng)
    }

    // === Copy with replacement ===

    /// Copy with a different round state.
    #[must_use]
    pub fn with_round_state(&self, round_state: RoundState) -> Self {
        Self {
            round_state,
            ..self.clone()
        }
    }

    /// Copy with the current phase sub-state replaced.
    #[must_use]
    pub fn with_phase_state(&self, phase_state: PhaseState) -> Self {
        self.with_round_state(self.round_state.with_phase_state(phase_state))
    }

    /// Copy with a different board.
    #[must_use]
    pub fn with_board(&self, board: Board) -> Self {
        Self {
            board,
            ..self.clone()
        }
    }

    /// Copy with different card locations.
    #[must_use]
    pub fn with_cards(&self, cards: CardState) -> Self {
        Self {
            cards,
            ..self.clone()
        }
    }

    /// Copy with a different initiative holder.
    #[must_use]
    pub fn with_initiative(&self, initiative: PlayerSide) -> Self {
        Self {
            initiative,
            ..self.clone()
        }
    }

    /// Copy with the dice advanced to `rng`'s position.
    #[must_use]
    pub fn with_rng(&self, rng: &GameRng) -> Self {
        Self {
            rng: rng.state(),
            ..self.clone()
        }
    }

    /// Copy with a side's commander recorded lost.
    #[must_use]
    pub fn with_lost_commander(&self, side: PlayerSide) -> Self {
        Self {
            lost_commanders: self.lost_commanders.update(side),
            ..self.clone()
        }
    }

    /// Copy with units recorded routed.
    #[must_use]
    pub fn with_routed(&self, units: impl IntoIterator<Item = UnitInstance>) -> Self {
        let mut routed_units = self.routed_units.clone();
        routed_units.extend(units);
        Self {
            routed_units,
            ..self.clone()
        }
    }

    /// Copy with a unit recorded defeated.
    #[must_use]
    pub fn with_defeated(&self, unit: UnitInstance) -> Self {
        Self {
            defeated_units: self.defeated_units.update(unit),
            ..self.clone()
        }
    }

    /// Copy with units taken out of reserve.
    #[must_use]
    pub fn without_reserved(&self, units: impl IntoIterator<Item = UnitInstance>) -> Self {
        let mut reserved_units = self.reserved_units.clone();
        for unit in units {
            reserved_units.remove(&unit);
        }
        Self {
            reserved_units,
            ..self.clone()
        }
    }

    /// Copy starting a new round in the cards phase.
    #[must_use]
    pub fn with_new_round(&self) -> Self {
        let round_number = self.current_round_number + 1;
        Self {
            current_round_number: round_number,
            round_state: RoundState::new(round_number),
            ..self.clone()
        }
    }
}
