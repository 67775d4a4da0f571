//! # rust-wargame
//!
//! Rules engine for a two-player, grid-based tactical wargame.
//!
//! ## Design Principles
//!
//! 1. **Immutable state**: every event produces a new `GameState`. All
//!    collections are `im` persistent structures, so copies are O(1) and
//!    share everything a reducer did not touch.
//!
//! 2. **Oracle before reducer**: the expected-event oracle names the only
//!    legitimate next event. Player choices are checked against it and the
//!    legality rules before any reducer runs.
//!
//! 3. **Configuration over convention**: board size, distances, thresholds
//!    and dice come from `RulesConfig`; unit types and cards from registries.
//!
//! ## Round structure
//!
//! ```text
//! setup (once) → cards → commanders → commands → melee → cleanup → cards …
//! ```
//!
//! ## Modules
//!
//! - `core`: players, configuration, RNG, errors, game state
//! - `board`: facings, coordinates, geometry queries, spaces, the board
//! - `units`: unit types, registry, instances and placements
//! - `cards`: card definitions, commands, card locations
//! - `rules`: legality checks, combat, the `RulesEngine` and `Session`
//! - `phases`: phase cycle, round state, per-phase and resolution records
//! - `events`: events, the expected-event oracle, reducers
//! - `protocol`: inbound player commands
//! - `games`: the standard game setup
//!
//! ## Example
//!
//! ```
//! use rust_wargame::games::standard::{line_deployment, StandardGameBuilder};
//! use rust_wargame::{Phase, PlayerSide};
//!
//! let mut session = StandardGameBuilder::new().with_seed(1).build_session();
//! for side in [PlayerSide::One, PlayerSide::Two] {
//!     let setup = line_deployment(session.engine(), session.state(), side).unwrap();
//!     session.submit(setup).unwrap();
//! }
//! session.fire_effects().unwrap();
//! assert_eq!(session.state().phase(), Phase::Cards);
//! ```

pub mod board;
pub mod cards;
pub mod core;
pub mod events;
pub mod games;
pub mod phases;
pub mod protocol;
pub mod rules;
pub mod units;

// Re-export commonly used types
pub use crate::core::{
    BoardError, GameRng, GameRngState, GameState, InvariantViolation, PlayerMap, PlayerSide, RuleViolation, RulesConfig,
    Validation,
};

pub use crate::board::{Board, BoardShape, BoardSpace, Coordinate, Facing, Terrain, UnitPresence};

pub use crate::units::{UnitInstance, UnitPlacement, UnitRegistry, UnitType, UnitTypeId, UnitWithPlacement};

pub use crate::cards::{CardDefinition, CardId, CardRegistry, CardState, Command, CommandSize};

pub use crate::phases::{Phase, PhaseState, RoundState};

pub use crate::events::{apply, expected_event, Event, ExpectedEvent, GameEffect, PlayerChoice, PlayerChoiceKind};

pub use crate::rules::{GameResult, Ruleset, RulesEngine, Session, SessionError};

pub use crate::protocol::{PlayerCommand, ProtocolError};
