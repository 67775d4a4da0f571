//! Game rules.
//!
//! Pure legality checks and outcome calculations, plus the [`RulesEngine`]
//! seam and the [`Session`] that drives a game through it.
//!
//! ## Layout
//!
//! - [`ruleset`]: unit types, cards and constants for one game
//! - `setup`, `cards`, `commander`, `movement`, `ranged`: legality of each
//!   kind of player choice
//! - [`engagement`]: front/flank/rear classification
//! - [`combat`]: melee and ranged outcomes, forced moves, command support
//! - [`commands`]: matching units to the commands a card grants
//! - [`choice`]: one entry point that checks any player choice
//! - [`engine`]: `RulesEngine`, `Session` and game results
//!
//! Nothing here mutates state; reducers in [`crate::events`] call into
//! these functions.

mod cards;
pub mod choice;
pub mod combat;
mod commander;
pub mod commands;
pub mod engagement;
pub mod engine;
mod movement;
mod ranged;
pub mod ruleset;
mod setup;

pub use cards::{determine_initiative, is_legal_card_choice, is_legal_rally_choice, is_legal_rout_discard};
pub use choice::{pending_rout_discard, validate_choice};
pub use commander::is_legal_commander_move;
pub use engagement::{
    classify_engagement, is_flank_engagement, is_front_engagement, is_rear_engagement, EngagementAngle,
};
pub use engine::{GameResult, RulesEngine, Session, SessionError};
pub use movement::{can_move_into, can_move_through, is_legal_unit_move, legal_unit_moves};
pub use ranged::{is_legal_ranged_attack, ranged_targets};
pub use ruleset::Ruleset;
pub use setup::is_legal_setup;
