//! Core engine types: players, configuration, RNG, errors and game state.
//!
//! Everything here is shared by the board, rules, phase and event layers.
//! Games configure these via `RulesConfig` rather than modifying the core.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use config::RulesConfig;
pub use error::{BoardError, InvariantViolation, RuleViolation, Validation};
pub use player::{PlayerMap, PlayerSide};
pub use rng::{GameRng, GameRngState};
pub use state::GameState;
