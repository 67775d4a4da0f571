//! The standard game.
//!
//! A 12 × 18 board with a little terrain in no man's land, four unit types,
//! six cards and two identical seven-unit armies:
//! - Each player holds every card at the start
//! - Both commanders start on their side's back row
//! - Seeded dice, so a game replays exactly for the same seed and events

mod game;

pub use game::{
    line_deployment, standard_cards, standard_unit_types, StandardGameBuilder, ARCHERS, CAVALRY, INFANTRY, PIKES,
};
