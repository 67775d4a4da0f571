//! Events and the state machine that consumes them.
//!
//! ## Flow
//!
//! ```text
//! expected_event(state)  →  does the incoming event match?
//!                        →  (player choices) legality checks
//!                        →  apply(state, event)  →  next state
//! ```
//!
//! [`expected_event`] is the gate; [`apply`] assumes it has been passed.
//! `Session` in [`crate::rules`] runs the whole sequence.

mod apply;
mod event;
mod expected;

pub use apply::apply;
pub use event::{Event, GameEffect, PlayerChoice, PlayerChoiceKind};
pub use expected::{expected_event, ExpectedEvent};
