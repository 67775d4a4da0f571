//! Card system.
//!
//! Cards drive each round: both players secretly choose one, the lower
//! initiative value acts first, and the commands on the revealed cards
//! authorize unit activations.
//!
//! - `CardDefinition` / `CardRegistry`: static card data
//! - `Command`: a card-granted authorization with restrictions and modifiers
//! - `CardState`: which pile every card is in

mod command;
mod definition;
mod registry;
mod state;

pub use command::{ActivationKind, Command, CommandModifier, CommandSize, UnitRestriction};
pub use definition::{CardDefinition, CardId};
pub use registry::CardRegistry;
pub use state::CardState;
