//! Card definitions - static card data.
//!
//! A card has an initiative value (lower acts first) and the commands it
//! grants when played. Which player holds which card is tracked separately
//! in [`CardState`](super::CardState).

use serde::{Deserialize, Serialize};

use super::command::Command;

/// Unique identifier for a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use rust_wargame::cards::{CardDefinition, CardId, Command, CommandSize};
///
/// let advance = CardDefinition::new(CardId::new(1), "General Advance", 5)
///     .with_command(Command::new(CommandSize::Units, 3));
///
/// assert_eq!(advance.initiative, 5);
/// assert_eq!(advance.commands.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier.
    pub id: CardId,

    /// Display name.
    pub name: String,

    /// Initiative value; the lower played value wins initiative.
    pub initiative: u8,

    /// Commands granted when played.
    pub commands: Vec<Command>,
}

impl CardDefinition {
    /// Create a card with no commands.
    pub fn new(id: CardId, name: impl Into<String>, initiative: u8) -> Self {
        Self {
            id,
            name: name.into(),
            initiative,
            commands: Vec::new(),
        }
    }

    /// Add a command.
    #[must_use]
    pub fn with_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }
}
