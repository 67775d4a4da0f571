//! Player sides and per-side data storage.
//!
//! ## PlayerSide
//!
//! The game is strictly two-player. Sides are fixed for the whole game;
//! which side acts first in a round is decided by initiative, not by side.
//!
//! ## PlayerMap
//!
//! Per-side data storage backed by a two-element array for O(1) access.
//! Supports iteration and indexing by `PlayerSide`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two opposing sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlayerSide {
    One,
    Two,
}

impl PlayerSide {
    /// Both sides, in index order.
    pub const ALL: [PlayerSide; 2] = [PlayerSide::One, PlayerSide::Two];

    /// Get the raw side index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            PlayerSide::One => 0,
            PlayerSide::Two => 1,
        }
    }

    /// The opposing side.
    ///
    /// ```
    /// use rust_wargame::core::PlayerSide;
    ///
    /// assert_eq!(PlayerSide::One.opponent(), PlayerSide::Two);
    /// assert_eq!(PlayerSide::Two.opponent().opponent(), PlayerSide::Two);
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            PlayerSide::One => PlayerSide::Two,
            PlayerSide::Two => PlayerSide::One,
        }
    }
}

impl std::fmt::Display for PlayerSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerSide::One => write!(f, "Player 1"),
            PlayerSide::Two => write!(f, "Player 2"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use rust_wargame::core::{PlayerSide, PlayerMap};
///
/// let mut hand_sizes: PlayerMap<u32> = PlayerMap::with_value(7);
/// hand_sizes[PlayerSide::Two] = 5;
///
/// assert_eq!(hand_sizes[PlayerSide::One], 7);
/// assert_eq!(hand_sizes[PlayerSide::Two], 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerSide) -> T) -> Self {
        Self {
            data: [factory(PlayerSide::One), factory(PlayerSide::Two)],
        }
    }

    /// Create a new PlayerMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: PlayerSide) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: PlayerSide) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Return a copy of this map with one side's entry replaced.
    #[must_use]
    pub fn with(&self, side: PlayerSide, value: T) -> Self
    where
        T: Clone,
    {
        let mut next = self.clone();
        next.data[side.index()] = value;
        next
    }

    /// Iterate over (PlayerSide, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerSide, &T)> {
        PlayerSide::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T: Default> Default for PlayerMap<T> {
    fn default() -> Self {
        Self::with_default()
    }
}

impl<T> Index<PlayerSide> for PlayerMap<T> {
    type Output = T;

    fn index(&self, side: PlayerSide) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<PlayerSide> for PlayerMap<T> {
    fn index_mut(&mut self, side: PlayerSide) -> &mut Self::Output {
        self.get_mut(side)
    }
}
