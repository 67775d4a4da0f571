//! Deterministic dice for combat and ranged resolution.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical rolls
//! - **Serializable**: O(1) state capture and restore via word position
//!
//! `GameState` stores only the serializable `GameRngState`. A reducer that
//! needs dice restores a `GameRng`, rolls, and writes the advanced state into
//! the new `GameState`; the input state keeps its own RNG position, so
//! re-applying the same event to the same state rolls the same numbers.
//!
//! ```
//! use rust_wargame::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let saved = rng.state();
//! let first = rng.roll_die(6);
//!
//! let mut replay = GameRng::from_state(&saved);
//! assert_eq!(replay.roll_die(6), first);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Roll a die with `sides` faces, returning 1..=sides.
    pub fn roll_die(&mut self, sides: u8) -> u8 {
        self.inner.gen_range(1..=sides.max(1))
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state stored inside `GameState`.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many rolls have been made.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

impl GameRngState {
    /// Fresh state for a seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        GameRng::new(seed).state()
    }
}
