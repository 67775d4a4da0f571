//! Rules configuration.
//!
//! The engine never hardcodes rule constants. A game supplies a
//! `RulesConfig` at startup; the defaults describe the standard game:
//!
//! | setting | default |
//! |---|---|
//! | board | 12 rows × 18 columns |
//! | flexibility threshold | 4 |
//! | commander move distance | 4 |
//! | commander support distance | 3 |
//! | deployment depth | 3 rows |
//! | die sides | 6 |
//! | melee defeat margin | 3 |
//! | ranged hit bonus | 4 |

use serde::{Deserialize, Serialize};

use crate::board::{BoardGeometry, BoardShape};

/// Rule constants for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Board dimensions.
    pub board: BoardShape,

    /// Minimum combined flexibility for a unit to pass through a friendly unit.
    pub flexibility_threshold: u8,

    /// Maximum number of spaces a commander may move in one commanders phase.
    pub commander_move_distance: u8,

    /// Units farther than this from their commander lose support when rallying.
    pub support_distance: u8,

    /// Number of rows at each board edge available for deployment.
    pub deployment_depth: u8,

    /// Number of faces on the combat die.
    pub die_sides: u8,

    /// Melee winning margin at which the losing defender is defeated outright.
    pub defeat_margin: u8,

    /// Added to the target's defense to get the ranged hit threshold.
    pub ranged_hit_bonus: u8,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            board: BoardShape::STANDARD,
            flexibility_threshold: 4,
            commander_move_distance: 4,
            support_distance: 3,
            deployment_depth: 3,
            die_sides: 6,
            defeat_margin: 3,
            ranged_hit_bonus: 4,
        }
    }
}

impl RulesConfig {
    /// Create the standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board dimensions.
    #[must_use]
    pub fn with_board(mut self, board: BoardShape) -> Self {
        assert!(
            self.deployment_depth.saturating_mul(2) <= board.rows(),
            "Deployment zones must not overlap"
        );
        self.board = board;
        self
    }

    /// Set the pass-through flexibility threshold.
    #[must_use]
    pub fn with_flexibility_threshold(mut self, threshold: u8) -> Self {
        self.flexibility_threshold = threshold;
        self
    }

    /// Set the commander move distance.
    #[must_use]
    pub fn with_commander_move_distance(mut self, distance: u8) -> Self {
        self.commander_move_distance = distance;
        self
    }

    /// Set the commander support distance used by rallies.
    #[must_use]
    pub fn with_support_distance(mut self, distance: u8) -> Self {
        self.support_distance = distance;
        self
    }

    /// Set the deployment depth.
    #[must_use]
    pub fn with_deployment_depth(mut self, depth: u8) -> Self {
        assert!(depth > 0, "Deployment depth must be at least 1 row");
        assert!(
            depth.saturating_mul(2) <= self.board.rows(),
            "Deployment zones must not overlap"
        );
        self.deployment_depth = depth;
        self
    }

    /// Set the number of die faces.
    #[must_use]
    pub fn with_die_sides(mut self, sides: u8) -> Self {
        assert!(sides > 0, "Die must have at least one face");
        self.die_sides = sides;
        self
    }

    /// Set the melee defeat margin.
    #[must_use]
    pub fn with_defeat_margin(mut self, margin: u8) -> Self {
        self.defeat_margin = margin;
        self
    }

    /// Set the ranged hit bonus.
    #[must_use]
    pub fn with_ranged_hit_bonus(mut self, bonus: u8) -> Self {
        self.ranged_hit_bonus = bonus;
        self
    }
}
