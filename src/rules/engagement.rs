//! Engagement angle classification.
//!
//! Given the attacker's facing at the moment of contact and the defender's
//! facing, exactly one of three classifications holds:
//!
//! | angle | attacker facing is … |
//! |---|---|
//! | front | the opposite of the defender's facing |
//! | flank | one of the defender's two orthogonal (±90°) facings |
//! | rear | the defender's facing or one of its ±45° facings |
//!
//! The three classifiers are advisory checks returning [`Validation`], so a
//! caller can ask about one angle and get the reason it does not apply.

use serde::{Deserialize, Serialize};

use crate::board::Facing;
use crate::core::{RuleViolation, Validation};

/// How an attacker made contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EngagementAngle {
    Front,
    Flank,
    Rear,
}

impl EngagementAngle {
    /// Bonus added to the attacker's melee total.
    #[must_use]
    pub const fn attack_bonus(self) -> u8 {
        match self {
            EngagementAngle::Front => 0,
            EngagementAngle::Flank => 1,
            EngagementAngle::Rear => 2,
        }
    }
}

/// Attacker meets the defender head on.
pub fn is_front_engagement(attacker: Facing, defender: Facing) -> Validation {
    if attacker == defender.opposite() {
        Ok(())
    } else {
        Err(RuleViolation::NotFrontEngagement { attacker, defender })
    }
}

/// Attacker strikes the defender's side.
pub fn is_flank_engagement(attacker: Facing, defender: Facing) -> Validation {
    if defender.orthogonal_facings().contains(&attacker) {
        Ok(())
    } else {
        Err(RuleViolation::NotFlankEngagement { attacker, defender })
    }
}

/// Attacker strikes from behind.
pub fn is_rear_engagement(attacker: Facing, defender: Facing) -> Validation {
    if attacker == defender || defender.adjacent_facings().contains(&attacker) {
        Ok(())
    } else {
        Err(RuleViolation::NotRearEngagement { attacker, defender })
    }
}

/// Classify an engagement.
///
/// The remaining two facings (±135° from the defender's) sit between front
/// and flank and count as front.
#[must_use]
pub fn classify_engagement(attacker: Facing, defender: Facing) -> EngagementAngle {
    if is_rear_engagement(attacker, defender).is_ok() {
        EngagementAngle::Rear
    } else if is_flank_engagement(attacker, defender).is_ok() {
        EngagementAngle::Flank
    } else {
        EngagementAngle::Front
    }
}
