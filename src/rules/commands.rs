//! Matching unit activations to remaining commands.

use im::Vector;

use super::ruleset::Ruleset;
use crate::cards::{ActivationKind, Command};
use crate::core::{RuleViolation, Validation};
use crate::phases::IssueCommandsPhaseState;
use crate::units::UnitInstance;

/// Index of the first remaining command that admits `unit` for `kind`.
#[must_use]
pub fn find_command(
    ruleset: &Ruleset,
    commands: &Vector<Command>,
    unit: &UnitInstance,
    kind: ActivationKind,
) -> Option<usize> {
    let unit_type = ruleset.unit_type(unit).ok()?;
    commands.iter().position(|c| c.admits(unit, unit_type, kind))
}

/// Copy of `commands` with one activation of command `index` used.
#[must_use]
pub fn consume_command(commands: &Vector<Command>, index: usize) -> Vector<Command> {
    match commands.get(index) {
        Some(command) => commands.update(index, command.consumed()),
        None => commands.clone(),
    }
}

/// Can `unit` be activated for `kind` in the current issue-commands step.
pub fn is_commandable(
    ruleset: &Ruleset,
    phase: &IssueCommandsPhaseState,
    commanded: &im::OrdSet<UnitInstance>,
    unit: &UnitInstance,
    kind: ActivationKind,
) -> Validation {
    if commanded.contains(unit) {
        return Err(RuleViolation::AlreadyCommanded(*unit));
    }
    find_command(ruleset, phase.remaining_commands(), unit, kind)
        .map(|_| ())
        .ok_or(RuleViolation::NoCommandForUnit(*unit))
}

/// Speed bonus of the command that would order `unit` to move.
#[must_use]
pub fn move_speed_bonus(ruleset: &Ruleset, commands: &Vector<Command>, unit: &UnitInstance) -> u8 {
    find_command(ruleset, commands, unit, ActivationKind::Move)
        .and_then(|i| commands.get(i))
        .map_or(0, Command::speed_bonus)
}
