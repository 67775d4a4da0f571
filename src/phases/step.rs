//! Linear step machines shared by every phase.

use crate::core::InvariantViolation;

/// A phase's local step enum.
///
/// Steps form a straight line ending in a terminal `complete` step.
pub trait PhaseStep: Copy + Eq + std::fmt::Debug {
    /// The step after this one, `None` at the terminal step.
    fn next(self) -> Option<Self>;

    /// Name used in messages.
    fn name(self) -> &'static str;

    /// Whether this is the terminal step.
    fn is_complete(self) -> bool {
        self.next().is_none()
    }
}

/// Advance `current` by exactly one step, requiring it to be `expected`.
///
/// A mismatch means the reducer was run against the wrong step, which is an
/// invariant violation rather than a player error.
pub fn advance_step<S: PhaseStep>(current: S, expected: S) -> Result<S, InvariantViolation> {
    require_step(current, expected)?;
    current.next().ok_or_else(|| InvariantViolation::StepMismatch {
        expected: "a step with a successor".to_string(),
        found: current.name().to_string(),
    })
}

/// Require `current` to be `expected`.
pub fn require_step<S: PhaseStep>(current: S, expected: S) -> Result<(), InvariantViolation> {
    if current == expected {
        Ok(())
    } else {
        Err(InvariantViolation::StepMismatch {
            expected: expected.name().to_string(),
            found: current.name().to_string(),
        })
    }
}

/// Define a step enum with its linear order and names.
macro_rules! phase_steps {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every step in order.
            pub const ORDER: &'static [$name] = &[$($name::$variant),+];
        }

        impl $crate::phases::PhaseStep for $name {
            fn next(self) -> Option<Self> {
                let position = Self::ORDER.iter().position(|s| *s == self)?;
                Self::ORDER.get(position + 1).copied()
            }

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }
    };
}

pub(crate) use phase_steps;

#[cfg(test)]
mod tests {
    use super::*;

    phase_steps! {
        /// Test steps.
        pub enum TestStep {
            First => "first",
            Second => "second",
            Done => "done",
        }
    }

    #[test]
    fn test_linear_order() {
        assert_eq!(TestStep::First.next(), Some(TestStep::Second));
        assert_eq!(TestStep::Second.next(), Some(TestStep::Done));
        assert_eq!(TestStep::Done.next(), None);
        assert!(TestStep::Done.is_complete());
    }

    #[test]
    fn test_advance_requires_expected_step() {
        assert_eq!(advance_step(TestStep::First, TestStep::First), Ok(TestStep::Second));
        assert!(matches!(
            advance_step(TestStep::Second, TestStep::First),
            Err(InvariantViolation::StepMismatch { .. })
        ));
        assert!(advance_step(TestStep::Done, TestStep::Done).is_err());
    }
}
