use crate::cards::CardId;
use crate::core::{GameState, InvariantViolation, PlayerMap, PlayerSide};
use crate::phases::{advance_step, require_step, CardsStep, PhaseState};
use crate::rules::{determine_initiative, Ruleset};

/// Hide a player's chosen card; the second choice moves on to the reveal.
pub(super) fn choose_card(state: &GameState, player: PlayerSide, card: CardId) -> Result<GameState, InvariantViolation> {
    let phase = state.phase_state().cards()?;
    require_step(phase.step, CardsStep::ChooseCards)?;
    if state.cards.chosen[player].is_some() {
        return Err(InvariantViolation::Inconsistent(format!("{player} has already chosen a card")));
    }

    let cards = state.cards.choose(player, card);
    let phase = if PlayerSide::ALL.iter().all(|side| cards.chosen[*side].is_some()) {
        phase.with_step(advance_step(phase.step, CardsStep::ChooseCards)?)
    } else {
        phase.clone()
    };
    tracing::debug!(%player, "card chosen");

    Ok(state.with_cards(cards).with_phase_state(PhaseState::Cards(phase)))
}

/// Put both chosen cards into play and settle initiative.
pub(super) fn reveal_cards(ruleset: &Ruleset, state: &GameState) -> Result<GameState, InvariantViolation> {
    let phase = state.phase_state().cards()?;
    let step = advance_step(phase.step, CardsStep::RevealCards)?;

    let cards = state.cards.reveal();
    let mut values = PlayerMap::with_value(0u8);
    for side in PlayerSide::ALL {
        let card = cards.in_play[side].ok_or(InvariantViolation::NoCardInPlay(side))?;
        values[side] = ruleset.card(card)?.initiative;
    }
    let initiative = determine_initiative(state.initiative, &values);
    tracing::debug!(
        one = values[PlayerSide::One],
        two = values[PlayerSide::Two],
        %initiative,
        "cards revealed"
    );

    Ok(state
        .with_cards(cards)
        .with_initiative(initiative)
        .with_phase_state(PhaseState::Cards(phase.with_step(step))))
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use crate::cards::CardState;
    use crate::phases::CardsPhaseState;

    fn choosing() -> GameState {
        state_in(
            PhaseState::Cards(CardsPhaseState::new()),
            empty_board(),
            CardState::with_hands(vec![ADVANCE, HOLD], vec![VOLLEY, HOLD]),
        )
    }

    #[test]
    fn test_choices_advance_to_reveal() {
        let one = choose_card(&choosing(), PlayerSide::One, ADVANCE).unwrap();
        assert_eq!(one.phase_state().step_name(), "chooseCards");
        assert!(!one.cards.in_hand(PlayerSide::One, ADVANCE));

        let both = choose_card(&one, PlayerSide::Two, VOLLEY).unwrap();
        assert_eq!(both.phase_state().step_name(), "revealCards");
    }

    #[test]
    fn test_second_choice_rejected() {
        let one = choose_card(&choosing(), PlayerSide::One, ADVANCE).unwrap();
        assert!(choose_card(&one, PlayerSide::One, HOLD).is_err());
    }

    #[test]
    fn test_reveal_lower_initiative_wins() {
        let chosen = choose_card(&choose_card(&choosing(), PlayerSide::One, ADVANCE).unwrap(), PlayerSide::Two, VOLLEY)
            .unwrap();
        let revealed = reveal_cards(&ruleset(), &chosen).unwrap();

        assert_eq!(revealed.initiative, PlayerSide::Two);
        assert_eq!(revealed.cards.in_play[PlayerSide::One], Some(ADVANCE));
        assert_eq!(revealed.cards.chosen[PlayerSide::One], None);
        assert!(revealed.phase_state().is_complete());
    }

    #[test]
    fn test_reveal_tie_keeps_initiative() {
        let chosen = choose_card(&choose_card(&choosing(), PlayerSide::One, ADVANCE).unwrap(), PlayerSide::Two, HOLD)
            .unwrap()
            .with_initiative(PlayerSide::Two);
        let revealed = reveal_cards(&ruleset(), &chosen).unwrap();

        assert_eq!(revealed.initiative, PlayerSide::Two);
    }

    #[test]
    fn test_reveal_before_choices() {
        assert!(matches!(
            reveal_cards(&ruleset(), &choosing()),
            Err(InvariantViolation::StepMismatch { .. })
        ));
    }
}
