//! Card choice, initiative and rally legality.

use rustc_hash::FxHashSet;

use crate::cards::{CardId, CardState};
use crate::core::{PlayerMap, PlayerSide, RuleViolation, Validation};
use crate::phases::RoutDiscardState;

/// Can `side` choose `card` this round.
pub fn is_legal_card_choice(cards: &CardState, side: PlayerSide, card: CardId) -> Validation {
    if cards.chosen[side].is_some() {
        return Err(RuleViolation::CardAlreadyChosen(side));
    }
    if !cards.in_hand(side, card) {
        return Err(RuleViolation::CardNotInHand { side, card });
    }
    Ok(())
}

/// Who holds initiative after both cards are revealed.
///
/// The strictly lower initiative value wins; a tie keeps `current`.
///
/// ```
/// use rust_wargame::core::{PlayerMap, PlayerSide};
/// use rust_wargame::rules::determine_initiative;
///
/// let tied = PlayerMap::with_value(5);
/// assert_eq!(determine_initiative(PlayerSide::Two, &tied), PlayerSide::Two);
///
/// let values = PlayerMap::default().with(PlayerSide::One, 3).with(PlayerSide::Two, 8);
/// assert_eq!(determine_initiative(PlayerSide::Two, &values), PlayerSide::One);
/// ```
#[must_use]
pub fn determine_initiative(current: PlayerSide, values: &PlayerMap<u8>) -> PlayerSide {
    let one = values[PlayerSide::One];
    let two = values[PlayerSide::Two];
    match one.cmp(&two) {
        std::cmp::Ordering::Less => PlayerSide::One,
        std::cmp::Ordering::Greater => PlayerSide::Two,
        std::cmp::Ordering::Equal => current,
    }
}

/// Can `side` make this rally decision.
///
/// Declining needs cards in hand; rallying needs cards in the discard pile.
/// A player with neither may only decline.
pub fn is_legal_rally_choice(cards: &CardState, side: PlayerSide, perform_rally: bool) -> Validation {
    let hand_empty = cards.hands[side].is_empty();
    let discard_empty = cards.discarded[side].is_empty();
    if perform_rally && discard_empty {
        return Err(RuleViolation::NothingToRally(side));
    }
    if !perform_rally && hand_empty && !discard_empty {
        return Err(RuleViolation::MustRally(side));
    }
    Ok(())
}

/// Are these the right cards to discard for a rout.
pub fn is_legal_rout_discard(cards: &CardState, rout: &RoutDiscardState, chosen: &[CardId]) -> Validation {
    if chosen.len() != rout.cards_to_discard {
        return Err(RuleViolation::WrongDiscardCount {
            expected: rout.cards_to_discard,
            actual: chosen.len(),
        });
    }
    let mut seen = FxHashSet::default();
    for card in chosen {
        if !seen.insert(*card) {
            return Err(RuleViolation::DuplicateCard(*card));
        }
        if !cards.in_hand(rout.player, *card) {
            return Err(RuleViolation::CardNotInHand {
                side: rout.player,
                card: *card,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{UnitInstance, UnitTypeId};
    use im::Vector;

    fn ids(raw: &[u32]) -> Vec<CardId> {
        raw.iter().map(|r| CardId::new(*r)).collect()
    }

    #[test]
    fn test_card_choice() {
        let cards = CardState::with_hands(ids(&[1, 2]), ids(&[3]));

        assert!(is_legal_card_choice(&cards, PlayerSide::One, CardId::new(1)).is_ok());
        assert_eq!(
            is_legal_card_choice(&cards, PlayerSide::One, CardId::new(3)),
            Err(RuleViolation::CardNotInHand {
                side: PlayerSide::One,
                card: CardId::new(3)
            })
        );

        let chosen = cards.choose(PlayerSide::One, CardId::new(1));
        assert_eq!(
            is_legal_card_choice(&chosen, PlayerSide::One, CardId::new(2)),
            Err(RuleViolation::CardAlreadyChosen(PlayerSide::One))
        );
    }

    #[test]
    fn test_initiative_tie_keeps_holder() {
        for current in PlayerSide::ALL {
            assert_eq!(determine_initiative(current, &PlayerMap::with_value(4)), current);
        }
    }

    #[test]
    fn test_lower_value_wins_outright() {
        let values = PlayerMap::default().with(PlayerSide::One, 9).with(PlayerSide::Two, 2);
        for current in PlayerSide::ALL {
            assert_eq!(determine_initiative(current, &values), PlayerSide::Two);
        }
    }

    #[test]
    fn test_rally_choice() {
        let cards = CardState::with_hands(ids(&[]), ids(&[5])).choose(PlayerSide::Two, CardId::new(5));
        let cards = cards.reveal().discard_played();

        // Side two: empty hand, one discarded card.
        assert_eq!(
            is_legal_rally_choice(&cards, PlayerSide::Two, false),
            Err(RuleViolation::MustRally(PlayerSide::Two))
        );
        assert!(is_legal_rally_choice(&cards, PlayerSide::Two, true).is_ok());
    }

    #[test]
    fn test_rally_with_no_cards_may_only_decline() {
        let cards = CardState::with_hands(ids(&[]), ids(&[7]));
        assert!(cards.hands[PlayerSide::One].is_empty());
        assert!(cards.discarded[PlayerSide::One].is_empty());

        assert_eq!(
            is_legal_rally_choice(&cards, PlayerSide::One, true),
            Err(RuleViolation::NothingToRally(PlayerSide::One))
        );
        assert_eq!(is_legal_rally_choice(&cards, PlayerSide::One, false), Ok(()));
    }

    #[test]
    fn test_rout_discard() {
        let cards = CardState::with_hands(ids(&[1, 2, 3]), ids(&[]));
        let unit = UnitInstance::new(PlayerSide::One, UnitTypeId::new(1), 1);
        let rout = RoutDiscardState::new(PlayerSide::One, Vector::unit(unit), 3);

        assert!(is_legal_rout_discard(&cards, &rout, &ids(&[2])).is_ok());
        assert_eq!(
            is_legal_rout_discard(&cards, &rout, &ids(&[1, 2])),
            Err(RuleViolation::WrongDiscardCount {
                expected: 1,
                actual: 2
            })
        );
        assert!(is_legal_rout_discard(&cards, &rout, &ids(&[7])).is_err());
    }
}
