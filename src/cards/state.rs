//! Card locations for both players.
//!
//! A card moves hand → chosen (hidden until revealed) → in play → discard,
//! and a rally returns the discard pile to hand. Every transition returns a
//! new `CardState`; the piles are `im::Vector`s so untouched piles are shared.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::definition::CardId;
use crate::core::{PlayerMap, PlayerSide};

/// Where every player's cards currently are.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardState {
    /// Cards available to choose.
    pub hands: PlayerMap<Vector<CardId>>,

    /// Card chosen this round, not yet revealed.
    pub chosen: PlayerMap<Option<CardId>>,

    /// Revealed card granting this round's commands.
    pub in_play: PlayerMap<Option<CardId>>,

    /// Played and discarded cards.
    pub discarded: PlayerMap<Vector<CardId>>,
}

impl CardState {
    /// Starting state with the given hands.
    #[must_use]
    pub fn with_hands(first: Vec<CardId>, second: Vec<CardId>) -> Self {
        let mut hands: PlayerMap<Vector<CardId>> = PlayerMap::default();
        hands[PlayerSide::One] = first.into_iter().collect();
        hands[PlayerSide::Two] = second.into_iter().collect();
        Self {
            hands,
            ..Self::default()
        }
    }

    /// Check if a card is in a player's hand.
    #[must_use]
    pub fn in_hand(&self, side: PlayerSide, card: CardId) -> bool {
        self.hands[side].contains(&card)
    }

    /// Move a card from hand to the hidden chosen slot.
    #[must_use]
    pub fn choose(&self, side: PlayerSide, card: CardId) -> Self {
        let hand: Vector<CardId> = self.hands[side].iter().copied().filter(|c| *c != card).collect();
        Self {
            hands: self.hands.with(side, hand),
            chosen: self.chosen.with(side, Some(card)),
            ..self.clone()
        }
    }

    /// Move both chosen cards into play.
    #[must_use]
    pub fn reveal(&self) -> Self {
        Self {
            chosen: PlayerMap::default(),
            in_play: self.chosen.clone(),
            ..self.clone()
        }
    }

    /// Move in-play cards to their owners' discard piles.
    #[must_use]
    pub fn discard_played(&self) -> Self {
        let discarded = PlayerMap::new(|side| {
            let mut pile = self.discarded[side].clone();
            if let Some(card) = self.in_play[side] {
                pile.push_back(card);
            }
            pile
        });
        Self {
            in_play: PlayerMap::default(),
            discarded,
            ..self.clone()
        }
    }

    /// Return a player's discard pile to their hand.
    #[must_use]
    pub fn rally(&self, side: PlayerSide) -> Self {
        let mut hand = self.hands[side].clone();
        hand.append(self.discarded[side].clone());
        Self {
            hands: self.hands.with(side, hand),
            discarded: self.discarded.with(side, Vector::new()),
            ..self.clone()
        }
    }

    /// Move specific cards from hand to discard.
    #[must_use]
    pub fn discard_from_hand(&self, side: PlayerSide, cards: &[CardId]) -> Self {
        let hand: Vector<CardId> = self.hands[side]
            .iter()
            .copied()
            .filter(|c| !cards.contains(c))
            .collect();
        let mut pile = self.discarded[side].clone();
        pile.extend(cards.iter().copied());
        Self {
            hands: self.hands.with(side, hand),
            discarded: self.discarded.with(side, pile),
            ..self.clone()
        }
    }
}
