use hashbrown::HashSet;
use rand::{seq::SliceRandom, Rng};

use crate::catalog::StudyItem;

use super::SessionError;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CardSide {
    Front,
    Back,
}

///Stateful iteration over a derived deck. Owns a private copy of the deck;
///nothing here touches the catalog or the store.
///
///The cursor always satisfies `index < deck.len()`: advancing past either
///end is rejected rather than wrapping, and the UI renders the rejected
///direction as a disabled control.
pub struct FlashcardSession {
    deck: Vec<StudyItem>,
    index: usize,
    side: CardSide,
    mastered: HashSet<String>,
}

impl FlashcardSession {
    pub fn new(deck: Vec<StudyItem>) -> Result<Self, SessionError> {
        Self::with_mastered(deck, HashSet::new())
    }

    ///Starts a session with mastery flags seeded from saved progress.
    pub fn with_mastered(
        deck: Vec<StudyItem>,
        mastered: HashSet<String>,
    ) -> Result<Self, SessionError> {
        if deck.is_empty() {
            return Err(SessionError::EmptyDeck);
        }

        Ok(Self {
            deck,
            index: 0,
            side: CardSide::Front,
            mastered,
        })
    }

    pub fn current(&self) -> &StudyItem {
        &self.deck[self.index]
    }

    pub fn side(&self) -> CardSide {
        self.side
    }

    pub fn flip(&mut self) {
        self.side = match self.side {
            CardSide::Front => CardSide::Back,
            CardSide::Back => CardSide::Front,
        };
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.deck.len()
    }

    pub fn has_prev(&self) -> bool {
        self.index > 0
    }

    ///Advances to the next card, front side up.
    pub fn next(&mut self) -> Result<(), SessionError> {
        if !self.has_next() {
            return Err(SessionError::NoNextCard);
        }

        self.index += 1;
        self.side = CardSide::Front;
        Ok(())
    }

    pub fn prev(&mut self) -> Result<(), SessionError> {
        if !self.has_prev() {
            return Err(SessionError::NoPrevCard);
        }

        self.index -= 1;
        self.side = CardSide::Front;
        Ok(())
    }

    ///Re-deals the deck as a uniformly random permutation and resets the
    ///cursor to the first card.
    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        self.deck.shuffle(rng);
        self.index = 0;
        self.side = CardSide::Front;
    }

    ///Flips the mastery flag for an item; returns the new state. Does not
    ///move the cursor.
    pub fn toggle_mastered(&mut self, id: &str) -> bool {
        if self.mastered.remove(id) {
            false
        } else {
            self.mastered.insert(id.to_owned());
            true
        }
    }

    pub fn is_mastered(&self, id: &str) -> bool {
        self.mastered.contains(id)
    }

    pub fn mastered_count(&self) -> usize {
        self.deck
            .iter()
            .filter(|item| self.mastered.contains(&item.id))
            .count()
    }

    pub fn mastered_ids(&self) -> &HashSet<String> {
        &self.mastered
    }

    ///One-based cursor position and deck length, for the progress gauge.
    pub fn progress(&self) -> (usize, usize) {
        (self.index + 1, self.deck.len())
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }
}
