//! The deck: every physical card of a deal, in table order.
//!
//! Dealing duplicates each kind into two face-down cards, shuffles them and
//! numbers the slots `1..=2n` in table order. The card sequence is an
//! `im::Vector`, so snapshots of the table are O(1) clones.

use im::Vector;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use thiserror::Error;

use super::instance::{Card, CardId};
use super::kind::{CardKind, KindId};
use crate::core::GameRng;

/// Why a list of kinds cannot be dealt.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("a deck needs at least {min} kinds, got {got}")]
    TooFewKinds { min: usize, got: usize },

    #[error("label {0:?} is used by more than one kind")]
    DuplicateLabel(String),

    #[error("{0} appears more than once")]
    DuplicateKindId(KindId),

    #[error("{0} has a blank label")]
    BlankLabel(KindId),
}

/// Check that `kinds` can be dealt into a valid deck.
///
/// A valid list has at least `min_kinds` entries, unique ids and unique,
/// non-blank labels, so every label ends up on exactly two cards.
pub fn validate_kinds(kinds: &[CardKind], min_kinds: usize) -> Result<(), DeckError> {
    if kinds.len() < min_kinds {
        return Err(DeckError::TooFewKinds {
            min: min_kinds,
            got: kinds.len(),
        });
    }

    let mut ids = FxHashSet::default();
    let mut labels = FxHashSet::default();

    for kind in kinds {
        if kind.label.trim().is_empty() {
            return Err(DeckError::BlankLabel(kind.id));
        }
        if !ids.insert(kind.id) {
            return Err(DeckError::DuplicateKindId(kind.id));
        }
        if !labels.insert(kind.label.as_str()) {
            return Err(DeckError::DuplicateLabel(kind.label.clone()));
        }
    }

    Ok(())
}

/// The cards on the table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Deck {
    cards: Vector<Card>,
}

impl Deck {
    /// Duplicate every kind into two face-down cards and shuffle them.
    ///
    /// Does not validate; callers run `validate_kinds` first.
    pub fn deal(kinds: &[CardKind], rng: &mut GameRng) -> Self {
        let mut doubled: Vec<&CardKind> = kinds.iter().flat_map(|k| [k, k]).collect();
        rng.shuffle(&mut doubled);

        let cards = doubled
            .into_iter()
            .zip(1u32..)
            .map(|(kind, slot)| Card::face_down(CardId::new(slot), kind))
            .collect();

        Self { cards }
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Is the deck empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over cards in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Underlying persistent vector.
    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    /// Look up a card by id.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Set the face state of one card.
    ///
    /// Returns `true` if the card exists and its state changed.
    pub fn set_hidden(&mut self, id: CardId, hidden: bool) -> bool {
        let Some(index) = self.cards.iter().position(|c| c.id == id) else {
            return false;
        };
        let card = &mut self.cards[index];
        if card.is_hidden == hidden {
            return false;
        }
        card.is_hidden = hidden;
        true
    }

    /// Invert the face state of every card.
    pub fn flip_all(&mut self) {
        for card in self.cards.iter_mut() {
            card.is_hidden = !card.is_hidden;
        }
    }

    /// Are all cards face-up? An empty deck never counts as revealed.
    #[must_use]
    pub fn all_revealed(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(Card::is_revealed)
    }

    /// Are all cards face-down?
    #[must_use]
    pub fn all_hidden(&self) -> bool {
        self.cards.iter().all(|c| c.is_hidden)
    }

    /// Number of face-down cards.
    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_hidden).count()
    }

    /// How many cards carry each label.
    #[must_use]
    pub fn label_counts(&self) -> FxHashMap<&str, usize> {
        let mut counts = FxHashMap::default();
        for card in &self.cards {
            *counts.entry(card.label.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Does every label appear on exactly two cards?
    #[must_use]
    pub fn is_paired(&self) -> bool {
        !self.cards.is_empty() && self.label_counts().values().all(|&n| n == 2)
    }
}
