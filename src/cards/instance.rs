//! Card instances - one physical card on the table.
//!
//! `CardKind` holds the label and artwork. A `Card` is one of the two
//! copies of a kind in a deal, with its own slot id and face state.

use serde::{Deserialize, Serialize};

use super::kind::{CardKind, KindId};

/// Identifier of a physical card within one deal.
///
/// Always positive. Stable for the lifetime of a deal; a reset deals new
/// cards and reassigns ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CardId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// One physical card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Slot identity.
    pub id: CardId,

    /// Kind this card was duplicated from.
    pub kind: KindId,

    /// Label; equal labels form a pair.
    pub label: String,

    /// Artwork locator shown face-up.
    pub image_ref: String,

    /// `true` = face-down.
    pub is_hidden: bool,
}

impl Card {
    /// Create a face-down card from a kind.
    pub fn face_down(id: CardId, kind: &CardKind) -> Self {
        Self {
            id,
            kind: kind.id,
            label: kind.label.clone(),
            image_ref: kind.image_ref.clone(),
            is_hidden: true,
        }
    }

    /// Is the card face-up?
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        !self.is_hidden
    }

    /// Do the two cards form a pair?
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.id != other.id && self.label == other.label
    }
}
