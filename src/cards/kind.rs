//! Card kinds - the distinct label/artwork pairs a deck is built from.
//!
//! A `CardKind` is what the deck provider returns. The engine duplicates
//! every kind into two physical `Card`s when dealing.

use serde::{Deserialize, Serialize};

/// Identifier of a kind, as stored by the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KindId(pub i64);

impl KindId {
    /// Create a new kind ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for KindId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Kind({})", self.0)
    }
}

/// A distinct label/artwork pairing, before duplication into two cards.
///
/// Serializes to the data endpoint's record shape `{id, label, url}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardKind {
    /// Provider-side identifier.
    pub id: KindId,

    /// Label shared by the two cards of this kind.
    pub label: String,

    /// Opaque locator of the artwork shown face-up.
    #[serde(rename = "url")]
    pub image_ref: String,
}

impl CardKind {
    /// Create a new kind.
    pub fn new(id: i64, label: impl Into<String>, image_ref: impl Into<String>) -> Self {
        Self {
            id: KindId::new(id),
            label: label.into(),
            image_ref: image_ref.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_id() {
        let id = KindId::new(5);
        assert_eq!(id.raw(), 5);
        assert_eq!(format!("{}", id), "Kind(5)");
    }

    #[test]
    fn test_wire_shape() {
        let kind = CardKind::new(1, "cat", "https://img/cat.png");
        let json = serde_json::to_value(&kind).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"id": 1, "label": "cat", "url": "https://img/cat.png"})
        );

        let back: CardKind = serde_json::from_value(json).unwrap();
        assert_eq!(back, kind);
    }
}
