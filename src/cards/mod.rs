//! Card kinds, physical cards and the dealt deck.
//!
//! ## Kinds vs Cards
//!
//! - `CardKind`: a distinct label/artwork pair, as returned by a provider
//! - `Card`: one of the two physical copies of a kind on the table
//! - `Deck`: the shuffled sequence of cards for one deal

pub mod deck;
pub mod instance;
pub mod kind;

pub use deck::{validate_kinds, Deck, DeckError};
pub use instance::{Card, CardId};
pub use kind::{CardKind, KindId};
