//! Game status, click outcomes, events and errors.

use serde::Serialize;
use thiserror::Error;

use crate::cards::CardId;

/// Derived game status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum GameStatus {
    /// No start time recorded.
    NotStarted,
    /// Started and not all cards revealed.
    InProgress,
    /// Every card revealed; the clock is stopped.
    Won,
}

impl GameStatus {
    /// Is the game over?
    #[must_use]
    pub fn is_over(self) -> bool {
        self == GameStatus::Won
    }
}

/// Why a click changed nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IgnoreReason {
    /// The game has not been started.
    NotStarted,
    /// The game is already won.
    GameOver,
    /// A reset is flipping the cards.
    ResetPending,
    /// A mismatched pair is waiting to be flipped back.
    Comparing,
    /// No card with that id.
    UnknownCard,
    /// The card is already face-up.
    AlreadyRevealed,
}

/// Result of `GameEngine::handle_card_click`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ClickOutcome {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// First card of a pair turned face-up.
    Revealed(CardId),
    /// Second card matched the first; both stay face-up.
    Matched(CardId, CardId),
    /// Second card differs; both flip back after the delay.
    Mismatched(CardId, CardId),
}

impl ClickOutcome {
    /// Did the click change state?
    #[must_use]
    pub fn is_ignored(self) -> bool {
        matches!(self, ClickOutcome::Ignored(_))
    }
}

/// Something that happened inside the engine, for renderers and effects.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum EngineEvent {
    /// The game was started.
    Started,
    /// The clock counted another second.
    Tick { elapsed_seconds: u64 },
    /// A mismatched pair was hidden again.
    FlippedBack { pair: [CardId; 2] },
    /// Reset phase 1: every card flipped.
    ResetStarted,
    /// Reset phase 2: a fresh deck was dealt.
    ResetDealt,
    /// All pairs matched.
    Won { elapsed_seconds: u64 },
}

/// Misuse of an engine operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("the game is already started")]
    AlreadyStarted,

    #[error("a reset is in progress")]
    ResetPending,
}
